//! Node client for the two network round-trips
//!
//! The pipeline touches the network exactly twice: an account lookup before
//! signing and a broadcast after. Both live here, behind ordinary request
//! timeouts; there is no retry or backoff, that is the caller's decision.

use crate::errors::{CroSignerError, CroSignerResult};
use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// On-chain account state needed to populate a [`Signer`](crate::tx::Signer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account number assigned by the chain at account creation
    pub account_number: u64,
    /// Monotonically increasing transaction nonce
    pub sequence: u64,
}

/// HTTP client bound to one network's REST and RPC endpoints
pub struct ChainClient {
    http: reqwest::Client,
    network: Network,
}

impl ChainClient {
    pub fn new(network: &Network) -> CroSignerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| CroSignerError::NetworkError {
                url: network.rest_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            network: *network,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Fetch the account number and sequence for an address
    ///
    /// An address with no on-chain account yields `AccountNotFound`; that is
    /// a distinct, user-actionable condition, not a transport failure.
    pub async fn get_account(&self, address: &str) -> CroSignerResult<Account> {
        let url = format!(
            "{}/cosmos/auth/v1beta1/accounts/{}",
            self.network.rest_url, address
        );
        debug!(%url, "querying account");

        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|e| CroSignerError::NetworkError {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CroSignerError::AccountNotFound {
                address: address.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(CroSignerError::NetworkError {
                url,
                message: format!("HTTP {}", response.status()),
            });
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| CroSignerError::BadResponse {
                    message: e.to_string(),
                })?;
        let account = parse_account_response(&body)?;
        debug!(
            account_number = account.account_number,
            sequence = account.sequence,
            "account found"
        );
        Ok(account)
    }

    /// Broadcast a signed transaction in commit mode
    ///
    /// Takes the lowercase hex payload from
    /// [`SignedTransaction::to_hex`](crate::tx::SignedTransaction::to_hex)
    /// and returns the node's response as-is.
    pub async fn broadcast_tx_commit(&self, tx_hex: &str) -> CroSignerResult<serde_json::Value> {
        let url = format!(
            "{}/broadcast_tx_commit?tx=0x{}",
            self.network.rpc_url, tx_hex
        );
        debug!(bytes = tx_hex.len() / 2, "broadcasting transaction");

        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|e| CroSignerError::NetworkError {
                    url: url.clone(),
                    message: e.to_string(),
                })?;
        if !response.status().is_success() {
            return Err(CroSignerError::NetworkError {
                url,
                message: format!("HTTP {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| CroSignerError::BadResponse {
                message: e.to_string(),
            })
    }
}

/// Parse the REST `/cosmos/auth/v1beta1/accounts/{address}` response
///
/// The endpoint returns account_number and sequence as JSON strings; a
/// NotFound error body (gRPC code 5) also arrives with some gateways'
/// HTTP 200, so the payload shape is checked as well.
fn parse_account_response(body: &serde_json::Value) -> CroSignerResult<Account> {
    if body.get("code").and_then(|c| c.as_u64()) == Some(5) {
        return Err(CroSignerError::AccountNotFound {
            address: body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown")
                .to_string(),
        });
    }

    let account = body
        .get("account")
        .ok_or_else(|| CroSignerError::BadResponse {
            message: "missing 'account' object".to_string(),
        })?;

    let parse_u64_field = |name: &str| -> CroSignerResult<u64> {
        let value = account
            .get(name)
            .ok_or_else(|| CroSignerError::BadResponse {
                message: format!("missing '{name}'"),
            })?;
        match value {
            serde_json::Value::String(s) => {
                s.parse().map_err(|e| CroSignerError::BadResponse {
                    message: format!("'{name}' is not an integer: {e}"),
                })
            }
            serde_json::Value::Number(n) => {
                n.as_u64().ok_or_else(|| CroSignerError::BadResponse {
                    message: format!("'{name}' is not a u64"),
                })
            }
            _ => Err(CroSignerError::BadResponse {
                message: format!("'{name}' has an unexpected type"),
            }),
        }
    };

    Ok(Account {
        account_number: parse_u64_field("account_number")?,
        sequence: parse_u64_field("sequence")?,
    })
}
