//! Backend status codes and the error every remote call fails with

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code reported by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const GENERIC: StatusCode = StatusCode(218);
    pub const BAD_LOGIN_PASSWORD: StatusCode = StatusCode(204);
    pub const NOT_FOUND: StatusCode = StatusCode(1100);
    pub const GENERIC_API_ERROR: StatusCode = StatusCode(1600);
    pub const API_NETWORK_ERROR: StatusCode = StatusCode(1601);
    pub const TIMEOUT: StatusCode = StatusCode(1602);

    /// Transient network failures that a best-effort call may swallow
    pub const NETWORK_ERRORS: [StatusCode; 3] = [
        StatusCode::GENERIC_API_ERROR,
        StatusCode::API_NETWORK_ERROR,
        StatusCode::TIMEOUT,
    ];

    pub fn is_network_error(self) -> bool {
        Self::NETWORK_ERRORS.contains(&self)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure of a single remote procedure call
#[derive(Clone, Debug, PartialEq, Error, Serialize, Deserialize)]
#[error("{desc} (code {code})")]
pub struct RpcError {
    pub code: StatusCode,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

impl RpcError {
    pub fn new(code: StatusCode, name: impl Into<String>, desc: impl Into<String>) -> Self {
        RpcError {
            code,
            name: name.into(),
            desc: desc.into(),
        }
    }

    pub fn generic(desc: impl Into<String>) -> Self {
        RpcError::new(StatusCode::GENERIC, "GENERIC", desc)
    }
}
