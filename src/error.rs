//! Errors raised inside handlers before they become error updates

use thiserror::Error;

use crate::rpc::{RpcError, StatusCode};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// User input rejected before any remote call
    #[error("{0}")]
    Validation(String),

    /// Local state doesn't allow the operation
    #[error("{0}")]
    Precondition(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HandlerError {
    pub fn rpc_code(&self) -> Option<StatusCode> {
        match self {
            HandlerError::Rpc(e) => Some(e.code),
            _ => None,
        }
    }

    /// Transient network failure from the allowlist
    pub fn is_network_error(&self) -> bool {
        self.rpc_code().is_some_and(StatusCode::is_network_error)
    }

    /// Text shown to the user; RPC failures carry the backend's description
    pub fn message(&self) -> String {
        match self {
            HandlerError::Rpc(e) if !e.desc.is_empty() => e.desc.clone(),
            other => other.to_string(),
        }
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
