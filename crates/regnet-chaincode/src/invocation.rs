//! # Invocation Envelope
//!
//! Wire shapes exchanged with the chaincode host. Arguments arrive as
//! strings, the way ledger hosts pass them; responses are JSON.

use crate::errors::{ErrorKind, RegistryError};
use serde::{Deserialize, Serialize};

/// One call into the chaincode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Contract name.
    pub contract: String,
    /// Function name within the contract.
    pub function: String,
    /// Positional string arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Invoking identity.
    pub caller: String,
}

impl Invocation {
    /// Build an invocation from borrowed arguments.
    pub fn new(contract: &str, function: &str, args: &[&str], caller: &str) -> Self {
        Self {
            contract: contract.to_string(),
            function: function.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            caller: caller.to_string(),
        }
    }
}

/// Outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvocationResponse {
    /// The operation succeeded and returned `payload`.
    Ok { payload: serde_json::Value },
    /// The operation failed; nothing was written.
    Error { kind: ErrorKind, message: String },
}

impl InvocationResponse {
    /// Returns true for a successful response.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Failure kind, if the invocation failed.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Ok { .. } => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }

    /// Success payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Ok { payload } => Some(payload),
            Self::Error { .. } => None,
        }
    }
}

impl From<RegistryError> for InvocationResponse {
    fn from(err: RegistryError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
