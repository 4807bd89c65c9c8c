//! Contract persistence interface.
//!
//! Durability only: all business validation happens before these calls.

use crate::contract::Contract;
use crate::identifiers::ContractId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for contract persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum PersistenceError {
    #[error("Persistence rejected contract {id}: {message}")]
    Rejected { id: ContractId, message: String },
    #[error("Persistence transport failed: {reason}")]
    Transport { reason: String },
}

impl From<PersistenceError> for crate::EscraError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Rejected { .. } => crate::EscraError::invalid(err.to_string()),
            PersistenceError::Transport { reason } => crate::EscraError::network(reason),
        }
    }
}

/// Remote mirror for contract records.
#[async_trait]
pub trait ContractPersistence: Send + Sync {
    /// Create a contract record.
    async fn create_contract(&self, contract: &Contract) -> Result<(), PersistenceError>;

    /// Replace a contract record.
    async fn update_contract(&self, contract: &Contract) -> Result<(), PersistenceError>;

    /// Delete a contract record.
    async fn delete_contract(&self, id: ContractId) -> Result<(), PersistenceError>;
}
