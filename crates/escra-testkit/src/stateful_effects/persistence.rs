//! Recording contract persistence for testing

use async_trait::async_trait;
use escra_core::effects::{ContractPersistence, PersistenceError};
use escra_core::{Contract, ContractId};
use parking_lot::Mutex;
use std::sync::Arc;

/// A persistence call as observed by [`RecordingPersistence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceCall {
    Create(Contract),
    Update(Contract),
    Delete(ContractId),
}

/// Records every call; optionally fails them all with a transport error.
#[derive(Debug, Clone, Default)]
pub struct RecordingPersistence {
    calls: Arc<Mutex<Vec<PersistenceCall>>>,
    offline: Arc<Mutex<bool>>,
}

impl RecordingPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call while set.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    /// Calls in order, including failed ones.
    pub fn calls(&self) -> Vec<PersistenceCall> {
        self.calls.lock().clone()
    }

    /// Contracts passed to `create_contract`.
    pub fn created(&self) -> Vec<Contract> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                PersistenceCall::Create(contract) => Some(contract.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PersistenceCall) -> Result<(), PersistenceError> {
        self.calls.lock().push(call);
        if *self.offline.lock() {
            return Err(PersistenceError::Transport {
                reason: "persistence offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContractPersistence for RecordingPersistence {
    async fn create_contract(&self, contract: &Contract) -> Result<(), PersistenceError> {
        self.record(PersistenceCall::Create(contract.clone()))
    }

    async fn update_contract(&self, contract: &Contract) -> Result<(), PersistenceError> {
        self.record(PersistenceCall::Update(contract.clone()))
    }

    async fn delete_contract(&self, id: ContractId) -> Result<(), PersistenceError> {
        self.record(PersistenceCall::Delete(id))
    }
}
