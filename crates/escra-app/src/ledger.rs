//! Local contract ledger with a remote mirror.
//!
//! The ledger is the locally visible list of contracts. Each mutation is
//! applied locally first and then mirrored through [`ContractPersistence`].
//! Mirror failures are logged and returned; local state is never rolled back
//! and no retry is attempted.

use escra_core::effects::ContractPersistence;
use escra_core::{Contract, ContractId, EscraError};
use parking_lot::RwLock;
use std::sync::Arc;

/// Contracts known to this console.
pub struct ContractLedger {
    contracts: RwLock<Vec<Contract>>,
    persistence: Arc<dyn ContractPersistence>,
}

impl ContractLedger {
    pub fn new(persistence: Arc<dyn ContractPersistence>) -> Self {
        Self {
            contracts: RwLock::new(Vec::new()),
            persistence,
        }
    }

    /// Snapshot of every contract, newest first.
    #[must_use]
    pub fn contracts(&self) -> Vec<Contract> {
        self.contracts.read().clone()
    }

    #[must_use]
    pub fn get(&self, id: ContractId) -> Option<Contract> {
        self.contracts.read().iter().find(|c| c.id == id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.read().is_empty()
    }

    /// Insert locally, then mirror with a create call.
    ///
    /// Ids are not checked for collisions; a second contract with the same
    /// id is listed alongside the first.
    pub async fn insert(&self, contract: Contract) -> Result<(), EscraError> {
        self.contracts.write().insert(0, contract.clone());
        tracing::debug!(contract_id = %contract.id, "contract added to ledger");
        self.persistence
            .create_contract(&contract)
            .await
            .map_err(|error| {
                tracing::warn!(contract_id = %contract.id, %error, "contract create not mirrored; keeping local copy");
                error.into()
            })
    }

    /// Replace the first contract with a matching id, then mirror.
    pub async fn update(&self, contract: Contract) -> Result<(), EscraError> {
        {
            let mut contracts = self.contracts.write();
            let Some(slot) = contracts.iter_mut().find(|c| c.id == contract.id) else {
                return Err(EscraError::not_found(format!("contract {}", contract.id)));
            };
            *slot = contract.clone();
        }
        self.persistence
            .update_contract(&contract)
            .await
            .map_err(|error| {
                tracing::warn!(contract_id = %contract.id, %error, "contract update not mirrored; keeping local copy");
                error.into()
            })
    }

    /// Remove the first contract with a matching id, then mirror.
    pub async fn delete(&self, id: ContractId) -> Result<(), EscraError> {
        {
            let mut contracts = self.contracts.write();
            let Some(index) = contracts.iter().position(|c| c.id == id) else {
                return Err(EscraError::not_found(format!("contract {id}")));
            };
            contracts.remove(index);
        }
        self.persistence.delete_contract(id).await.map_err(|error| {
            tracing::warn!(contract_id = %id, %error, "contract delete not mirrored");
            error.into()
        })
    }
}

impl std::fmt::Debug for ContractLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractLedger")
            .field("contracts", &self.len())
            .finish_non_exhaustive()
    }
}
