//! Contract id generation interface.

use crate::identifiers::ContractId;
use std::sync::Arc;

/// Source of contract ids.
///
/// Implementations draw from `[ContractId::MIN, ContractId::MAX]` and make no
/// attempt to avoid ids already in use.
pub trait ContractIdEffects: Send + Sync {
    /// Produce the id for a new contract.
    fn next_contract_id(&self) -> ContractId;
}

impl<T: ContractIdEffects + ?Sized> ContractIdEffects for Arc<T> {
    fn next_contract_id(&self) -> ContractId {
        (**self).next_contract_id()
    }
}
