//! Scripted contract id source

use escra_core::effects::ContractIdEffects;
use escra_core::ContractId;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Hands out scripted ids, then counts up from the last one.
#[derive(Debug)]
pub struct SequenceContractIds {
    script: Mutex<VecDeque<ContractId>>,
    next_offset: Mutex<u16>,
}

impl SequenceContractIds {
    /// Yield `ids` in order, then continue from the id after the last.
    ///
    /// Values outside [1000, 9999] are skipped.
    pub fn new(ids: impl IntoIterator<Item = u16>) -> Self {
        let script: VecDeque<ContractId> = ids.into_iter().filter_map(ContractId::new).collect();
        let next_offset = script
            .back()
            .map(|id| id.value() - ContractId::MIN + 1)
            .unwrap_or(0);
        Self {
            script: Mutex::new(script),
            next_offset: Mutex::new(next_offset),
        }
    }

    /// Count up from 1000.
    pub fn counting() -> Self {
        Self::new([])
    }
}

impl ContractIdEffects for SequenceContractIds {
    fn next_contract_id(&self) -> ContractId {
        if let Some(id) = self.script.lock().pop_front() {
            return id;
        }
        let mut offset = self.next_offset.lock();
        let id = ContractId::from_offset(*offset);
        *offset = (*offset + 1) % ContractId::SPAN;
        id
    }
}
