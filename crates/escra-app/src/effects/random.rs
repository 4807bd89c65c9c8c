//! Random contract id handler for production use
//!
//! Draws ids uniformly from [1000, 9999]. Existing contracts are not
//! consulted, so two contracts may share an id.

use escra_core::effects::ContractIdEffects;
use escra_core::ContractId;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform contract id source.
#[derive(Debug)]
pub struct RandomContractIds {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for RandomContractIds {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomContractIds {
    /// Seed from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Deterministic sequence for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl ContractIdEffects for RandomContractIds {
    fn next_contract_id(&self) -> ContractId {
        let offset = self.rng.lock().gen_range(0..ContractId::SPAN);
        ContractId::from_offset(offset)
    }
}
