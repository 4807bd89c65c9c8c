//! Portable view types shared by console frontends.

pub mod wizards;

pub use wizards::{format_wizard_progress, wizard_progress_percent, CreateContractStep};
