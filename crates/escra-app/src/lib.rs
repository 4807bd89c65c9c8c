//! Escra App - Headless Contract Intake
//!
//! Stateful logic behind the console's "create contract" flow, free of any
//! rendering concerns. Frontends drive [`WizardController`] with discrete
//! input and timer events and render from its accessors.
//!
//! # Layout
//!
//! - [`wizard`]: the five-step controller and submission
//! - [`collaborators`]: staged/committed collaborators and buyer/seller sets
//! - [`masked_input`]: progressive-reveal masking for bank numbers
//! - [`documents`]: pending document batch and raw file selection
//! - [`assembler`]: contract assembly and document materialization
//! - [`ledger`]: local contract list mirrored to persistence
//! - [`form`], [`errors`], [`views`]: form state, error routing, step metadata
//! - [`effects`]: tokio timers and random contract ids

#![allow(missing_docs)]
#![forbid(unsafe_code)]

pub mod assembler;
pub mod collaborators;
pub mod documents;
pub mod effects;
pub mod errors;
pub mod form;
pub mod ledger;
pub mod masked_input;
pub mod views;
pub mod wizard;

pub use assembler::{
    BankNumbers, ConfirmedDocument, ContractAssembler, ContractConfirmation, SubmissionIssue,
    SubmissionReport,
};
pub use collaborators::{AddOutcome, CollaboratorRegistry, DuplicateKind, PartySide};
pub use documents::{DocumentBatchBuilder, DocumentDraft, FileRejection, PendingDocument};
pub use errors::{ErrorCategory, ToastLevel, WizardError};
pub use form::{ContractForm, FieldErrors, FormField};
pub use ledger::ContractLedger;
pub use masked_input::{InputOutcome, MaskedDigitInput, MaskedFieldId, MaskedFieldKind};
pub use views::wizards::CreateContractStep;
pub use wizard::{Advance, ConsoleUser, WizardController, WizardEffects};
