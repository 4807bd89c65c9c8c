//! Escra Core - Contract Console Foundation
//!
//! This crate provides the domain types and effect interfaces shared by the
//! contract console. It contains no runtime wiring and no application logic.
//!
//! # Layout
//!
//! ## Domain Types
//! - [`Contract`], [`ContractStatus`], [`CONTRACT_TYPES`]: the contract record
//! - [`Collaborator`], [`Permission`], [`ContractRole`]: parties and their grants
//! - [`FileRef`], [`StoredDocument`]: document metadata handed to the store
//! - [`ContractId`], [`DocumentId`]: identifiers
//!
//! ## Effect Interfaces (Pure Signatures)
//! - [`effects::TimerEffects`]: cancellable scheduled callbacks
//! - [`effects::ContractIdEffects`]: contract id generation
//! - [`effects::DocumentStore`], [`effects::AssigneeDirectory`],
//!   [`effects::ContractPersistence`]: external collaborators
//!
//! ## Configuration
//! - [`ConsoleConfig`]: TOML-loadable console settings

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Collaborators, permissions and contract roles
pub mod collaborator;

/// Console configuration
pub mod config;

/// Contract record and catalogues
pub mod contract;

/// Document metadata
pub mod document;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Contract and document identifiers
pub mod identifiers;

pub use collaborator::{Collaborator, ContractRole, Permission};
pub use config::{ConfigError, ConsoleConfig};
pub use contract::{Contract, ContractDetails, ContractStatus, CONTRACT_TYPES};
pub use document::{FileRef, StoredDocument};
pub use errors::EscraError;
pub use identifiers::{ContractId, DocumentId};
