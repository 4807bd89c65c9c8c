//! Categorized wizard errors
//!
//! Provides structured error types that enable:
//! - Categorized error handling (input vs conflict vs storage)
//! - Appropriate toast severity routing
//! - Recovery hints for user-actionable errors
//!
//! Document-creation and persistence failures never surface here as `Err`.
//! They are logged and reported through the submission outcome instead.

use crate::collaborators::DuplicateKind;
use crate::form::FormField;
use crate::views::wizards::CreateContractStep;
use escra_core::EscraError;
use std::fmt;

// ============================================================================
// Toast Severity
// ============================================================================

/// Severity a frontend should use when surfacing a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

// ============================================================================
// Error Categories
// ============================================================================

/// High-level error categories for frontend error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or malformed input (correctable by user)
    Input,
    /// Clashes with existing state, such as a duplicate collaborator
    Conflict,
    /// Document store failures
    Storage,
    /// Remote persistence failures (often transient)
    Network,
    /// Misuse of the wizard lifecycle
    Internal,
}

impl ErrorCategory {
    /// Check if this error category is user-correctable.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input | Self::Conflict)
    }

    /// Get the appropriate toast severity for this category.
    #[must_use]
    pub fn toast_severity(&self) -> ToastLevel {
        match self {
            Self::Input => ToastLevel::Info,
            Self::Conflict => ToastLevel::Warning,
            Self::Storage => ToastLevel::Error,
            Self::Network => ToastLevel::Warning,
            Self::Internal => ToastLevel::Error,
        }
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Conflict => "Conflict",
            Self::Storage => "Storage",
            Self::Network => "Network",
            Self::Internal => "Internal",
        }
    }

    /// Get a hint for the user on how to resolve this category of error.
    #[must_use]
    pub fn resolution_hint(&self) -> &'static str {
        match self {
            Self::Input => "Fill in the highlighted fields and try again",
            Self::Conflict => "Use a different name or email",
            Self::Storage => "The document could not be saved",
            Self::Network => "Changes are kept locally; check your connection",
            Self::Internal => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<&EscraError> for ErrorCategory {
    fn from(err: &EscraError) -> Self {
        match err {
            EscraError::Invalid { .. } | EscraError::NotFound { .. } => Self::Input,
            EscraError::Storage { .. } => Self::Storage,
            EscraError::Network { .. } => Self::Network,
            EscraError::Internal { .. } => Self::Internal,
        }
    }
}

// ============================================================================
// Wizard Errors
// ============================================================================

/// Errors returned by wizard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// The current step's validator failed; the step is unchanged.
    #[error("{step:?} step is incomplete: {}", join_fields(.fields))]
    Validation {
        step: CreateContractStep,
        fields: Vec<FormField>,
    },

    /// A collaborator with the same name and/or email is already committed.
    #[error("A collaborator with this {0} already exists")]
    DuplicateCollaborator(DuplicateKind),

    /// The wizard is on the confirmation step and only accepts close.
    #[error("Contract already submitted; close the wizard to start over")]
    Terminal,

    /// The wizard has not been opened.
    #[error("Wizard is not open")]
    NotOpen,
}

impl WizardError {
    /// Build a validation error for a step.
    pub fn validation(step: CreateContractStep, fields: impl Into<Vec<FormField>>) -> Self {
        Self::Validation {
            step,
            fields: fields.into(),
        }
    }

    /// Category used for toast routing.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Input,
            Self::DuplicateCollaborator(_) => ErrorCategory::Conflict,
            Self::Terminal | Self::NotOpen => ErrorCategory::Internal,
        }
    }

    /// Fields to highlight, if any.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
