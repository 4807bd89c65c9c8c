//! # Wizard Step Types
//!
//! Portable wizard step enum and navigation helpers for the create-contract
//! workflow. These types define the logical steps without UI-specific state.

use serde::{Deserialize, Serialize};

// ============================================================================
// Create Contract Wizard
// ============================================================================

/// Steps in the create contract wizard.
///
/// This defines the logical flow for creating a new contract:
/// 1. General - Title, type, milestone template and notes
/// 2. Collaborators - Add parties, permissions and buyer/seller roles
/// 3. Details - Property, financial and banking details
/// 4. Documents - Attach documents (optional); leaving this step submits
/// 5. Confirmation - Created contract and documents (terminal)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreateContractStep {
    /// Enter title and type
    #[default]
    General,
    /// Manage collaborators
    Collaborators,
    /// Enter contract details
    Details,
    /// Attach documents
    Documents,
    /// Submission summary
    Confirmation,
}

impl CreateContractStep {
    /// Get all steps in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::General,
            Self::Collaborators,
            Self::Details,
            Self::Documents,
            Self::Confirmation,
        ]
    }

    /// Get the next step, or None if at the last step.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::General => Some(Self::Collaborators),
            Self::Collaborators => Some(Self::Details),
            Self::Details => Some(Self::Documents),
            Self::Documents => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// Get the previous step, or None if at the first step.
    ///
    /// Confirmation has no previous step: it is left only by closing.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        match self {
            Self::General => None,
            Self::Collaborators => Some(Self::General),
            Self::Details => Some(Self::Collaborators),
            Self::Documents => Some(Self::Details),
            Self::Confirmation => None,
        }
    }

    /// Check if this is the first step.
    #[must_use]
    pub fn is_first(self) -> bool {
        self == Self::General
    }

    /// Check if this is the terminal step.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Confirmation
    }

    /// Get step number (1-indexed for display).
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::General => 1,
            Self::Collaborators => 2,
            Self::Details => 3,
            Self::Documents => 4,
            Self::Confirmation => 5,
        }
    }

    /// Look up a step by its 1-indexed number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.number() == number)
    }

    /// Get total number of steps.
    #[must_use]
    pub fn total_steps() -> u8 {
        5
    }

    /// Get step title for display.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Collaborators => "Collaborators",
            Self::Details => "Details",
            Self::Documents => "Documents",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Get step description for display.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::General => "Name the contract and choose its type",
            Self::Collaborators => "Add the people who will edit, view or sign",
            Self::Details => "Enter property, financial and wire details",
            Self::Documents => "Attach documents to the contract (optional)",
            Self::Confirmation => "Review the created contract and documents",
        }
    }
}

// ============================================================================
// Progress Helpers
// ============================================================================

/// Format wizard progress as "Step N of M".
///
/// # Example
/// ```rust
/// use escra_app::views::wizards::format_wizard_progress;
///
/// assert_eq!(format_wizard_progress(2, 5), "Step 2 of 5");
/// ```
#[must_use]
pub fn format_wizard_progress(current: u8, total: u8) -> String {
    format!("Step {current} of {total}")
}

/// Calculate progress percentage.
///
/// # Example
/// ```rust
/// use escra_app::views::wizards::wizard_progress_percent;
///
/// assert_eq!(wizard_progress_percent(1, 5), 20);
/// assert_eq!(wizard_progress_percent(5, 5), 100);
/// ```
#[must_use]
pub fn wizard_progress_percent(current: u8, total: u8) -> u8 {
    if total == 0 {
        return 0;
    }
    ((u16::from(current) * 100) / u16::from(total)).min(100) as u8
}
