//! # Contract Record

use crate::collaborator::Collaborator;
use crate::identifiers::{ContractId, DocumentId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract type catalogue offered by the intake wizard.
///
/// The wizard accepts any non-empty type; this list only feeds pickers.
pub const CONTRACT_TYPES: &[&str] = &[
    "Standard Agreement",
    "Residential – Cash",
    "Residential – Financed",
    "Commercial – Cash or Financed",
    "Assignment / Wholesale",
    "Installment / Lease-to-Own",
];

// =============================================================================
// ContractStatus
// =============================================================================

/// Lifecycle status of a contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Freshly created
    #[default]
    Initiation,
    /// Documents being prepared
    Preparation,
    /// Waiting on wire instructions
    WireDetails,
    /// Under review
    InReview,
    /// Collecting signatures
    Signatures,
    /// Funds released
    FundsDisbursed,
    /// Closed out
    Complete,
}

impl ContractStatus {
    /// All statuses in lifecycle order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Initiation,
            Self::Preparation,
            Self::WireDetails,
            Self::InReview,
            Self::Signatures,
            Self::FundsDisbursed,
            Self::Complete,
        ]
    }

    /// Label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Initiation => "Initiation",
            Self::Preparation => "Preparation",
            Self::WireDetails => "Wire Details",
            Self::InReview => "In Review",
            Self::Signatures => "Signatures",
            Self::FundsDisbursed => "Funds Disbursed",
            Self::Complete => "Complete",
        }
    }

    /// Parse a display label (case-insensitive).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// ContractDetails
// =============================================================================

/// Property, financial and banking details captured on the details step.
///
/// Routing and account numbers hold the real digits, never the masked display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDetails {
    pub value: String,
    pub closing_date: String,
    pub due_date: String,
    pub property_address: String,
    pub property_type: String,
    pub escrow_number: String,
    pub earnest_money: String,
    pub down_payment: String,
    pub loan_amount: String,
    pub interest_rate: String,
    pub loan_term: String,
    pub lender_name: String,
    pub buyer_financial_institution: String,
    pub seller_financial_institution: String,
    pub buyer_routing_number: String,
    pub seller_routing_number: String,
    pub buyer_account_number: String,
    pub seller_account_number: String,
    pub title_company: String,
    pub insurance_company: String,
    pub inspection_period: String,
    pub contingencies: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

// =============================================================================
// Contract
// =============================================================================

/// A contract as created by the intake wizard.
///
/// `collaborators` is the single source of truth for parties. `buyers` and
/// `sellers` hold collaborator names; names that no longer resolve to a
/// collaborator are ignored on read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub title: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub status: ContractStatus,
    pub milestone: String,
    pub notes: String,
    pub collaborators: Vec<Collaborator>,
    pub buyers: Vec<String>,
    pub sellers: Vec<String>,
    /// Top-level agent name from the details step
    pub agent: String,
    pub details: ContractDetails,
    pub document_ids: Vec<DocumentId>,
}

impl Contract {
    /// Resolve buyer names against the collaborator list.
    #[must_use]
    pub fn buyer_names(&self) -> Vec<&str> {
        self.resolve(&self.buyers)
    }

    /// Resolve seller names against the collaborator list.
    #[must_use]
    pub fn seller_names(&self) -> Vec<&str> {
        self.resolve(&self.sellers)
    }

    /// Display string of the top-level parties joined with `" & "`.
    ///
    /// Recomputed on every call; never stored.
    #[must_use]
    pub fn parties(&self) -> String {
        let buyer = self.buyer_names().join(", ");
        let seller = self.seller_names().join(", ");
        [buyer.as_str(), seller.as_str(), self.agent.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" & ")
    }

    /// Number of documents attached at creation.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }

    fn resolve<'a>(&'a self, names: &[String]) -> Vec<&'a str> {
        names
            .iter()
            .filter_map(|name| {
                self.collaborators
                    .iter()
                    .find(|c| c.name_matches(name))
                    .map(|c| c.name.as_str())
            })
            .collect()
    }
}
