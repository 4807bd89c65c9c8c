//! # Contract Form State
//!
//! Text fields edited across the general and details steps, plus the
//! per-field error flags the wizard raises when a step fails validation.
//!
//! Errors are plain flags: a field is either marked or not. Editing a field
//! clears its flag, and nothing here is ever fatal.
//!
//! Masked bank fields and the collaborator/document sub-forms live in their
//! own components; they share [`FormField`] only so that one error set can
//! describe every highlighted input.

use escra_core::ContractDetails;
use std::collections::BTreeSet;
use std::fmt;

/// Every input that can carry a validation flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    // General step
    Title,
    ContractType,
    Milestone,
    Notes,

    // Details step
    Agent,
    Value,
    ClosingDate,
    DueDate,
    PropertyAddress,
    PropertyType,
    EscrowNumber,
    EarnestMoney,
    DownPayment,
    LoanAmount,
    InterestRate,
    LoanTerm,
    LenderName,
    BuyerFinancialInstitution,
    SellerFinancialInstitution,
    TitleCompany,
    InsuranceCompany,
    InspectionPeriod,
    Contingencies,
    City,
    State,
    ZipCode,
    Country,

    // Collaborator staging entry
    CollaboratorName,
    CollaboratorEmail,
    CollaboratorPermissions,

    // Document staging entry
    DocumentFile,
    DocumentName,
    DocumentType,
    DocumentAssignee,
}

impl FormField {
    /// Label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::ContractType => "Type",
            Self::Milestone => "Milestone",
            Self::Notes => "Notes",
            Self::Agent => "Agent",
            Self::Value => "Value",
            Self::ClosingDate => "Closing Date",
            Self::DueDate => "Due Date",
            Self::PropertyAddress => "Property Address",
            Self::PropertyType => "Property Type",
            Self::EscrowNumber => "Escrow Number",
            Self::EarnestMoney => "Earnest Money",
            Self::DownPayment => "Down Payment",
            Self::LoanAmount => "Loan Amount",
            Self::InterestRate => "Interest Rate",
            Self::LoanTerm => "Loan Term",
            Self::LenderName => "Lender Name",
            Self::BuyerFinancialInstitution => "Buyer Financial Institution",
            Self::SellerFinancialInstitution => "Seller Financial Institution",
            Self::TitleCompany => "Title Company",
            Self::InsuranceCompany => "Insurance Company",
            Self::InspectionPeriod => "Inspection Period",
            Self::Contingencies => "Contingencies",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "Zip Code",
            Self::Country => "Country",
            Self::CollaboratorName => "Collaborator Name",
            Self::CollaboratorEmail => "Collaborator Email",
            Self::CollaboratorPermissions => "Permissions",
            Self::DocumentFile => "File",
            Self::DocumentName => "Document Name",
            Self::DocumentType => "Document Type",
            Self::DocumentAssignee => "Assignee",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Field Errors
// ============================================================================

/// Set of flagged fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    flagged: BTreeSet<FormField>,
}

impl FieldErrors {
    /// Flag a field.
    pub fn mark(&mut self, field: FormField) {
        self.flagged.insert(field);
    }

    /// Flag several fields.
    pub fn mark_all(&mut self, fields: impl IntoIterator<Item = FormField>) {
        self.flagged.extend(fields);
    }

    /// Clear a field's flag. Called on every edit of that field.
    pub fn clear(&mut self, field: FormField) {
        self.flagged.remove(&field);
    }

    /// Clear every flag.
    pub fn clear_all(&mut self) {
        self.flagged.clear();
    }

    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.flagged.contains(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    /// Flagged fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = FormField> + '_ {
        self.flagged.iter().copied()
    }
}

// ============================================================================
// Contract Form
// ============================================================================

/// Free-text values of the general and details steps.
///
/// Routing and account numbers are absent; they come from the masked inputs
/// when the contract is assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractForm {
    pub title: String,
    pub contract_type: String,
    pub milestone: String,
    pub notes: String,
    pub agent: String,
    pub details: ContractDetails,
}

impl ContractForm {
    /// Current value of a field.
    ///
    /// Collaborator and document staging fields are not held here and read
    /// as empty.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match self.slot(field) {
            Some(slot) => slot,
            None => "",
        }
    }

    /// Overwrite a field. Returns false for fields this form does not hold.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Fields of the general step that are empty.
    #[must_use]
    pub fn missing_general(&self) -> Vec<FormField> {
        [FormField::Title, FormField::ContractType]
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Details fields required at submission that are empty.
    #[must_use]
    pub fn missing_required_details(&self) -> Vec<FormField> {
        [FormField::Value, FormField::DueDate, FormField::TitleCompany]
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    fn slot(&self, field: FormField) -> Option<&String> {
        let d = &self.details;
        Some(match field {
            FormField::Title => &self.title,
            FormField::ContractType => &self.contract_type,
            FormField::Milestone => &self.milestone,
            FormField::Notes => &self.notes,
            FormField::Agent => &self.agent,
            FormField::Value => &d.value,
            FormField::ClosingDate => &d.closing_date,
            FormField::DueDate => &d.due_date,
            FormField::PropertyAddress => &d.property_address,
            FormField::PropertyType => &d.property_type,
            FormField::EscrowNumber => &d.escrow_number,
            FormField::EarnestMoney => &d.earnest_money,
            FormField::DownPayment => &d.down_payment,
            FormField::LoanAmount => &d.loan_amount,
            FormField::InterestRate => &d.interest_rate,
            FormField::LoanTerm => &d.loan_term,
            FormField::LenderName => &d.lender_name,
            FormField::BuyerFinancialInstitution => &d.buyer_financial_institution,
            FormField::SellerFinancialInstitution => &d.seller_financial_institution,
            FormField::TitleCompany => &d.title_company,
            FormField::InsuranceCompany => &d.insurance_company,
            FormField::InspectionPeriod => &d.inspection_period,
            FormField::Contingencies => &d.contingencies,
            FormField::City => &d.city,
            FormField::State => &d.state,
            FormField::ZipCode => &d.zip_code,
            FormField::Country => &d.country,
            FormField::CollaboratorName
            | FormField::CollaboratorEmail
            | FormField::CollaboratorPermissions
            | FormField::DocumentFile
            | FormField::DocumentName
            | FormField::DocumentType
            | FormField::DocumentAssignee => return None,
        })
    }

    fn slot_mut(&mut self, field: FormField) -> Option<&mut String> {
        let d = &mut self.details;
        Some(match field {
            FormField::Title => &mut self.title,
            FormField::ContractType => &mut self.contract_type,
            FormField::Milestone => &mut self.milestone,
            FormField::Notes => &mut self.notes,
            FormField::Agent => &mut self.agent,
            FormField::Value => &mut d.value,
            FormField::ClosingDate => &mut d.closing_date,
            FormField::DueDate => &mut d.due_date,
            FormField::PropertyAddress => &mut d.property_address,
            FormField::PropertyType => &mut d.property_type,
            FormField::EscrowNumber => &mut d.escrow_number,
            FormField::EarnestMoney => &mut d.earnest_money,
            FormField::DownPayment => &mut d.down_payment,
            FormField::LoanAmount => &mut d.loan_amount,
            FormField::InterestRate => &mut d.interest_rate,
            FormField::LoanTerm => &mut d.loan_term,
            FormField::LenderName => &mut d.lender_name,
            FormField::BuyerFinancialInstitution => &mut d.buyer_financial_institution,
            FormField::SellerFinancialInstitution => &mut d.seller_financial_institution,
            FormField::TitleCompany => &mut d.title_company,
            FormField::InsuranceCompany => &mut d.insurance_company,
            FormField::InspectionPeriod => &mut d.inspection_period,
            FormField::Contingencies => &mut d.contingencies,
            FormField::City => &mut d.city,
            FormField::State => &mut d.state,
            FormField::ZipCode => &mut d.zip_code,
            FormField::Country => &mut d.country,
            FormField::CollaboratorName
            | FormField::CollaboratorEmail
            | FormField::CollaboratorPermissions
            | FormField::DocumentFile
            | FormField::DocumentName
            | FormField::DocumentType
            | FormField::DocumentAssignee => return None,
        })
    }
}

// ============================================================================
// Email Format
// ============================================================================

/// Check the `local@domain.tld` shape.
///
/// Only the shape is checked; deliverability is not.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !host.starts_with('.') && !host.ends_with('.')
}
