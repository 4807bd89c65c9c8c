//! # Collaborator Types

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Permission
// =============================================================================

/// A grant held by a collaborator on a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// May edit contract fields
    Edit,
    /// May view the contract
    View,
    /// May sign the contract
    Sign,
}

impl Permission {
    /// All permissions in canonical display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Edit, Self::Sign, Self::View]
    }

    /// Position in the canonical display order `[Edit, Sign, View]`.
    #[must_use]
    pub fn display_rank(self) -> u8 {
        match self {
            Self::Edit => 0,
            Self::Sign => 1,
            Self::View => 2,
        }
    }

    /// Label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::View => "View",
            Self::Sign => "Sign",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// ContractRole
// =============================================================================

/// Classification of a collaborator on a contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractRole {
    /// No special role
    #[default]
    Standard,
    /// Purchasing party
    Buyer,
    /// Selling party
    Seller,
    /// Agent representing the buyer
    BuyerAgent,
    /// Agent representing the seller
    SellerAgent,
    /// Agent handling closing
    ClosingAgent,
    /// Property inspector
    Inspector,
    /// Property appraiser
    Appraiser,
}

impl ContractRole {
    /// All roles in picker order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Standard,
            Self::Buyer,
            Self::Seller,
            Self::BuyerAgent,
            Self::SellerAgent,
            Self::ClosingAgent,
            Self::Inspector,
            Self::Appraiser,
        ]
    }

    /// Label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Buyer => "Buyer",
            Self::Seller => "Seller",
            Self::BuyerAgent => "Buyer Agent",
            Self::SellerAgent => "Seller Agent",
            Self::ClosingAgent => "Closing Agent",
            Self::Inspector => "Inspector",
            Self::Appraiser => "Appraiser",
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Collaborator
// =============================================================================

/// A named, emailed party attached to a contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Granted permissions, in the order they were granted
    pub permissions: Vec<Permission>,
    /// Role on the contract
    pub role: ContractRole,
}

impl Collaborator {
    /// Create a collaborator with the given grants.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
        role: ContractRole,
    ) -> Self {
        let mut collaborator = Self {
            name: name.into(),
            email: email.into(),
            permissions: Vec::new(),
            role,
        };
        for permission in permissions {
            collaborator.grant(permission);
        }
        collaborator
    }

    /// Whether name, email and at least one permission are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.permissions.is_empty()
    }

    /// Check for a permission.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Grant a permission. Granting twice is a no-op.
    pub fn grant(&mut self, permission: Permission) {
        if !self.has_permission(permission) {
            self.permissions.push(permission);
        }
    }

    /// Revoke a permission.
    pub fn revoke(&mut self, permission: Permission) {
        self.permissions.retain(|p| *p != permission);
    }

    /// Permissions sorted into canonical display order.
    ///
    /// Storage order is left untouched.
    #[must_use]
    pub fn display_permissions(&self) -> Vec<Permission> {
        let mut sorted = self.permissions.clone();
        sorted.sort_by_key(|p| p.display_rank());
        sorted
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Case-insensitive email comparison.
    #[must_use]
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }
}
