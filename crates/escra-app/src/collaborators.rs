//! # Collaborator Registry
//!
//! One editable staging entry plus the committed collaborator list, the
//! buyer and seller role sets, and the "only signer" toggle.
//!
//! Invariants held at every mutation:
//! - no two committed collaborators share a name or an email
//!   (case-insensitive),
//! - a name is in at most one of the buyer and seller sets,
//! - role sets only name committed collaborators.

use crate::form::{is_valid_email, FormField};
use escra_core::{Collaborator, ContractRole, Permission};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Outcomes
// ============================================================================

/// Which identity fields collided with a committed collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicateKind {
    Name,
    Email,
    Both,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Both => "name and email",
        })
    }
}

/// Result of a successful `add` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// Staging was committed at this index
    Added(usize),
    /// Staging is missing a name, email or permission; nothing changed
    Incomplete,
}

/// The role set a name is assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartySide {
    Buyer,
    Seller,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SoloSigner {
    email: String,
    auto_added: bool,
}

// ============================================================================
// Registry
// ============================================================================

/// Staged and committed collaborators.
#[derive(Clone, Debug, Default)]
pub struct CollaboratorRegistry {
    staging: Collaborator,
    committed: Vec<Collaborator>,
    buyers: Vec<String>,
    sellers: Vec<String>,
    duplicate: Option<DuplicateKind>,
    email_flagged: bool,
    solo: Option<SoloSigner>,
}

impl CollaboratorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---- accessors ---------------------------------------------------------

    #[must_use]
    pub fn staging(&self) -> &Collaborator {
        &self.staging
    }

    #[must_use]
    pub fn committed(&self) -> &[Collaborator] {
        &self.committed
    }

    /// Explicitly selected buyer names.
    #[must_use]
    pub fn buyers(&self) -> &[String] {
        &self.buyers
    }

    /// Explicitly selected seller names.
    #[must_use]
    pub fn sellers(&self) -> &[String] {
        &self.sellers
    }

    /// Classification of the last rejected `add`, until the next edit.
    #[must_use]
    pub fn duplicate_error(&self) -> Option<DuplicateKind> {
        self.duplicate
    }

    /// Whether the last committed staging email had a malformed shape.
    #[must_use]
    pub fn email_flagged(&self) -> bool {
        self.email_flagged
    }

    /// Whether "I am the only signer" is on.
    #[must_use]
    pub fn is_only_signer(&self) -> bool {
        self.solo.is_some()
    }

    /// Permissions of a committed entry in display order.
    #[must_use]
    pub fn display_permissions(&self, index: usize) -> Option<Vec<Permission>> {
        self.committed.get(index).map(Collaborator::display_permissions)
    }

    // ---- staging edits -----------------------------------------------------

    pub fn set_staging_name(&mut self, name: impl Into<String>) {
        self.staging.name = name.into();
        self.clear_flags();
    }

    pub fn set_staging_email(&mut self, email: impl Into<String>) {
        self.staging.email = email.into();
        self.clear_flags();
    }

    pub fn set_staging_role(&mut self, role: ContractRole) {
        self.staging.role = role;
        self.clear_flags();
    }

    /// Grant or revoke a permission on the staging entry.
    pub fn set_staging_permission(&mut self, permission: Permission, granted: bool) {
        if granted {
            self.staging.grant(permission);
        } else {
            self.staging.revoke(permission);
        }
        self.clear_flags();
    }

    pub fn toggle_staging_permission(&mut self, permission: Permission) {
        let granted = !self.staging.has_permission(permission);
        self.set_staging_permission(permission, granted);
    }

    /// Drop the duplicate error and the malformed-email flag.
    pub fn clear_flags(&mut self) {
        self.duplicate = None;
        self.email_flagged = false;
    }

    /// Staging fields that are still empty.
    #[must_use]
    pub fn missing_staging_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.staging.name.trim().is_empty() {
            missing.push(FormField::CollaboratorName);
        }
        if self.staging.email.trim().is_empty() {
            missing.push(FormField::CollaboratorEmail);
        }
        if self.staging.permissions.is_empty() {
            missing.push(FormField::CollaboratorPermissions);
        }
        missing
    }

    // ---- commit / remove ---------------------------------------------------

    /// Commit the staging entry.
    ///
    /// An incomplete entry is a silent no-op. A name or email collision
    /// leaves both staging and the committed list untouched.
    pub fn add(&mut self) -> Result<AddOutcome, DuplicateKind> {
        if !self.staging.is_complete() {
            return Ok(AddOutcome::Incomplete);
        }
        if let Some(kind) = self.find_duplicate(&self.staging) {
            tracing::debug!(%kind, "collaborator rejected as duplicate");
            self.duplicate = Some(kind);
            return Err(kind);
        }

        let mut entry = std::mem::take(&mut self.staging);
        entry.name = entry.name.trim().to_string();
        entry.email = entry.email.trim().to_string();
        self.email_flagged = !is_valid_email(&entry.email);
        self.duplicate = None;

        self.committed.push(entry);
        let index = self.committed.len() - 1;
        tracing::debug!(index, "collaborator committed");
        Ok(AddOutcome::Added(index))
    }

    /// Commit a complete staging entry when nothing is committed yet.
    ///
    /// Returns true when an entry was committed.
    pub fn commit_staging_if_alone(&mut self) -> bool {
        self.committed.is_empty() && matches!(self.add(), Ok(AddOutcome::Added(_)))
    }

    /// Remove a committed entry.
    ///
    /// Its name leaves both role sets, and the only-signer toggle switches
    /// off when the entry is the one the toggle auto-added.
    pub fn remove(&mut self, index: usize) -> Option<Collaborator> {
        if index >= self.committed.len() {
            return None;
        }
        let removed = self.committed.remove(index);
        self.buyers.retain(|n| !removed.name_matches(n));
        self.sellers.retain(|n| !removed.name_matches(n));
        if self
            .solo
            .as_ref()
            .is_some_and(|solo| solo.auto_added && removed.email_matches(&solo.email))
        {
            self.solo = None;
        }
        tracing::debug!(index, "collaborator removed");
        Some(removed)
    }

    fn find_duplicate(&self, candidate: &Collaborator) -> Option<DuplicateKind> {
        let name = self.committed.iter().any(|c| c.name_matches(&candidate.name));
        let email = self
            .committed
            .iter()
            .any(|c| c.email_matches(&candidate.email));
        match (name, email) {
            (true, true) => Some(DuplicateKind::Both),
            (true, false) => Some(DuplicateKind::Name),
            (false, true) => Some(DuplicateKind::Email),
            (false, false) => None,
        }
    }

    // ---- only signer -------------------------------------------------------

    /// Switch "I am the only signer" on or off for `user`.
    ///
    /// On: `user` is committed with every permission unless an entry with
    /// that email exists. Off: an entry added by the toggle is removed.
    /// Returns true when the toggle state changed.
    pub fn set_only_signer(&mut self, user: &Collaborator, on: bool) -> bool {
        match (on, self.solo.is_some()) {
            (true, false) => {
                let exists = self.committed.iter().any(|c| c.email_matches(&user.email));
                let name_taken = self.committed.iter().any(|c| c.name_matches(&user.name));
                let auto_added = !exists && !name_taken;
                if auto_added {
                    self.committed.push(Collaborator::new(
                        user.name.trim(),
                        user.email.trim(),
                        Permission::all().iter().copied(),
                        user.role,
                    ));
                }
                self.solo = Some(SoloSigner {
                    email: user.email.trim().to_string(),
                    auto_added,
                });
                true
            }
            (false, true) => {
                if let Some(solo) = self.solo.take() {
                    if solo.auto_added {
                        if let Some(index) =
                            self.committed.iter().position(|c| c.email_matches(&solo.email))
                        {
                            let removed = self.committed.remove(index);
                            self.buyers.retain(|n| !removed.name_matches(n));
                            self.sellers.retain(|n| !removed.name_matches(n));
                        }
                    }
                }
                true
            }
            _ => false,
        }
    }

    // ---- role sets ---------------------------------------------------------

    /// Put `name` into one role set, evicting it from the other.
    ///
    /// Returns false when no committed collaborator has that name.
    pub fn select(&mut self, side: PartySide, name: &str) -> bool {
        let Some(canonical) = self.canonical_name(name) else {
            return false;
        };
        let (into, other) = self.sets_mut(side);
        other.retain(|n| !n.eq_ignore_ascii_case(&canonical));
        if !into.iter().any(|n| n.eq_ignore_ascii_case(&canonical)) {
            into.push(canonical);
        }
        true
    }

    /// Take `name` out of a role set.
    pub fn deselect(&mut self, side: PartySide, name: &str) {
        let (from, _) = self.sets_mut(side);
        from.retain(|n| !n.trim().eq_ignore_ascii_case(name.trim()));
    }

    /// Select if absent, deselect if present.
    pub fn toggle(&mut self, side: PartySide, name: &str) -> bool {
        let present = match side {
            PartySide::Buyer => &self.buyers,
            PartySide::Seller => &self.sellers,
        }
        .iter()
        .any(|n| n.trim().eq_ignore_ascii_case(name.trim()));
        if present {
            self.deselect(side, name);
            true
        } else {
            self.select(side, name)
        }
    }

    pub fn select_buyer(&mut self, name: &str) -> bool {
        self.select(PartySide::Buyer, name)
    }

    pub fn select_seller(&mut self, name: &str) -> bool {
        self.select(PartySide::Seller, name)
    }

    pub fn toggle_buyer(&mut self, name: &str) -> bool {
        self.toggle(PartySide::Buyer, name)
    }

    pub fn toggle_seller(&mut self, name: &str) -> bool {
        self.toggle(PartySide::Seller, name)
    }

    /// Buyer names used at submission.
    ///
    /// The explicit set when non-empty, otherwise the first committed
    /// collaborator unless it was explicitly chosen as a seller.
    #[must_use]
    pub fn effective_buyers(&self) -> Vec<String> {
        if !self.buyers.is_empty() {
            return self.buyers.clone();
        }
        self.committed
            .first()
            .filter(|c| !self.sellers.iter().any(|s| c.name_matches(s)))
            .map(|c| vec![c.name.clone()])
            .unwrap_or_default()
    }

    /// Seller names used at submission.
    ///
    /// The explicit set when non-empty, otherwise the second committed
    /// collaborator unless it is already an effective buyer.
    #[must_use]
    pub fn effective_sellers(&self) -> Vec<String> {
        if !self.sellers.is_empty() {
            return self.sellers.clone();
        }
        let buyers = self.effective_buyers();
        self.committed
            .get(1)
            .filter(|c| !buyers.iter().any(|b| c.name_matches(b)))
            .map(|c| vec![c.name.clone()])
            .unwrap_or_default()
    }

    /// Drop every entry, selection and flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn canonical_name(&self, name: &str) -> Option<String> {
        self.committed
            .iter()
            .find(|c| c.name_matches(name))
            .map(|c| c.name.clone())
    }

    fn sets_mut(&mut self, side: PartySide) -> (&mut Vec<String>, &mut Vec<String>) {
        match side {
            PartySide::Buyer => (&mut self.buyers, &mut self.sellers),
            PartySide::Seller => (&mut self.sellers, &mut self.buyers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn stage(registry: &mut CollaboratorRegistry, name: &str, email: &str) {
        registry.set_staging_name(name);
        registry.set_staging_email(email);
        registry.set_staging_permission(Permission::Sign, true);
    }

    fn registry_with(names: &[&str]) -> CollaboratorRegistry {
        let mut registry = CollaboratorRegistry::new();
        for name in names {
            stage(&mut registry, name, &format!("{}@example.com", name.to_lowercase()));
            registry.add().unwrap();
        }
        registry
    }

    #[test]
    fn test_incomplete_staging_is_noop() {
        let mut registry = CollaboratorRegistry::new();
        registry.set_staging_name("Ana");
        assert_eq!(registry.add(), Ok(AddOutcome::Incomplete));
        assert!(registry.committed().is_empty());
        assert_eq!(registry.staging().name, "Ana");
        assert_eq!(
            registry.missing_staging_fields(),
            vec![FormField::CollaboratorEmail, FormField::CollaboratorPermissions]
        );
    }

    #[test]
    fn test_add_clears_staging() {
        let mut registry = CollaboratorRegistry::new();
        stage(&mut registry, " Ana ", "ana@example.com");
        assert_eq!(registry.add(), Ok(AddOutcome::Added(0)));
        assert_eq!(registry.committed()[0].name, "Ana");
        assert_eq!(registry.staging(), &Collaborator::default());
    }

    #[test]
    fn test_duplicate_classification() {
        let mut registry = registry_with(&["Ana"]);

        stage(&mut registry, "ANA", "other@example.com");
        assert_eq!(registry.add(), Err(DuplicateKind::Name));

        stage(&mut registry, "Zoe", "Ana@Example.com");
        assert_eq!(registry.add(), Err(DuplicateKind::Email));

        stage(&mut registry, "ana", "ANA@example.com");
        assert_eq!(registry.add(), Err(DuplicateKind::Both));
        assert_eq!(registry.duplicate_error(), Some(DuplicateKind::Both));
        assert_eq!(registry.committed().len(), 1);
        assert_eq!(registry.staging().name, "ana");
    }

    #[test]
    fn test_duplicate_error_cleared_on_edit() {
        let mut registry = registry_with(&["Ana"]);
        stage(&mut registry, "Ana", "ana@example.com");
        assert!(registry.add().is_err());
        registry.set_staging_name("Anabel");
        assert_eq!(registry.duplicate_error(), None);
    }

    #[test]
    fn test_malformed_email_flag_is_non_blocking() {
        let mut registry = CollaboratorRegistry::new();
        stage(&mut registry, "Ana", "ana-at-example");
        assert_matches!(registry.add(), Ok(AddOutcome::Added(0)));
        assert!(registry.email_flagged());
        registry.set_staging_name("Ben");
        assert!(!registry.email_flagged());
    }

    #[test]
    fn test_display_permissions_canonical_order() {
        let mut registry = CollaboratorRegistry::new();
        registry.set_staging_name("Ana");
        registry.set_staging_email("ana@example.com");
        registry.toggle_staging_permission(Permission::View);
        registry.toggle_staging_permission(Permission::Sign);
        registry.toggle_staging_permission(Permission::Edit);
        registry.add().unwrap();
        assert_eq!(
            registry.display_permissions(0),
            Some(vec![Permission::Edit, Permission::Sign, Permission::View])
        );
        assert_eq!(
            registry.committed()[0].permissions,
            vec![Permission::View, Permission::Sign, Permission::Edit]
        );
    }

    #[test]
    fn test_select_evicts_from_other_set() {
        let mut registry = registry_with(&["Ana", "Ben"]);
        assert!(registry.select_buyer("ana"));
        assert_eq!(registry.buyers(), ["Ana".to_string()]);
        assert!(registry.select_seller("Ana"));
        assert!(registry.buyers().is_empty());
        assert_eq!(registry.sellers(), ["Ana".to_string()]);
        assert!(!registry.select_buyer("Nobody"));
    }

    #[test]
    fn test_toggle_removes_when_present() {
        let mut registry = registry_with(&["Ana"]);
        registry.toggle_buyer("Ana");
        registry.toggle_buyer("ANA");
        assert!(registry.buyers().is_empty());
    }

    #[test]
    fn test_remove_drops_role_names() {
        let mut registry = registry_with(&["Ana", "Ben"]);
        registry.select_buyer("Ana");
        registry.select_seller("Ben");
        let removed = registry.remove(0).unwrap();
        assert_eq!(removed.name, "Ana");
        assert!(registry.buyers().is_empty());
        assert_eq!(registry.sellers(), ["Ben".to_string()]);
        assert!(registry.remove(5).is_none());
    }

    #[test]
    fn test_default_roles_by_position() {
        let registry = registry_with(&["Ana", "Ben", "Cara"]);
        assert_eq!(registry.effective_buyers(), vec!["Ana".to_string()]);
        assert_eq!(registry.effective_sellers(), vec!["Ben".to_string()]);
    }

    #[test]
    fn test_default_seller_skips_explicit_buyer() {
        let mut registry = registry_with(&["Ana", "Ben"]);
        registry.select_buyer("Ben");
        assert_eq!(registry.effective_buyers(), vec!["Ben".to_string()]);
        assert!(registry.effective_sellers().is_empty());
    }

    #[test]
    fn test_only_signer_adds_and_removes_user() {
        let mut registry = CollaboratorRegistry::new();
        let me = Collaborator::new("Me", "me@example.com", [], ContractRole::Standard);
        assert!(registry.set_only_signer(&me, true));
        assert!(registry.is_only_signer());
        assert_eq!(registry.committed().len(), 1);
        assert_eq!(
            registry.display_permissions(0),
            Some(vec![Permission::Edit, Permission::Sign, Permission::View])
        );
        assert!(!registry.set_only_signer(&me, true));

        assert!(registry.set_only_signer(&me, false));
        assert!(registry.committed().is_empty());
    }

    #[test]
    fn test_only_signer_keeps_existing_entry() {
        let mut registry = registry_with(&["Me"]);
        let me = Collaborator::new("Me", "me@example.com", [], ContractRole::Standard);
        registry.set_only_signer(&me, true);
        assert_eq!(registry.committed().len(), 1);
        registry.set_only_signer(&me, false);
        assert_eq!(registry.committed().len(), 1);
    }

    #[test]
    fn test_removing_solo_entry_clears_flag() {
        let mut registry = CollaboratorRegistry::new();
        let me = Collaborator::new("Me", "me@example.com", [], ContractRole::Standard);
        registry.set_only_signer(&me, true);
        registry.remove(0);
        assert!(!registry.is_only_signer());
    }

    #[test]
    fn test_removing_existing_solo_entry_keeps_flag() {
        let mut registry = registry_with(&["Me"]);
        let me = Collaborator::new("Me", "me@example.com", [], ContractRole::Standard);
        registry.set_only_signer(&me, true);
        registry.remove(0);
        assert!(registry.is_only_signer());
        assert!(registry.committed().is_empty());
    }

    #[test]
    fn test_commit_staging_if_alone() {
        let mut registry = CollaboratorRegistry::new();
        stage(&mut registry, "Ana", "ana@example.com");
        assert!(registry.commit_staging_if_alone());
        stage(&mut registry, "Ben", "ben@example.com");
        assert!(!registry.commit_staging_if_alone());
        assert_eq!(registry.committed().len(), 1);
    }
}
