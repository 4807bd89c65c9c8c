//! Fixtures shared across console tests.

use escra_core::effects::AssigneeDirectory;
use escra_core::{Collaborator, ContractRole, FileRef, Permission};

/// Assignee directory with a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticAssigneeDirectory {
    names: Vec<String>,
}

impl StaticAssigneeDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssigneeDirectory for StaticAssigneeDirectory {
    fn assignees(&self) -> Vec<String> {
        self.names.clone()
    }
}

/// Collaborator with a derived `name@example.com` email and Sign only.
pub fn signer(name: &str) -> Collaborator {
    Collaborator::new(
        name,
        format!("{}@example.com", name.to_lowercase()),
        [Permission::Sign],
        ContractRole::Standard,
    )
}

/// A small PDF reference.
pub fn pdf(name: &str) -> FileRef {
    FileRef::new(name, "application/pdf", 24 * 1024)
}

/// Directory used by the scenario tests.
pub fn sample_directory() -> StaticAssigneeDirectory {
    StaticAssigneeDirectory::new(["Ana Lopez", "Ben Ortiz", "Cara Singh", "Escrow Desk"])
}
