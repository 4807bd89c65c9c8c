//! Assignee directory interface.

/// Read-only list of known assignee names, used for autocomplete.
pub trait AssigneeDirectory: Send + Sync {
    /// All known assignee names.
    fn assignees(&self) -> Vec<String>;
}
