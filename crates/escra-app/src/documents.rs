//! # Document Batch
//!
//! Pending documents collected on the documents step, plus the raw files
//! picked outside the staging form. Nothing touches the document store
//! until submission.

use crate::errors::WizardError;
use crate::form::FormField;
use crate::views::wizards::CreateContractStep;
use escra_core::{ConsoleConfig, FileRef};

/// A document waiting for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDocument {
    pub file: FileRef,
    /// Display name chosen by the user
    pub name: String,
    pub document_type: String,
    pub assignee: String,
}

/// Staging sub-form for the next pending document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentDraft {
    pub file: Option<FileRef>,
    pub name: String,
    pub document_type: String,
    pub assignee: String,
}

impl DocumentDraft {
    /// Sub-fields that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.file.is_none() {
            missing.push(FormField::DocumentFile);
        }
        if self.name.trim().is_empty() {
            missing.push(FormField::DocumentName);
        }
        if self.document_type.trim().is_empty() {
            missing.push(FormField::DocumentType);
        }
        if self.assignee.trim().is_empty() {
            missing.push(FormField::DocumentAssignee);
        }
        missing
    }
}

/// Why a raw file was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FileRejection {
    #[error("{name}: file type {mime_type} is not accepted")]
    UnsupportedType { name: String, mime_type: String },
    #[error("{name}: {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    TooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },
}

/// Pending documents and independently selected files.
#[derive(Clone, Debug, Default)]
pub struct DocumentBatchBuilder {
    draft: DocumentDraft,
    pending: Vec<PendingDocument>,
    raw_files: Vec<FileRef>,
}

impl DocumentBatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn draft(&self) -> &DocumentDraft {
        &self.draft
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingDocument] {
        &self.pending
    }

    #[must_use]
    pub fn raw_files(&self) -> &[FileRef] {
        &self.raw_files
    }

    /// Number of documents submission will attempt.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.pending.len() + self.raw_files.len()
    }

    /// Choose the draft's file. An empty display name takes the file name.
    pub fn set_file(&mut self, file: FileRef) {
        if self.draft.name.trim().is_empty() {
            self.draft.name = file.name.clone();
        }
        self.draft.file = Some(file);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_document_type(&mut self, document_type: impl Into<String>) {
        self.draft.document_type = document_type.into();
    }

    pub fn set_assignee(&mut self, assignee: impl Into<String>) {
        self.draft.assignee = assignee.into();
    }

    /// Append the draft and clear it. Every sub-field must be filled.
    pub fn add(&mut self) -> Result<usize, WizardError> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(WizardError::validation(CreateContractStep::Documents, missing));
        }
        let draft = std::mem::take(&mut self.draft);
        let Some(file) = draft.file else {
            return Err(WizardError::validation(
                CreateContractStep::Documents,
                [FormField::DocumentFile],
            ));
        };
        self.pending.push(PendingDocument {
            file,
            name: draft.name.trim().to_string(),
            document_type: draft.document_type.trim().to_string(),
            assignee: draft.assignee.trim().to_string(),
        });
        tracing::debug!(count = self.pending.len(), "document staged");
        Ok(self.pending.len() - 1)
    }

    /// Remove a pending document. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<PendingDocument> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    /// Keep the files that pass the upload filter and report the rest.
    pub fn select_raw_files(
        &mut self,
        files: impl IntoIterator<Item = FileRef>,
        config: &ConsoleConfig,
    ) -> Vec<FileRejection> {
        let mut rejected = Vec::new();
        for file in files {
            if !config.accepts_mime_type(&file.mime_type) {
                rejected.push(FileRejection::UnsupportedType {
                    name: file.name,
                    mime_type: file.mime_type,
                });
            } else if file.size_bytes > config.max_upload_bytes {
                rejected.push(FileRejection::TooLarge {
                    name: file.name,
                    size_bytes: file.size_bytes,
                    limit_bytes: config.max_upload_bytes,
                });
            } else {
                self.raw_files.push(file);
            }
        }
        rejected
    }

    pub fn remove_raw_file(&mut self, index: usize) -> Option<FileRef> {
        (index < self.raw_files.len()).then(|| self.raw_files.remove(index))
    }

    /// Take every pending document and raw file, leaving the batch empty.
    pub fn drain(&mut self) -> (Vec<PendingDocument>, Vec<FileRef>) {
        self.draft = DocumentDraft::default();
        (
            std::mem::take(&mut self.pending),
            std::mem::take(&mut self.raw_files),
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Assignee suggestions for a partial entry.
///
/// Case-insensitive substring match, first occurrence wins, directory order
/// kept. An empty query returns every assignee.
#[must_use]
pub fn assignee_suggestions(directory: &[String], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for name in directory {
        let key = name.trim().to_lowercase();
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        if key.contains(&needle) {
            seen.push(key);
            out.push(name.trim().to_string());
        }
    }
    out
}
