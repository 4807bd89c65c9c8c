//! # Contract Assembly
//!
//! Turns wizard state into a [`Contract`] record and hands pending documents
//! to the document store one at a time.
//!
//! Document creation is fire-and-continue: a failed call is logged and the
//! loop moves on. Every attempted document still appears in the
//! confirmation, under a synthetic id when the store returned none.

use crate::collaborators::CollaboratorRegistry;
use crate::documents::PendingDocument;
use crate::form::ContractForm;
use escra_core::effects::{ContractIdEffects, DocumentStore, NewDocument};
use escra_core::{Contract, ContractId, ContractStatus, DocumentId, EscraError, FileRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Real digits of the four masked bank fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankNumbers {
    pub buyer_routing: String,
    pub seller_routing: String,
    pub buyer_account: String,
    pub seller_account: String,
}

/// A document as reported after submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedDocument {
    pub id: DocumentId,
    pub name: String,
    /// False when the store failed and `id` is a synthetic fallback
    pub persisted: bool,
}

/// Payload shown on the confirmation step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfirmation {
    pub contract_id: ContractId,
    pub contract_name: String,
    pub documents: Vec<ConfirmedDocument>,
}

/// A failure that was logged and skipped during submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionIssue {
    /// The store refused or failed to create a document
    DocumentCreate { name: String, error: EscraError },
    /// A created document kept its file name because the rename failed
    DocumentRename { id: DocumentId, error: EscraError },
    /// The remote contract mirror was not written
    Persistence { error: EscraError },
}

/// Everything a submission produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReport {
    pub contract: Contract,
    pub confirmation: ContractConfirmation,
    pub issues: Vec<SubmissionIssue>,
}

impl SubmissionReport {
    /// True when every document and the contract mirror were persisted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Builds contracts and materializes their documents.
#[derive(Clone)]
pub struct ContractAssembler {
    ids: Arc<dyn ContractIdEffects>,
    documents: Arc<dyn DocumentStore>,
    default_status: ContractStatus,
}

impl ContractAssembler {
    pub fn new(
        ids: Arc<dyn ContractIdEffects>,
        documents: Arc<dyn DocumentStore>,
        default_status: ContractStatus,
    ) -> Self {
        Self {
            ids,
            documents,
            default_status,
        }
    }

    /// Build the contract record from wizard state.
    ///
    /// The id is drawn from [1000, 9999] and is not checked against existing
    /// contracts. `document_ids` starts empty.
    #[must_use]
    pub fn assemble(
        &self,
        form: &ContractForm,
        registry: &CollaboratorRegistry,
        bank: BankNumbers,
    ) -> Contract {
        let mut details = form.details.clone();
        details.buyer_routing_number = bank.buyer_routing;
        details.seller_routing_number = bank.seller_routing;
        details.buyer_account_number = bank.buyer_account;
        details.seller_account_number = bank.seller_account;

        Contract {
            id: self.ids.next_contract_id(),
            title: form.title.trim().to_string(),
            contract_type: form.contract_type.trim().to_string(),
            status: self.default_status,
            milestone: form.milestone.clone(),
            notes: form.notes.clone(),
            collaborators: registry.committed().to_vec(),
            buyers: registry.effective_buyers(),
            sellers: registry.effective_sellers(),
            agent: form.agent.trim().to_string(),
            details,
            document_ids: Vec::new(),
        }
    }

    /// Create every pending document and then every raw file, in order.
    ///
    /// Calls are awaited one at a time. The returned list has one entry per
    /// attempt, in attempt order.
    pub async fn materialize_documents(
        &self,
        contract: &Contract,
        pending: Vec<PendingDocument>,
        raw_files: Vec<FileRef>,
        uploader: &str,
        issues: &mut Vec<SubmissionIssue>,
    ) -> Vec<ConfirmedDocument> {
        let mut confirmed = Vec::with_capacity(pending.len() + raw_files.len());

        for document in pending {
            let rename = (document.name != document.file.name).then(|| document.name.clone());
            let request = NewDocument {
                file: document.file,
                contract_id: contract.id,
                contract_title: contract.title.clone(),
                uploader: uploader.to_string(),
                assignee: Some(document.assignee),
                document_type: Some(document.document_type),
            };
            let entry = self
                .create_one(request, document.name, rename, issues)
                .await;
            confirmed.push(entry);
        }

        for file in raw_files {
            let name = file.name.clone();
            let request = NewDocument {
                file,
                contract_id: contract.id,
                contract_title: contract.title.clone(),
                uploader: uploader.to_string(),
                assignee: None,
                document_type: None,
            };
            let entry = self.create_one(request, name, None, issues).await;
            confirmed.push(entry);
        }

        confirmed
    }

    async fn create_one(
        &self,
        request: NewDocument,
        name: String,
        rename: Option<String>,
        issues: &mut Vec<SubmissionIssue>,
    ) -> ConfirmedDocument {
        let contract_id = request.contract_id;
        match self.documents.add_document(request).await {
            Ok(id) => {
                if let Some(display) = rename {
                    if let Err(error) = self.documents.update_document_name(&id, &display).await {
                        tracing::warn!(%contract_id, document_id = %id, %error, "document rename failed");
                        issues.push(SubmissionIssue::DocumentRename {
                            id: id.clone(),
                            error: error.into(),
                        });
                    }
                }
                tracing::debug!(%contract_id, document_id = %id, "document created");
                ConfirmedDocument {
                    id,
                    name,
                    persisted: true,
                }
            }
            Err(error) => {
                tracing::warn!(%contract_id, document = %name, %error, "document creation failed; continuing");
                issues.push(SubmissionIssue::DocumentCreate {
                    name: name.clone(),
                    error: error.into(),
                });
                ConfirmedDocument {
                    id: DocumentId::synthetic(),
                    name,
                    persisted: false,
                }
            }
        }
    }
}

impl std::fmt::Debug for ContractAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractAssembler")
            .field("default_status", &self.default_status)
            .finish_non_exhaustive()
    }
}
