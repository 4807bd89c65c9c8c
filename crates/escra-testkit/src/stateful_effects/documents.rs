//! In-memory document store for testing
//!
//! Assigns sequential ids (`doc-1`, `doc-2`, ...) and records every
//! `add_document` request, including the ones it was told to fail.

use async_lock::RwLock;
use async_trait::async_trait;
use escra_core::effects::{DocumentStore, DocumentStoreError, NewDocument};
use escra_core::{DocumentId, StoredDocument};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Faults {
    failing_calls: BTreeSet<usize>,
    fail_all: bool,
    fail_renames: bool,
}

/// Document store backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<Vec<StoredDocument>>>,
    requests: Arc<Mutex<Vec<NewDocument>>>,
    faults: Arc<Mutex<Faults>>,
    next_id: Arc<Mutex<u64>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th `add_document` call (1-based). May be called repeatedly.
    pub fn fail_on_call(&self, n: usize) -> &Self {
        self.faults.lock().failing_calls.insert(n);
        self
    }

    /// Fail every `add_document` call.
    pub fn fail_all(&self, fail: bool) -> &Self {
        self.faults.lock().fail_all = fail;
        self
    }

    /// Fail every `update_document_name` call.
    pub fn fail_renames(&self, fail: bool) -> &Self {
        self.faults.lock().fail_renames = fail;
        self
    }

    /// Every `add_document` request in call order.
    pub fn requests(&self) -> Vec<NewDocument> {
        self.requests.lock().clone()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.try_read().map(|g| g.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a stored document.
    pub async fn get(&self, id: &DocumentId) -> Option<StoredDocument> {
        self.documents
            .read()
            .await
            .iter()
            .find(|d| &d.id == id)
            .cloned()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn add_document(&self, document: NewDocument) -> Result<DocumentId, DocumentStoreError> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(document.clone());
            requests.len()
        };
        let fail = {
            let faults = self.faults.lock();
            faults.fail_all || faults.failing_calls.contains(&call)
        };
        if fail {
            return Err(DocumentStoreError::Unavailable {
                reason: format!("injected failure on call {call}"),
            });
        }

        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            DocumentId::new(format!("doc-{}", *next))
        };
        let stored = StoredDocument {
            id: id.clone(),
            name: document.file.name,
            mime_type: document.file.mime_type,
            size_bytes: document.file.size_bytes,
            contract_id: Some(document.contract_id),
            contract_title: Some(document.contract_title),
            uploaded_by: Some(document.uploader),
            assignee: document.assignee,
            document_type: document.document_type,
        };
        self.documents.write().await.push(stored);
        Ok(id)
    }

    async fn all_documents(&self) -> Result<Vec<StoredDocument>, DocumentStoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn remove_document(&self, id: &DocumentId) -> Result<(), DocumentStoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| &d.id != id);
        if documents.len() == before {
            return Err(DocumentStoreError::NotFound { id: id.clone() });
        }
        Ok(())
    }

    async fn update_document_name(
        &self,
        id: &DocumentId,
        name: &str,
    ) -> Result<(), DocumentStoreError> {
        if self.faults.lock().fail_renames {
            return Err(DocumentStoreError::Unavailable {
                reason: "injected rename failure".to_string(),
            });
        }
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|d| &d.id == id) {
            Some(document) => {
                document.name = name.to_string();
                Ok(())
            }
            None => Err(DocumentStoreError::NotFound { id: id.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escra_core::{ContractId, FileRef};

    fn request(name: &str) -> NewDocument {
        NewDocument {
            file: FileRef::new(name, "application/pdf", 10),
            contract_id: ContractId::from_offset(1),
            contract_title: "Lot 7".to_string(),
            uploader: "Ana".to_string(),
            assignee: None,
            document_type: None,
        }
    }

    #[tokio::test]
    async fn test_sequential_ids_and_injected_failure() {
        let store = InMemoryDocumentStore::new();
        store.fail_on_call(2);
        assert_eq!(store.add_document(request("a")).await.unwrap().as_str(), "doc-1");
        assert!(store.add_document(request("b")).await.is_err());
        assert_eq!(store.add_document(request("c")).await.unwrap().as_str(), "doc-2");
        assert_eq!(store.requests().len(), 3);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_rename_and_remove() {
        let store = InMemoryDocumentStore::new();
        let id = store.add_document(request("a.pdf")).await.unwrap();
        store.update_document_name(&id, "Deed").await.unwrap();
        assert_eq!(store.get(&id).await.map(|d| d.name), Some("Deed".to_string()));
        store.remove_document(&id).await.unwrap();
        assert!(store.remove_document(&id).await.is_err());
        assert!(store.is_empty());
    }
}
