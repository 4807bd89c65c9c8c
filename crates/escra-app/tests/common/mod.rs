//! Shared wizard harness for scenario tests.

#![allow(dead_code)]

use escra_app::{ConsoleUser, FormField, WizardController, WizardEffects};
use escra_core::{ConsoleConfig, Permission};
use escra_testkit::{
    fixtures, ControllableTimer, InMemoryDocumentStore, RecordingPersistence,
    SequenceContractIds,
};
use std::sync::Arc;

pub struct Harness {
    pub wizard: WizardController,
    pub timer: ControllableTimer,
    pub documents: InMemoryDocumentStore,
    pub persistence: RecordingPersistence,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    pub fn with_config(config: ConsoleConfig) -> Self {
        escra_testkit::init_test_tracing();
        let timer = ControllableTimer::new();
        let documents = InMemoryDocumentStore::new();
        let persistence = RecordingPersistence::new();
        let effects = WizardEffects {
            documents: Arc::new(documents.clone()),
            persistence: Arc::new(persistence.clone()),
            timer: Arc::new(timer.clone()),
            ids: Arc::new(SequenceContractIds::new([4321])),
            assignees: Arc::new(fixtures::sample_directory()),
        };
        let mut wizard = WizardController::new(
            effects,
            config,
            ConsoleUser::new("Morgan Reyes", "morgan@escrow.example.com"),
        );
        wizard.open();
        Self {
            wizard,
            timer,
            documents,
            persistence,
        }
    }

    /// Advance virtual time and deliver every fired handle to the wizard.
    pub fn tick(&mut self, ms: u64) {
        for handle in self.timer.advance(ms) {
            self.wizard.on_timeout(handle);
        }
    }

    pub fn fill_general(&mut self) {
        self.wizard.set_field(FormField::Title, "12 Elm Street").unwrap();
        self.wizard
            .set_field(FormField::ContractType, "Residential – Financed")
            .unwrap();
    }

    pub fn stage_collaborator(&mut self, name: &str, email: &str) {
        self.wizard.set_field(FormField::CollaboratorName, name).unwrap();
        self.wizard.set_field(FormField::CollaboratorEmail, email).unwrap();
        self.wizard.toggle_staging_permission(Permission::Sign).unwrap();
    }

    pub fn add_collaborator(&mut self, name: &str) {
        let email = format!("{}@example.com", name.to_lowercase());
        self.stage_collaborator(name, &email);
        self.wizard.add_collaborator().unwrap();
    }

    pub fn fill_required_details(&mut self) {
        self.wizard.set_field(FormField::Value, "450000").unwrap();
        self.wizard.set_field(FormField::DueDate, "2026-12-01").unwrap();
        self.wizard
            .set_field(FormField::TitleCompany, "First American Title")
            .unwrap();
    }

    pub fn stage_document(&mut self, name: &str) {
        self.wizard
            .set_document_file(fixtures::pdf(&format!("{}.pdf", name.to_lowercase())))
            .unwrap();
        self.wizard.set_field(FormField::DocumentName, name).unwrap();
        self.wizard.set_field(FormField::DocumentType, "Disclosure").unwrap();
        self.wizard
            .set_field(FormField::DocumentAssignee, "Ana Lopez")
            .unwrap();
        self.wizard.add_document().unwrap();
    }
}
