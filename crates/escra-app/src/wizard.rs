//! # Create Contract Wizard
//!
//! [`WizardController`] owns the five-step intake flow. Forward moves run the
//! current step's validator; backward moves never validate. Leaving the
//! documents step submits: the contract is assembled, every pending document
//! and raw file is created one at a time, the contract is added to the local
//! ledger and mirrored, and the wizard lands on the confirmation step.
//!
//! All mutation happens through `&mut self`, one event at a time. The only
//! await points are the document store and persistence calls made during
//! submission.

use crate::assembler::{
    BankNumbers, ContractAssembler, ContractConfirmation, SubmissionIssue, SubmissionReport,
};
use crate::collaborators::{AddOutcome, CollaboratorRegistry};
use crate::documents::{assignee_suggestions, DocumentBatchBuilder, FileRejection};
use crate::errors::WizardError;
use crate::form::{ContractForm, FieldErrors, FormField};
use crate::ledger::ContractLedger;
use crate::masked_input::{InputOutcome, MaskedDigitInput, MaskedFieldId};
use crate::views::wizards::CreateContractStep;
use escra_core::effects::{
    AssigneeDirectory, ContractIdEffects, ContractPersistence, DocumentStore, TimeoutHandle,
    TimerEffects,
};
use escra_core::{Collaborator, ConsoleConfig, ContractRole, FileRef, Permission};
use std::sync::Arc;

// ============================================================================
// Dependencies
// ============================================================================

/// External collaborators the wizard depends on.
#[derive(Clone)]
pub struct WizardEffects {
    pub documents: Arc<dyn DocumentStore>,
    pub persistence: Arc<dyn ContractPersistence>,
    pub timer: Arc<dyn TimerEffects>,
    pub ids: Arc<dyn ContractIdEffects>,
    pub assignees: Arc<dyn AssigneeDirectory>,
}

impl std::fmt::Debug for WizardEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardEffects").finish_non_exhaustive()
    }
}

/// The signed-in user: uploader of documents and the "only signer" identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleUser {
    pub name: String,
    pub email: String,
}

impl ConsoleUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn as_collaborator(&self) -> Collaborator {
        Collaborator::new(
            self.name.clone(),
            self.email.clone(),
            Permission::all().iter().copied(),
            ContractRole::Standard,
        )
    }
}

/// Result of a successful forward move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step
    Moved(CreateContractStep),
    /// Submitted and moved to the confirmation step
    Submitted(Box<SubmissionReport>),
}

// ============================================================================
// Masked Fields
// ============================================================================

#[derive(Clone, Debug)]
struct MaskedFields {
    buyer_routing: MaskedDigitInput,
    seller_routing: MaskedDigitInput,
    buyer_account: MaskedDigitInput,
    seller_account: MaskedDigitInput,
}

impl Default for MaskedFields {
    fn default() -> Self {
        Self {
            buyer_routing: MaskedDigitInput::new(MaskedFieldId::BuyerRouting.kind()),
            seller_routing: MaskedDigitInput::new(MaskedFieldId::SellerRouting.kind()),
            buyer_account: MaskedDigitInput::new(MaskedFieldId::BuyerAccount.kind()),
            seller_account: MaskedDigitInput::new(MaskedFieldId::SellerAccount.kind()),
        }
    }
}

impl MaskedFields {
    fn get(&self, id: MaskedFieldId) -> &MaskedDigitInput {
        match id {
            MaskedFieldId::BuyerRouting => &self.buyer_routing,
            MaskedFieldId::SellerRouting => &self.seller_routing,
            MaskedFieldId::BuyerAccount => &self.buyer_account,
            MaskedFieldId::SellerAccount => &self.seller_account,
        }
    }

    fn get_mut(&mut self, id: MaskedFieldId) -> &mut MaskedDigitInput {
        match id {
            MaskedFieldId::BuyerRouting => &mut self.buyer_routing,
            MaskedFieldId::SellerRouting => &mut self.seller_routing,
            MaskedFieldId::BuyerAccount => &mut self.buyer_account,
            MaskedFieldId::SellerAccount => &mut self.seller_account,
        }
    }

    fn bank_numbers(&self) -> BankNumbers {
        BankNumbers {
            buyer_routing: self.buyer_routing.actual().to_string(),
            seller_routing: self.seller_routing.actual().to_string(),
            buyer_account: self.buyer_account.actual().to_string(),
            seller_account: self.seller_account.actual().to_string(),
        }
    }

    fn clear(&mut self, timer: &dyn TimerEffects) {
        for id in MaskedFieldId::all() {
            self.get_mut(*id).clear(timer);
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// State machine for the create-contract wizard.
pub struct WizardController {
    effects: WizardEffects,
    config: ConsoleConfig,
    user: ConsoleUser,
    assembler: ContractAssembler,
    ledger: Arc<ContractLedger>,

    open: bool,
    step: CreateContractStep,
    form: ContractForm,
    errors: FieldErrors,
    masked: MaskedFields,
    registry: CollaboratorRegistry,
    batch: DocumentBatchBuilder,
    confirmation: Option<ContractConfirmation>,
}

impl WizardController {
    /// Create a closed wizard with its own ledger.
    pub fn new(effects: WizardEffects, config: ConsoleConfig, user: ConsoleUser) -> Self {
        let ledger = Arc::new(ContractLedger::new(Arc::clone(&effects.persistence)));
        Self::with_ledger(effects, config, user, ledger)
    }

    /// Create a closed wizard that records contracts in a shared ledger.
    pub fn with_ledger(
        effects: WizardEffects,
        config: ConsoleConfig,
        user: ConsoleUser,
        ledger: Arc<ContractLedger>,
    ) -> Self {
        let assembler = ContractAssembler::new(
            Arc::clone(&effects.ids),
            Arc::clone(&effects.documents),
            config.default_contract_status,
        );
        Self {
            effects,
            config,
            user,
            assembler,
            ledger,
            open: false,
            step: CreateContractStep::General,
            form: ContractForm::default(),
            errors: FieldErrors::default(),
            masked: MaskedFields::default(),
            registry: CollaboratorRegistry::new(),
            batch: DocumentBatchBuilder::new(),
            confirmation: None,
        }
    }

    // ---- accessors ---------------------------------------------------------

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn step(&self) -> CreateContractStep {
        self.step
    }

    #[must_use]
    pub fn form(&self) -> &ContractForm {
        &self.form
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn registry(&self) -> &CollaboratorRegistry {
        &self.registry
    }

    #[must_use]
    pub fn documents(&self) -> &DocumentBatchBuilder {
        &self.batch
    }

    #[must_use]
    pub fn masked(&self, id: MaskedFieldId) -> &MaskedDigitInput {
        self.masked.get(id)
    }

    #[must_use]
    pub fn confirmation(&self) -> Option<&ContractConfirmation> {
        self.confirmation.as_ref()
    }

    #[must_use]
    pub fn ledger(&self) -> &Arc<ContractLedger> {
        &self.ledger
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // ---- lifecycle ---------------------------------------------------------

    /// Open the wizard on the general step with empty state.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.reset_state();
        self.open = true;
        tracing::debug!("create contract wizard opened");
    }

    /// Close from any step, discarding all wizard state.
    ///
    /// Pending reveal timers are cancelled first. In-flight submission is
    /// not interruptible; by the time `close` can run it has finished.
    pub fn close(&mut self) {
        self.reset_state();
        self.open = false;
        tracing::debug!("create contract wizard closed");
    }

    /// Same as [`close`](Self::close).
    pub fn cancel(&mut self) {
        self.close();
    }

    fn reset_state(&mut self) {
        self.masked.clear(self.effects.timer.as_ref());
        self.step = CreateContractStep::General;
        self.form = ContractForm::default();
        self.errors.clear_all();
        self.registry.reset();
        self.batch.reset();
        self.confirmation = None;
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if !self.open {
            return Err(WizardError::NotOpen);
        }
        if self.step.is_terminal() {
            return Err(WizardError::Terminal);
        }
        Ok(())
    }

    // ---- navigation --------------------------------------------------------

    /// Move forward if the current step validates.
    ///
    /// From the documents step this submits. Validation failures flag the
    /// offending fields and leave the step unchanged.
    pub async fn advance(&mut self) -> Result<Advance, WizardError> {
        self.ensure_editable()?;
        if self.step == CreateContractStep::Documents {
            return self.submit().await.map(|r| Advance::Submitted(Box::new(r)));
        }
        self.advance_local().map(Advance::Moved)
    }

    fn advance_local(&mut self) -> Result<CreateContractStep, WizardError> {
        self.validate_current()?;
        let Some(next) = self.step.next() else {
            return Err(WizardError::Terminal);
        };
        tracing::debug!(from = ?self.step, to = ?next, "wizard advanced");
        self.step = next;
        Ok(next)
    }

    fn validate_current(&mut self) -> Result<(), WizardError> {
        match self.step {
            CreateContractStep::General => {
                let missing = self.form.missing_general();
                self.fail_if_missing(CreateContractStep::General, missing)
            }
            CreateContractStep::Collaborators => {
                if !self.registry.committed().is_empty() {
                    return Ok(());
                }
                let missing = self.registry.missing_staging_fields();
                self.fail_if_missing(CreateContractStep::Collaborators, missing)?;
                if self.registry.commit_staging_if_alone() {
                    tracing::debug!("staged collaborator committed on leaving step");
                }
                Ok(())
            }
            CreateContractStep::Details | CreateContractStep::Documents => Ok(()),
            CreateContractStep::Confirmation => Err(WizardError::Terminal),
        }
    }

    fn fail_if_missing(
        &mut self,
        step: CreateContractStep,
        missing: Vec<FormField>,
    ) -> Result<(), WizardError> {
        if missing.is_empty() {
            return Ok(());
        }
        self.errors.mark_all(missing.iter().copied());
        tracing::debug!(?step, ?missing, "step validation failed");
        Err(WizardError::validation(step, missing))
    }

    /// Step back one step without validating. Stays put on the first step.
    pub fn back(&mut self) -> Result<CreateContractStep, WizardError> {
        self.ensure_editable()?;
        if let Some(prev) = self.step.prev() {
            tracing::debug!(from = ?self.step, to = ?prev, "wizard stepped back");
            self.step = prev;
        }
        Ok(self.step)
    }

    /// Jump to an earlier step without validating.
    ///
    /// Returns false when `target` is not before the current step.
    pub fn jump_back_to(&mut self, target: CreateContractStep) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        if target >= self.step {
            return Ok(false);
        }
        tracing::debug!(from = ?self.step, to = ?target, "wizard jumped back");
        self.step = target;
        Ok(true)
    }

    // ---- field edits -------------------------------------------------------

    /// Set a text field and clear its error flag.
    ///
    /// Any accepted edit also clears the collaborator duplicate error.
    ///
    /// Collaborator and document staging fields are routed to their
    /// sub-forms. Returns false for fields that take no text
    /// (`CollaboratorPermissions`, `DocumentFile`).
    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        let value = value.into();
        let accepted = match field {
            FormField::CollaboratorName => {
                self.registry.set_staging_name(value);
                true
            }
            FormField::CollaboratorEmail => {
                self.registry.set_staging_email(value);
                true
            }
            FormField::DocumentName => {
                self.batch.set_name(value);
                true
            }
            FormField::DocumentType => {
                self.batch.set_document_type(value);
                true
            }
            FormField::DocumentAssignee => {
                self.batch.set_assignee(value);
                true
            }
            FormField::CollaboratorPermissions | FormField::DocumentFile => false,
            _ => self.form.set(field, value),
        };
        if accepted {
            self.errors.clear(field);
            self.registry.clear_flags();
        }
        Ok(accepted)
    }

    /// Feed one change event to a masked bank field.
    pub fn masked_input(
        &mut self,
        id: MaskedFieldId,
        raw: &str,
    ) -> Result<InputOutcome, WizardError> {
        self.ensure_editable()?;
        Ok(self.masked.get_mut(id).on_input(
            raw,
            self.effects.timer.as_ref(),
            self.config.reveal_window_ms,
        ))
    }

    /// Toggle permanent reveal on an account field.
    ///
    /// Returns false for routing fields, which never reveal.
    pub fn set_masked_revealed(
        &mut self,
        id: MaskedFieldId,
        revealed: bool,
    ) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        Ok(self
            .masked
            .get_mut(id)
            .set_revealed(revealed, self.effects.timer.as_ref()))
    }

    /// Route a fired timer to the field that owns it.
    ///
    /// Returns true when some field re-masked. Unknown handles are ignored.
    pub fn on_timeout(&mut self, handle: TimeoutHandle) -> bool {
        MaskedFieldId::all()
            .iter()
            .any(|id| self.masked.get_mut(*id).on_timeout(handle))
    }

    // ---- collaborators -----------------------------------------------------

    pub fn set_staging_role(&mut self, role: ContractRole) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.registry.set_staging_role(role);
        Ok(())
    }

    pub fn toggle_staging_permission(&mut self, permission: Permission) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.registry.toggle_staging_permission(permission);
        self.errors.clear(FormField::CollaboratorPermissions);
        Ok(())
    }

    /// Commit the staging collaborator.
    pub fn add_collaborator(&mut self) -> Result<AddOutcome, WizardError> {
        self.ensure_editable()?;
        let outcome = self
            .registry
            .add()
            .map_err(WizardError::DuplicateCollaborator)?;
        if let AddOutcome::Added(_) = outcome {
            for field in [
                FormField::CollaboratorName,
                FormField::CollaboratorEmail,
                FormField::CollaboratorPermissions,
            ] {
                self.errors.clear(field);
            }
        }
        Ok(outcome)
    }

    pub fn remove_collaborator(&mut self, index: usize) -> Result<Option<Collaborator>, WizardError> {
        self.ensure_editable()?;
        Ok(self.registry.remove(index))
    }

    pub fn toggle_buyer(&mut self, name: &str) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        Ok(self.registry.toggle_buyer(name))
    }

    pub fn toggle_seller(&mut self, name: &str) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        Ok(self.registry.toggle_seller(name))
    }

    /// Switch "I am the only signer" for the signed-in user.
    ///
    /// Switching on while on the collaborators step advances to details when
    /// `auto_advance_on_only_signer` is set. Returns the resulting step.
    pub fn set_only_signer(&mut self, on: bool) -> Result<CreateContractStep, WizardError> {
        self.ensure_editable()?;
        let changed = self.registry.set_only_signer(&self.user.as_collaborator(), on);
        if changed
            && on
            && self.config.auto_advance_on_only_signer
            && self.step == CreateContractStep::Collaborators
        {
            self.advance_local()?;
        }
        Ok(self.step)
    }

    // ---- documents ---------------------------------------------------------

    pub fn set_document_file(&mut self, file: FileRef) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.batch.set_file(file);
        self.errors.clear(FormField::DocumentFile);
        self.errors.clear(FormField::DocumentName);
        Ok(())
    }

    /// Stage the document draft. Missing sub-fields are flagged.
    pub fn add_document(&mut self) -> Result<usize, WizardError> {
        self.ensure_editable()?;
        self.batch.add().map_err(|err| {
            self.errors.mark_all(err.fields().iter().copied());
            err
        })
    }

    pub fn remove_document(&mut self, index: usize) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        Ok(self.batch.remove(index).is_some())
    }

    /// Add independently selected files, returning the ones refused.
    pub fn select_files(
        &mut self,
        files: impl IntoIterator<Item = FileRef>,
    ) -> Result<Vec<FileRejection>, WizardError> {
        self.ensure_editable()?;
        Ok(self.batch.select_raw_files(files, &self.config))
    }

    /// Assignee autocomplete over the directory.
    #[must_use]
    pub fn assignee_suggestions(&self, query: &str) -> Vec<String> {
        assignee_suggestions(&self.effects.assignees.assignees(), query)
    }

    // ---- submission --------------------------------------------------------

    async fn submit(&mut self) -> Result<SubmissionReport, WizardError> {
        let missing = self.form.missing_required_details();
        self.fail_if_missing(CreateContractStep::Details, missing)?;

        let mut contract =
            self.assembler
                .assemble(&self.form, &self.registry, self.masked.bank_numbers());
        let (pending, raw_files) = self.batch.drain();
        tracing::info!(
            contract_id = %contract.id,
            documents = pending.len() + raw_files.len(),
            "submitting contract"
        );

        let mut issues = Vec::new();
        let documents = self
            .assembler
            .materialize_documents(&contract, pending, raw_files, &self.user.name, &mut issues)
            .await;
        contract.document_ids = documents
            .iter()
            .filter(|d| d.persisted)
            .map(|d| d.id.clone())
            .collect();

        if let Err(error) = self.ledger.insert(contract.clone()).await {
            issues.push(SubmissionIssue::Persistence { error });
        }

        let confirmation = ContractConfirmation {
            contract_id: contract.id,
            contract_name: contract.title.clone(),
            documents,
        };

        self.reset_state();
        self.step = CreateContractStep::Confirmation;
        self.confirmation = Some(confirmation.clone());

        tracing::info!(
            contract_id = %contract.id,
            documents = confirmation.documents.len(),
            issues = issues.len(),
            "contract submitted"
        );
        Ok(SubmissionReport {
            contract,
            confirmation,
            issues,
        })
    }
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("open", &self.open)
            .field("step", &self.step)
            .field("collaborators", &self.registry.committed().len())
            .field("pending_documents", &self.batch.attempt_count())
            .finish_non_exhaustive()
    }
}
