//! List + form screens for customers, suppliers, categories and products.

use std::sync::Arc;

use tracing::{info, warn};

use stockroom_core::{DomainError, DomainResult, Draft, Record, RecordGateway, find_record};

use crate::error::FormError;
use crate::notice::{Notice, Notifier, capitalize};

/// Whether submitting the form creates a record or overwrites one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Update(Id),
}

pub struct RecordScreen<R: Record, G: ?Sized> {
    gateway: Arc<G>,
    notifier: Arc<dyn Notifier>,
    records: Vec<R>,
    draft: R::Draft,
    mode: FormMode<R::Id>,
}

impl<R, G> RecordScreen<R, G>
where
    R: Record,
    G: RecordGateway<R> + ?Sized,
{
    pub fn new(gateway: Arc<G>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            records: Vec::new(),
            draft: R::Draft::default(),
            mode: FormMode::Create,
        }
    }

    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Reloads the list. On failure the previous list stays and a notice is raised.
    pub async fn refresh(&mut self) -> bool {
        match self.gateway.list().await {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(e) => {
                warn!(resource = R::PLURAL, error = %e, "fetch failed");
                self.notifier
                    .notify(Notice::failure(format!("Failed to fetch {}!", R::PLURAL)));
                false
            }
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    /// Form fields, edited in place.
    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    pub fn mode(&self) -> FormMode<R::Id> {
        self.mode
    }

    /// Loads a listed record into the form and switches to update mode.
    pub fn edit(&mut self, id: R::Id) -> DomainResult<()> {
        let record = find_record(&self.records, id).ok_or_else(DomainError::not_found)?;
        self.draft = record.to_draft();
        self.mode = FormMode::Update(id);
        Ok(())
    }

    /// Clears the form back to create mode.
    pub fn cancel(&mut self) {
        self.draft = R::Draft::default();
        self.mode = FormMode::Create;
    }

    /// Validates and saves the form, then reloads the list and clears the form.
    ///
    /// The draft is kept when validation or the request fails.
    pub async fn submit(&mut self) -> Result<R, FormError> {
        let (verb, done) = match self.mode {
            FormMode::Create => ("add", "added"),
            FormMode::Update(_) => ("update", "updated"),
        };

        let draft = self.draft.normalized();
        if let Err(e) = draft.validate() {
            let reason = match &e {
                DomainError::Validation(msg) => msg.clone(),
                other => other.to_string(),
            };
            self.notifier
                .notify(Notice::failure(format!("Failed to {verb} {}! {reason}", R::LABEL)));
            return Err(e.into());
        }

        let saved = match self.mode {
            FormMode::Create => self.gateway.create(&draft).await,
            FormMode::Update(id) => self.gateway.update(id, &draft).await,
        };

        match saved {
            Ok(record) => {
                info!(resource = R::LABEL, id = %record.id(), action = done, "record saved");
                self.notifier.notify(Notice::success(format!(
                    "{} {done} successfully!",
                    capitalize(R::LABEL)
                )));
                self.refresh().await;
                self.cancel();
                Ok(record)
            }
            Err(e) => {
                warn!(resource = R::LABEL, error = %e, "save failed");
                self.notifier
                    .notify(Notice::failure(format!("Failed to {verb} {}!", R::LABEL)));
                Err(e.into())
            }
        }
    }
}
