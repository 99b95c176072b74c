use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use shared::{
    domain::Record,
    protocol::{AccountResponse, LoginRequest, SignupRequest},
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

pub mod api;
pub mod edit;
pub mod error;
pub mod filter;
pub mod intake;
pub mod sort;
pub mod store;
pub mod table;

pub use api::{HttpLeadsApi, LeadsApi};
pub use edit::{CommitError, ConfirmedDelete, DeleteRequest, EditSession};
pub use error::{ClientError, LeadsError};
pub use filter::FilterPredicate;
pub use intake::{DropdownOption, LeadForm};
pub use sort::{SortDirection, SortState};
pub use store::{FieldSet, RecordStore};
pub use table::LeadTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was the latest one issued and now backs the table.
    Applied { records: usize },
    /// A later load was issued while this one was in flight; its response was dropped.
    Superseded,
}

/// Mediates every exchange between the table and the lead service.
///
/// The table is only changed after the service has confirmed an operation, so a failed
/// call always leaves the visible rows as they were.
pub struct LeadsController {
    api: Arc<dyn LeadsApi>,
    table: Mutex<LeadTable>,
    load_seq: AtomicU64,
    submitting: AtomicBool,
}

impl LeadsController {
    pub fn new(api: Arc<dyn LeadsApi>) -> Self {
        Self::with_table(api, LeadTable::default())
    }

    pub fn with_table(api: Arc<dyn LeadsApi>, table: LeadTable) -> Self {
        Self {
            api,
            table: Mutex::new(table),
            load_seq: AtomicU64::new(0),
            submitting: AtomicBool::new(false),
        }
    }

    /// Locks the table for reading the view or changing predicates and sort order.
    /// The record store inside can only be read through the guard.
    pub async fn table(&self) -> MutexGuard<'_, LeadTable> {
        self.table.lock().await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AccountResponse, LeadsError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await.map_err(LeadsError::Login)?;
        info!(%email, "login accepted");
        Ok(response)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountResponse, LeadsError> {
        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.signup(&request).await.map_err(LeadsError::Signup)?;
        info!(%email, "signup accepted");
        Ok(response)
    }

    /// Fetches every record and replaces the store with them.
    ///
    /// Each call takes a new sequence number; a response that arrives after a later call
    /// was issued is discarded, whether it succeeded or not.
    pub async fn load(&self) -> Result<LoadOutcome, LeadsError> {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.fetch().await;

        let mut table = self.table.lock().await;
        let latest = self.load_seq.load(Ordering::SeqCst);
        if seq != latest {
            debug!(seq, latest, "discarding stale fetch response");
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(records) => {
                let count = records.len();
                table.store_mut().replace(records);
                info!(records = count, "leads loaded");
                Ok(LoadOutcome::Applied { records: count })
            }
            Err(err) => {
                warn!(error = %err, "fetch failed; keeping previous records");
                Err(LeadsError::Fetch(err))
            }
        }
    }

    /// Validates and uploads the form. On success the stored record joins the table and
    /// the form is reset; on failure the form keeps its answers.
    pub async fn submit_lead(&self, form: &mut LeadForm) -> Result<Record, LeadsError> {
        form.validate().map_err(LeadsError::Submit)?;

        let result = {
            let _in_flight = SubmitGuard::acquire(&self.submitting)?;
            self.api.upload(&form.to_record()).await
        };

        let stored = result.map_err(|err| {
            warn!(error = %err, "lead submission failed");
            LeadsError::Submit(err)
        })?;
        self.table.lock().await.store_mut().upsert(stored.clone());
        info!(phone = ?stored.phone(), "lead submitted");
        form.reset();
        Ok(stored)
    }

    pub fn begin_edit(&self, record: &Record) -> Result<EditSession, ClientError> {
        EditSession::begin(record)
    }

    /// Sends the draft and applies the server's copy of the record to the table.
    pub async fn commit_edit(&self, session: EditSession) -> Result<Record, CommitError> {
        let phone = session.phone().to_string();
        match self.api.update(&phone, &session.body()).await {
            Ok(updated) => {
                let applied = self
                    .table
                    .lock()
                    .await
                    .store_mut()
                    .apply_remote_update(updated.clone());
                info!(%phone, applied, "lead updated");
                Ok(updated)
            }
            Err(source) => {
                warn!(%phone, error = %source, "lead update failed; session kept open");
                Err(CommitError {
                    session,
                    error: LeadsError::Update { phone, source },
                })
            }
        }
    }

    pub fn cancel_edit(&self, session: EditSession) {
        debug!(phone = session.phone(), "edit cancelled");
    }

    pub fn request_delete(&self, phone: impl Into<String>) -> DeleteRequest {
        DeleteRequest::new(phone)
    }

    /// Deletes a confirmed record. A 404 means the service no longer has it, which is
    /// treated as success.
    pub async fn delete_record(&self, confirmed: ConfirmedDelete) -> Result<(), LeadsError> {
        let phone = confirmed.phone();
        match self.api.delete(phone).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                warn!(%phone, "lead already absent on the service");
            }
            Err(source) => {
                warn!(%phone, error = %source, "lead delete failed");
                return Err(LeadsError::Delete {
                    phone: phone.to_string(),
                    source,
                });
            }
        }
        let removed = self.table.lock().await.store_mut().remove_by_key(phone);
        info!(%phone, removed, "lead deleted");
        Ok(())
    }
}

/// Holds the single submission slot; released on drop, including when the upload future
/// is cancelled.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, LeadsError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| Self(flag))
            .map_err(|_| LeadsError::SubmitInFlight)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
