use shared::domain::{fields, Record};

use crate::error::{ClientError, LeadsError};

/// Draft of one record being edited. The phone it was opened with is the record's key
/// and cannot be changed inside the session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    phone: String,
    draft: Record,
}

impl EditSession {
    pub fn begin(record: &Record) -> Result<Self, ClientError> {
        let phone = record
            .phone()
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.into_owned())
            .ok_or_else(|| ClientError::Validation("record has no phone to edit by".into()))?;
        Ok(Self {
            phone,
            draft: record.clone(),
        })
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn draft(&self) -> &Record {
        &self.draft
    }

    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ClientError> {
        let field = field.into();
        if field == fields::PHONE {
            return Err(ClientError::Validation(
                "phone is the record key and cannot be edited".into(),
            ));
        }
        self.draft.set(field, value);
        Ok(())
    }

    /// Body sent with the update; the key always matches the session's phone.
    pub(crate) fn body(&self) -> Record {
        let mut body = self.draft.clone();
        body.set(fields::PHONE, self.phone.clone());
        body
    }
}

/// A failed commit hands the session back so the edit can be retried or cancelled.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct CommitError {
    pub session: EditSession,
    #[source]
    pub error: LeadsError,
}

/// First step of a deletion; nothing is sent until [`DeleteRequest::confirm`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete request does nothing until it is confirmed"]
pub struct DeleteRequest {
    phone: String,
}

impl DeleteRequest {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { phone: self.phone }
    }
}

/// Proof that the user confirmed a deletion. Only obtainable from a [`DeleteRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDelete {
    phone: String,
}

impl ConfirmedDelete {
    pub fn phone(&self) -> &str {
        &self.phone
    }
}
