use crate::error::ApiError;
use crate::http::Transport;
use crate::session::Session;
use crate::types::{PetRecord, RecordForm};

use super::Navigation;

pub const FETCH_FAILED: &str = "Failed to fetch pet record";
pub const UPDATE_FAILED: &str = "Failed to update pet record";

/// Edit form for one record, keyed by its id.
#[derive(Debug, Clone)]
pub struct UpdateScreen {
    id: String,
    pub form: RecordForm,
    record: Option<PetRecord>,
    error: Option<String>,
    cause: Option<String>,
}

impl UpdateScreen {
    /// Mount the screen for `id` and load the record into the form.
    ///
    /// The screen is returned even when loading fails, showing `error()`;
    /// the load outcome comes back alongside it for the host to report.
    pub fn open<T: Transport>(
        session: &mut Session<T>,
        id: impl Into<String>,
    ) -> (Self, Result<(), ApiError>) {
        let mut screen = Self {
            id: id.into(),
            form: RecordForm::default(),
            record: None,
            error: None,
            cause: None,
        };
        let loaded = screen.reload(session);
        (screen, loaded)
    }

    pub fn reload<T: Transport>(&mut self, session: &mut Session<T>) -> Result<(), ApiError> {
        let err = match session.get(&self.id) {
            Ok(Some(record)) => {
                self.form = RecordForm::from_record(&record);
                self.record = Some(record);
                self.error = None;
                self.cause = None;
                return Ok(());
            }
            Ok(None) => ApiError::NotFound,
            Err(err) => err,
        };
        self.record = None;
        self.error = Some(FETCH_FAILED.to_string());
        self.cause = Some(err.to_string());
        Err(err)
    }

    /// Send every form field as the record's new contents. Only a loaded
    /// record can be submitted.
    pub fn submit<T: Transport>(&mut self, session: &mut Session<T>) -> Navigation {
        if self.record.is_none() {
            self.error = Some(FETCH_FAILED.to_string());
            return Navigation::Stay;
        }
        match session.update(&self.id, &self.form) {
            Ok(_) => {
                self.error = None;
                self.cause = None;
                Navigation::ToList
            }
            Err(err) => {
                self.error = Some(UPDATE_FAILED.to_string());
                self.cause = Some(err.to_string());
                Navigation::Stay
            }
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The record as it was when loaded.
    pub fn record(&self) -> Option<&PetRecord> {
        self.record.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Underlying error of the last failed load or submit, for logging.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}
