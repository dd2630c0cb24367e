use crate::error::ApiError;
use crate::http::Transport;
use crate::session::Session;
use crate::types::RecordForm;

use super::user_message;

pub const ADDED_NOTICE: &str = "Pet record added successfully!";
pub const ADD_FALLBACK: &str = "Failed to add pet record";

/// Form for creating a pet record.
#[derive(Debug, Clone, Default)]
pub struct AddScreen {
    pub form: RecordForm,
    notice: Option<String>,
    error: Option<String>,
}

impl AddScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from the form. Clears the form on success; keeps it
    /// untouched on failure.
    pub fn submit<T: Transport>(&mut self, session: &mut Session<T>) -> Result<(), ApiError> {
        match session.create(&self.form) {
            Ok(_) => {
                self.form.clear();
                self.error = None;
                self.notice = Some(ADDED_NOTICE.to_string());
                Ok(())
            }
            Err(err) => {
                self.notice = None;
                self.error = Some(user_message(&err, ADD_FALLBACK));
                Err(err)
            }
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{session, ScriptedTransport};

    fn filled() -> AddScreen {
        let mut screen = AddScreen::new();
        screen.form.pet_name = "Rex".to_string();
        screen.form.owner_name = "Alice".to_string();
        screen.form.pet_age = "3".to_string();
        screen
    }

    #[test]
    fn success_clears_form_and_confirms() {
        let mut s = session(
            ScriptedTransport::default().reply(201, r#"{"message":"Pet record added successfully"}"#),
        );
        let mut screen = filled();
        screen.submit(&mut s).unwrap();

        assert_eq!(screen.form, RecordForm::default());
        assert_eq!(screen.notice(), Some(ADDED_NOTICE));
        assert!(screen.error().is_none());
        let sent = &s.transport().requests[0];
        assert!(sent.body.as_deref().unwrap().contains(r#""petName":"Rex""#));
    }

    #[test]
    fn server_failure_shows_message_and_keeps_form() {
        let mut s = session(ScriptedTransport::default().reply(
            500,
            r#"{"message":"Failed to add pet record","error":"PetRecord validation failed: ownerName"}"#,
        ));
        let mut screen = filled();
        screen.form.owner_name.clear();
        let before = screen.form.clone();

        assert!(screen.submit(&mut s).is_err());
        assert_eq!(screen.form, before);
        assert_eq!(screen.error(), Some("Failed to add pet record"));
        assert!(screen.notice().is_none());
    }

    #[test]
    fn transport_failure_uses_fallback() {
        let mut s = session(ScriptedTransport::default().fail("connection refused"));
        let mut screen = filled();

        let err = screen.submit(&mut s).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(screen.error(), Some(ADD_FALLBACK));
        assert_eq!(screen.form.pet_name, "Rex");
    }
}
