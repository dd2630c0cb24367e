use crate::error::ApiError;
use crate::http::Transport;
use crate::session::Session;
use crate::types::PetRecord;

use super::user_message;

pub const LIST_FALLBACK: &str = "Failed to fetch pet records";
pub const DELETE_FALLBACK: &str = "Failed to delete pet record";

/// Table of every pet record, with delete and edit actions per row.
#[derive(Debug, Clone, Default)]
pub struct ListScreen {
    rows: Vec<PetRecord>,
    error: Option<String>,
}

impl ListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch all records. On failure the previous rows stay on screen.
    pub fn load<T: Transport>(&mut self, session: &mut Session<T>) -> Result<(), ApiError> {
        match session.list() {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(user_message(&err, LIST_FALLBACK));
                Err(err)
            }
        }
    }

    /// Delete a record, then reload the whole list. Rows are never removed
    /// locally; what is shown is always what the server returned.
    pub fn delete<T: Transport>(
        &mut self,
        session: &mut Session<T>,
        id: &str,
    ) -> Result<(), ApiError> {
        if let Err(err) = session.delete(id) {
            self.error = Some(user_message(&err, DELETE_FALLBACK));
            return Err(err);
        }
        self.load(session)
    }

    pub fn rows(&self) -> &[PetRecord] {
        &self.rows
    }

    /// Id to open in the update screen for the row at `index`.
    pub fn edit_target(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|r| r.id.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::screens::testing::{session, ScriptedTransport};

    const TWO: &str = r#"[{"_id":"a","petName":"Rex","ownerName":"Alice"},{"_id":"b","petName":"Tom","ownerName":"Bob"}]"#;
    const ONE: &str = r#"[{"_id":"b","petName":"Tom","ownerName":"Bob"}]"#;

    #[test]
    fn load_fills_rows() {
        let mut s = session(ScriptedTransport::default().reply(200, TWO));
        let mut screen = ListScreen::new();
        screen.load(&mut s).unwrap();

        assert_eq!(screen.rows().len(), 2);
        assert_eq!(screen.edit_target(1), Some("b"));
        assert_eq!(screen.edit_target(2), None);
    }

    #[test]
    fn delete_reloads_from_server() {
        let mut s = session(
            ScriptedTransport::default()
                .reply(200, TWO)
                .reply(200, r#"{"message":"Pet record deleted successfully"}"#)
                .reply(200, ONE),
        );
        let mut screen = ListScreen::new();
        screen.load(&mut s).unwrap();
        screen.delete(&mut s, "a").unwrap();

        let methods: Vec<_> = s.transport().requests.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Delete, HttpMethod::Get]
        );
        assert_eq!(screen.rows().len(), 1);
        assert_eq!(screen.rows()[0].id, "b");
    }

    #[test]
    fn failed_delete_keeps_rows_and_skips_reload() {
        let mut s = session(
            ScriptedTransport::default()
                .reply(200, TWO)
                .reply(500, r#"{"message":"Failed to delete pet record","error":"record store unavailable: disk full"}"#),
        );
        let mut screen = ListScreen::new();
        screen.load(&mut s).unwrap();
        assert!(screen.delete(&mut s, "a").is_err());

        assert_eq!(s.transport().requests.len(), 2);
        assert_eq!(screen.rows().len(), 2);
        assert_eq!(screen.error(), Some("Failed to delete pet record"));
    }

    #[test]
    fn failed_load_keeps_previous_rows() {
        let mut s = session(
            ScriptedTransport::default()
                .reply(200, TWO)
                .fail("connection reset"),
        );
        let mut screen = ListScreen::new();
        screen.load(&mut s).unwrap();
        assert!(screen.load(&mut s).is_err());

        assert_eq!(screen.rows().len(), 2);
        assert_eq!(screen.error(), Some(LIST_FALLBACK));
    }
}
