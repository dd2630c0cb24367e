//! A `RecordClient` paired with a host `Transport`: one call per API operation.

use crate::client::RecordClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Confirmation, PetRecord, RecordForm};

#[derive(Debug)]
pub struct Session<T> {
    client: RecordClient,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(client: RecordClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &RecordClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn create(&mut self, form: &RecordForm) -> Result<Confirmation, ApiError> {
        let req = self.client.build_create_record(form)?;
        let resp = self.transport.execute(req)?;
        self.client.parse_create_record(resp)
    }

    pub fn list(&mut self) -> Result<Vec<PetRecord>, ApiError> {
        let resp = self.transport.execute(self.client.build_list_records())?;
        self.client.parse_list_records(resp)
    }

    pub fn get(&mut self, id: &str) -> Result<Option<PetRecord>, ApiError> {
        let resp = self.transport.execute(self.client.build_get_record(id))?;
        self.client.parse_get_record(resp)
    }

    pub fn update(&mut self, id: &str, form: &RecordForm) -> Result<Confirmation, ApiError> {
        let req = self.client.build_update_record(id, form)?;
        let resp = self.transport.execute(req)?;
        self.client.parse_update_record(resp)
    }

    pub fn delete(&mut self, id: &str) -> Result<Confirmation, ApiError> {
        let resp = self.transport.execute(self.client.build_delete_record(id))?;
        self.client.parse_delete_record(resp)
    }
}
