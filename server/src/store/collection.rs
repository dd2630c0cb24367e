use indexmap::IndexMap;

use super::StoreError;
use crate::record::{PetRecord, RecordId, RecordInput};

/// Pet record documents keyed by id, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    records: IndexMap<RecordId, PetRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<PetRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, input: RecordInput) -> Result<PetRecord, StoreError> {
        let fields = input.into_new_fields()?;
        let record = PetRecord::from_fields(RecordId::new(), fields);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn list(&self) -> Vec<PetRecord> {
        self.records.values().cloned().collect()
    }

    pub fn find(&self, id: &str) -> Result<Option<PetRecord>, StoreError> {
        let id = RecordId::parse(id)?;
        Ok(self.records.get(&id).cloned())
    }

    pub fn replace(
        &mut self,
        id: &str,
        input: RecordInput,
    ) -> Result<Option<PetRecord>, StoreError> {
        let id = RecordId::parse(id)?;
        let fields = input.into_replacement_fields()?;
        let Some(slot) = self.records.get_mut(&id) else {
            return Ok(None);
        };
        let previous = std::mem::replace(slot, PetRecord::from_fields(id, fields));
        Ok(Some(previous))
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<PetRecord>, StoreError> {
        let id = RecordId::parse(id)?;
        Ok(self.records.shift_remove(&id))
    }
}
