//! In-process record store
//!
//! Keeps rows in memory with the same reply semantics as the web app.
//! Selected with a `memory:` backend URL.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{RecordStore, SheetsError};
use crate::records::{NewRecord, OptionCatalog, Record};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    options: BTreeMap<String, Vec<String>>,
    /// Reject appends with this message when set
    reject_with: Option<String>,
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn demo_row(id: &str, machine: &str, date: &str, start: &str, end: &str, problem: &str) -> Record {
    Record {
        id: id.to_string(),
        bu: "Food".to_string(),
        line: "Line 1".to_string(),
        product: "Biscuit".to_string(),
        machine: machine.to_string(),
        date: date.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        problem: problem.to_string(),
        action: "Clean".to_string(),
        quantity: "1".to_string(),
        pic: "Budi".to_string(),
        ..Default::default()
    }
}

impl MemoryStore {
    pub fn new(records: Vec<Record>, options: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            records: RwLock::new(records),
            options,
            reject_with: None,
        }
    }

    /// Store preloaded with a few rows and option lists
    pub fn with_demo_data() -> Self {
        let mut options = BTreeMap::new();
        options.insert("BU".to_string(), list(&["Food", "Beverage"]));
        options.insert("Line".to_string(), list(&["Line 1", "Line 2"]));
        options.insert("Produk".to_string(), list(&["Biscuit", "Wafer"]));
        options.insert("Mesin".to_string(), list(&["Oven A", "Mixer B", "Packer C"]));
        options.insert("Masalah".to_string(), list(&["Overheat", "Leak", "Jam"]));
        options.insert(
            "Tindakan Perbaikan".to_string(),
            list(&["Replace part", "Clean", "Adjust"]),
        );
        options.insert("Deskripsi".to_string(), list(&["Fan 220V", "O-ring", "Belt"]));
        options.insert("PIC".to_string(), list(&["Budi", "Sari"]));

        let records = vec![
            demo_row("1", "Oven A", "2024-05-01", "08:00", "09:00", "Overheat"),
            demo_row("2", "Mixer B", "2024-05-01", "13:00", "13:40", "Jam"),
            demo_row("3", "Oven A", "2024-05-02", "07:30", "08:15", "Overheat"),
        ];

        Self::new(records, options)
    }

    /// Make every append fail with the given message
    pub fn rejecting(mut self, message: impl Into<String>) -> Self {
        self.reject_with = Some(message.into());
        self
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_records(&self) -> Result<Vec<Record>, SheetsError> {
        Ok(self.records.read().await.clone())
    }

    async fn fetch_options(&self) -> Result<OptionCatalog, SheetsError> {
        Ok(OptionCatalog::from_backend(self.options.clone()))
    }

    async fn append_record(&self, record: &NewRecord) -> Result<(), SheetsError> {
        if let Some(message) = &self.reject_with {
            return Err(SheetsError::Rejected(message.clone()));
        }

        let mut records = self.records.write().await;
        let payload = record.to_payload();
        let id = (records.len() + 1).to_string();
        records.push(Record {
            id,
            bu: payload.bu.to_string(),
            line: payload.line.to_string(),
            product: payload.product.to_string(),
            machine: payload.machine.to_string(),
            date: payload.date,
            start: payload.start,
            end: payload.end,
            problem: payload.problem.to_string(),
            action: payload.action_taken.to_string(),
            description: payload.description.to_string(),
            quantity: payload.quantity.to_string(),
            pic: payload.pic.to_string(),
            approval: String::new(),
            acknowledged: String::new(),
        });
        Ok(())
    }

    async fn health_check(&self) -> Result<(), SheetsError> {
        Ok(())
    }
}
