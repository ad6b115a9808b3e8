//! Core record types
//!
//! A `Record` mirrors one row of the maintenance sheet. The backend sends rows
//! either positionally (an array of 15 cells) or keyed by header label; both
//! are flattened into display text here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{RecordError, RecordResult};

/// Sheet header labels, in column order
pub const COLUMNS: [&str; 15] = [
    "ID",
    "BU",
    "Line",
    "Produk",
    "Mesin",
    "Tanggal",
    "Mulai",
    "Selesai",
    "Masalah",
    "Tindakan",
    "Deskripsi",
    "Quantity",
    "PIC",
    "Approval",
    "Mengetahui",
];

/// Column the problem chart is grouped by
pub const PROBLEM_COLUMN: &str = "Masalah";

/// One maintenance log row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "ID")]
    pub id: String,
    /// Business unit
    #[serde(rename = "BU")]
    pub bu: String,
    #[serde(rename = "Line")]
    pub line: String,
    #[serde(rename = "Produk")]
    pub product: String,
    #[serde(rename = "Mesin")]
    pub machine: String,
    /// Work date as sent by the sheet
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "Mulai")]
    pub start: String,
    #[serde(rename = "Selesai")]
    pub end: String,
    #[serde(rename = "Masalah")]
    pub problem: String,
    /// Repair action taken
    #[serde(rename = "Tindakan")]
    pub action: String,
    /// Spare-part description
    #[serde(rename = "Deskripsi")]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    /// Person in charge
    #[serde(rename = "PIC")]
    pub pic: String,
    #[serde(rename = "Approval")]
    pub approval: String,
    /// Acknowledged by
    #[serde(rename = "Mengetahui")]
    pub acknowledged: String,
}

impl Record {
    /// Build a record from a backend row (array or header-keyed object)
    pub fn from_row(row: &Value) -> RecordResult<Self> {
        let cells: Vec<String> = match row {
            Value::Array(items) => {
                if items.len() != COLUMNS.len() {
                    return Err(RecordError::MalformedRow(format!(
                        "expected {} cells, got {}",
                        COLUMNS.len(),
                        items.len()
                    )));
                }
                items.iter().map(cell_text).collect()
            }
            Value::Object(map) => COLUMNS
                .iter()
                .map(|col| map.get(*col).map(cell_text).unwrap_or_default())
                .collect(),
            other => {
                return Err(RecordError::MalformedRow(format!(
                    "expected array or object, got {}",
                    json_kind(other)
                )))
            }
        };

        Ok(Self::from_cells(cells))
    }

    fn from_cells(cells: Vec<String>) -> Self {
        let mut it = cells.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            id: next(),
            bu: next(),
            line: next(),
            product: next(),
            machine: next(),
            date: next(),
            start: next(),
            end: next(),
            problem: next(),
            action: next(),
            description: next(),
            quantity: next(),
            pic: next(),
            approval: next(),
            acknowledged: next(),
        }
    }

    /// Cells in `COLUMNS` order
    pub fn cells(&self) -> [&str; 15] {
        [
            &self.id,
            &self.bu,
            &self.line,
            &self.product,
            &self.machine,
            &self.date,
            &self.start,
            &self.end,
            &self.problem,
            &self.action,
            &self.description,
            &self.quantity,
            &self.pic,
            &self.approval,
            &self.acknowledged,
        ]
    }

    /// Look up a cell by header label
    pub fn cell(&self, column: &str) -> Option<&str> {
        COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|idx| self.cells()[idx])
    }
}

/// Render a JSON cell the way it appears in the sheet
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
