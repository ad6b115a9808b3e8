//! Record submission
//!
//! `RecordForm` is the raw text a user submitted (HTML form or JSON body).
//! `NewRecord` is the parsed, typed submission that can be validated and
//! turned into the backend's `add_data` payload.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::error::{RecordError, RecordResult};

/// Message shown when the time window is empty or inverted
pub const END_BEFORE_START: &str = "End time must be later than start time.";

/// Raw submitted fields, kept as text so a rejected form can be re-displayed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordForm {
    pub bu: String,
    pub line: String,
    pub product: String,
    pub machine: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub problem: String,
    pub action: String,
    pub description: String,
    /// Accepted as text or as a JSON number
    #[serde(deserialize_with = "text_or_number")]
    pub quantity: String,
    pub pic: String,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextOrNumber;

    impl<'de> serde::de::Visitor<'de> for TextOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextOrNumber)
}

impl RecordForm {
    /// Blank form with date and both times set to `now`
    pub fn fresh(now: NaiveDateTime) -> Self {
        let time = now.format("%H:%M").to_string();
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            start: time.clone(),
            end: time,
            quantity: "0".to_string(),
            ..Default::default()
        }
    }

    /// Value of a select field by its backend category name
    pub fn selection(&self, category: &str) -> &str {
        match category {
            "BU" => &self.bu,
            "Line" => &self.line,
            "Produk" => &self.product,
            "Mesin" => &self.machine,
            "Masalah" => &self.problem,
            "Tindakan Perbaikan" => &self.action,
            "Deskripsi" => &self.description,
            "PIC" => &self.pic,
            _ => "",
        }
    }
}

/// A parsed maintenance record ready to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub bu: String,
    pub line: String,
    pub product: String,
    pub machine: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub problem: String,
    pub action: String,
    pub description: String,
    pub quantity: u32,
    pub pic: String,
}

/// Body of the backend `add_data` call
#[derive(Debug, Serialize)]
pub struct AddDataPayload<'a> {
    pub action: &'static str,
    #[serde(rename = "BU")]
    pub bu: &'a str,
    #[serde(rename = "Line")]
    pub line: &'a str,
    #[serde(rename = "Produk")]
    pub product: &'a str,
    #[serde(rename = "Mesin")]
    pub machine: &'a str,
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "Mulai")]
    pub start: String,
    #[serde(rename = "Selesai")]
    pub end: String,
    #[serde(rename = "Masalah")]
    pub problem: &'a str,
    #[serde(rename = "Tindakan")]
    pub action_taken: &'a str,
    #[serde(rename = "Deskripsi")]
    pub description: &'a str,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "PIC")]
    pub pic: &'a str,
}

impl NewRecord {
    /// Parse submitted text into typed fields
    pub fn parse(form: &RecordForm) -> RecordResult<Self> {
        let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d").map_err(|_| {
            RecordError::InvalidField {
                field: "date",
                value: form.date.clone(),
            }
        })?;

        let start = parse_time_of_day(&form.start).ok_or_else(|| RecordError::InvalidField {
            field: "start time",
            value: form.start.clone(),
        })?;
        let end = parse_time_of_day(&form.end).ok_or_else(|| RecordError::InvalidField {
            field: "end time",
            value: form.end.clone(),
        })?;

        let quantity = match form.quantity.trim() {
            "" => 0,
            q => q.parse::<u32>().map_err(|_| RecordError::InvalidField {
                field: "quantity",
                value: form.quantity.clone(),
            })?,
        };

        Ok(Self {
            bu: form.bu.clone(),
            line: form.line.clone(),
            product: form.product.clone(),
            machine: form.machine.clone(),
            date,
            start,
            end,
            problem: form.problem.clone(),
            action: form.action.clone(),
            description: form.description.clone(),
            quantity,
            pic: form.pic.clone(),
        })
    }

    /// Parse and validate in one step
    pub fn from_form(form: &RecordForm) -> RecordResult<Self> {
        let record = Self::parse(form)?;
        record.validate()?;
        Ok(record)
    }

    /// The end of the work window must come after its start
    pub fn validate(&self) -> RecordResult<()> {
        if self.end <= self.start {
            return Err(RecordError::Validation(END_BEFORE_START.to_string()));
        }
        Ok(())
    }

    /// Wire body for the backend
    pub fn to_payload(&self) -> AddDataPayload<'_> {
        AddDataPayload {
            action: "add_data",
            bu: &self.bu,
            line: &self.line,
            product: &self.product,
            machine: &self.machine,
            date: self.date.format("%Y-%m-%d").to_string(),
            start: self.start.format("%H:%M").to_string(),
            end: self.end.format("%H:%M").to_string(),
            problem: &self.problem,
            action_taken: &self.action,
            description: &self.description,
            quantity: self.quantity,
            pic: &self.pic,
        }
    }
}

/// Parse `HH:MM` or `HH:MM:SS`, dropping seconds
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let time = NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()?;
    time.with_second(0).and_then(|t| t.with_nanosecond(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(start: &str, end: &str) -> RecordForm {
        RecordForm {
            bu: "BU1".to_string(),
            machine: "Oven A".to_string(),
            date: "2024-05-02".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            problem: "Overheat".to_string(),
            quantity: "2".to_string(),
            pic: "Budi".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_after_start_accepted() {
        let record = NewRecord::from_form(&form("08:00", "09:30")).unwrap();
        assert_eq!(record.quantity, 2);
        assert_eq!(record.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn test_equal_times_rejected() {
        let err = NewRecord::from_form(&form("08:00", "08:00")).unwrap_err();
        assert_eq!(err, RecordError::Validation(END_BEFORE_START.to_string()));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = NewRecord::from_form(&form("14:00", "09:15")).unwrap_err();
        assert!(matches!(err, RecordError::Validation(_)));
    }

    #[test]
    fn test_seconds_ignored() {
        // Same minute on both sides is an empty window
        let err = NewRecord::from_form(&form("10:00:10", "10:00:50")).unwrap_err();
        assert!(matches!(err, RecordError::Validation(_)));

        assert_eq!(
            parse_time_of_day("07:45:59"),
            NaiveTime::from_hms_opt(7, 45, 0)
        );
        assert_eq!(parse_time_of_day("24:10"), None);
    }

    #[test]
    fn test_bad_fields_reported() {
        let mut bad = form("08:00", "09:00");
        bad.date = "02/05/2024".to_string();
        assert_eq!(
            NewRecord::parse(&bad).unwrap_err().to_string(),
            "Invalid date: 02/05/2024"
        );

        let mut bad = form("08:00", "09:00");
        bad.quantity = "-1".to_string();
        assert!(matches!(
            NewRecord::parse(&bad),
            Err(RecordError::InvalidField { field: "quantity", .. })
        ));
    }

    #[test]
    fn test_empty_quantity_is_zero() {
        let mut f = form("08:00", "09:00");
        f.quantity = String::new();
        assert_eq!(NewRecord::parse(&f).unwrap().quantity, 0);
    }

    #[test]
    fn test_payload_shape() {
        let record = NewRecord::from_form(&form("08:05:30", "09:30")).unwrap();
        let payload = serde_json::to_value(record.to_payload()).unwrap();

        assert_eq!(
            payload,
            json!({
                "action": "add_data",
                "BU": "BU1",
                "Line": "",
                "Produk": "",
                "Mesin": "Oven A",
                "Tanggal": "2024-05-02",
                "Mulai": "08:05",
                "Selesai": "09:30",
                "Masalah": "Overheat",
                "Tindakan": "",
                "Deskripsi": "",
                "Quantity": 2,
                "PIC": "Budi"
            })
        );
    }

    #[test]
    fn test_fresh_form_defaults() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(14, 7, 33)
            .unwrap();
        let fresh = RecordForm::fresh(now);

        assert_eq!(fresh.date, "2024-05-02");
        assert_eq!(fresh.start, "14:07");
        assert_eq!(fresh.end, "14:07");
        assert_eq!(fresh.quantity, "0");
        assert_eq!(fresh.bu, "");
        // Untouched times form an empty window
        assert!(NewRecord::from_form(&fresh).is_err());
    }

    #[test]
    fn test_quantity_text_or_number() {
        let form: RecordForm = serde_json::from_value(json!({"quantity": 4})).unwrap();
        assert_eq!(form.quantity, "4");

        let form: RecordForm = serde_json::from_value(json!({"quantity": "5"})).unwrap();
        assert_eq!(form.quantity, "5");

        let form: RecordForm = serde_json::from_value(json!({"machine": "Oven A"})).unwrap();
        assert_eq!(form.quantity, "");
    }

    #[test]
    fn test_selection_lookup() {
        let f = form("08:00", "09:00");
        assert_eq!(f.selection("Mesin"), "Oven A");
        assert_eq!(f.selection("Tindakan Perbaikan"), "");
        assert_eq!(f.selection("Unknown"), "");
    }
}
