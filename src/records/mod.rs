//! Maintenance Records
//!
//! Typed view over the spreadsheet rows and the submission form:
//!
//! - **types**: `Record` rows and the `COLUMNS` header layout
//! - **options**: `OptionCatalog` of selectable form values
//! - **form**: `NewRecord` submissions, validation and wire payload
//! - **error**: Error types

pub mod error;
pub mod form;
pub mod options;
pub mod types;

pub use error::{RecordError, RecordResult};
pub use form::{parse_time_of_day, AddDataPayload, NewRecord, RecordForm, END_BEFORE_START};
pub use options::{OptionCatalog, SelectField, FORM_CATEGORIES};
pub use types::{Record, COLUMNS, PROBLEM_COLUMN};
