//! Dashboard page
//!
//! Server-rendered HTML for the single dashboard page: record table,
//! problem chart and the entry form.

use std::fmt::Write;

use crate::records::{OptionCatalog, Record, RecordForm, SelectField, COLUMNS, FORM_CATEGORIES};
use crate::report::{escape_html, problem_counts, render_bar_chart_svg};

/// Message shown after a successful submission
pub const ADDED_MESSAGE: &str = "Record added successfully!";

/// Shown in place of the table when there is nothing to list
pub const NO_DATA_MESSAGE: &str = "No data available.";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 1200px; padding: 0 1rem; color: #222; }
h1 { margin-top: 2.5rem; }
.table-wrap { overflow-x: auto; max-height: 420px; border: 1px solid #ddd; }
table { border-collapse: collapse; font-size: 0.85rem; width: 100%; }
th, td { padding: 0.3rem 0.6rem; border-bottom: 1px solid #eee; white-space: nowrap; text-align: left; }
th { background: #f6f6f6; position: sticky; top: 0; }
.notice { padding: 0.7rem 1rem; border-radius: 6px; margin: 0.8rem 0; }
.notice.error { background: #fdecea; color: #8a1c1c; }
.notice.warning { background: #fff6e0; color: #7a5400; }
.notice.success { background: #e8f5e9; color: #1b5e20; }
form { display: grid; grid-template-columns: 12rem 1fr; gap: 0.6rem 1rem; max-width: 40rem; }
form h2 { grid-column: 1 / -1; }
form button { grid-column: 2; justify-self: start; padding: 0.5rem 1.4rem; }
"#;

/// Banner shown above the page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Everything the dashboard page displays
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub title: String,
    pub form_title: String,
    pub records: Vec<Record>,
    pub options: OptionCatalog,
    /// Failures while fetching records or options
    pub load_errors: Vec<String>,
    /// Values pre-filled in the entry form
    pub form: RecordForm,
    /// Outcome of the last submission, if any
    pub notice: Option<Notice>,
}

impl DashboardView {
    /// Render the full HTML document
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(16 * 1024);
        let _ = write!(
            html,
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{}</title><style>{}</style></head><body>",
            escape_html(&self.title),
            STYLE
        );

        if let Some(notice) = &self.notice {
            let (class, text) = match notice {
                Notice::Success(text) => ("success", text),
                Notice::Error(text) => ("error", text),
            };
            let _ = write!(
                html,
                r#"<div class="notice {class}" role="status">{}</div>"#,
                escape_html(text)
            );
        }

        for error in &self.load_errors {
            let _ = write!(
                html,
                r#"<div class="notice error">{}</div>"#,
                escape_html(error)
            );
        }

        let _ = write!(html, "<h1>{}</h1>", escape_html(&self.title));
        self.render_records(&mut html);

        let _ = write!(html, "<h1>{}</h1>", escape_html(&self.form_title));
        self.render_form(&mut html);

        html.push_str("</body></html>");
        html
    }

    fn render_records(&self, html: &mut String) {
        if self.records.is_empty() {
            let _ = write!(html, r#"<div class="notice warning">{NO_DATA_MESSAGE}</div>"#);
            return;
        }

        html.push_str(r#"<h2>All Records</h2><p><a href="/api/v1/export?format=csv">Download CSV</a></p>"#);
        html.push_str(r#"<div class="table-wrap"><table><thead><tr>"#);
        for column in COLUMNS {
            let _ = write!(html, "<th>{}</th>", escape_html(column));
        }
        html.push_str("</tr></thead><tbody>");
        for record in &self.records {
            html.push_str("<tr>");
            for cell in record.cells() {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");

        html.push_str("<h2>Problem Overview</h2>");
        html.push_str(&render_bar_chart_svg(&problem_counts(&self.records)));
    }

    fn render_form(&self, html: &mut String) {
        let form = &self.form;
        html.push_str(r#"<form method="post" action="/records"><h2>Fill in the record:</h2>"#);

        for field in &FORM_CATEGORIES[..4] {
            self.render_select(html, field);
        }

        render_input(html, "date", "Work date", "date", &form.date, "");
        render_input(html, "start", "Start time", "time", &form.start, "");
        render_input(html, "end", "End time", "time", &form.end, "");

        for field in &FORM_CATEGORIES[4..7] {
            self.render_select(html, field);
        }

        render_input(
            html,
            "quantity",
            "Quantity",
            "number",
            &form.quantity,
            r#" min="0" step="1""#,
        );

        self.render_select(html, &FORM_CATEGORIES[7]);

        html.push_str(r#"<button type="submit">Add Record</button></form>"#);
    }

    fn render_select(&self, html: &mut String, field: &SelectField) {
        let selected = self.form.selection(field.category);
        let mut choices = self.options.choices(field.category);
        // Keep a submitted value visible even if the catalog no longer has it
        if !choices.iter().any(|c| c == selected) {
            choices.push(selected.to_string());
        }

        let _ = write!(
            html,
            r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">"#,
            name = field.name,
            label = escape_html(field.label)
        );
        for choice in &choices {
            let value = escape_html(choice);
            let marker = if choice == selected { " selected" } else { "" };
            let _ = write!(html, r#"<option value="{value}"{marker}>{value}</option>"#);
        }
        html.push_str("</select>");
    }
}

fn render_input(html: &mut String, name: &str, label: &str, kind: &str, value: &str, extra: &str) {
    let _ = write!(
        html,
        r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" type="{kind}" value="{value}"{extra} required>"#,
        label = escape_html(label),
        value = escape_html(value)
    );
}
