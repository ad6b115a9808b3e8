//! Selectable form values
//!
//! The backend publishes one list per category. Every list gets an empty
//! entry prepended so that a fresh form starts with nothing selected.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A select field on the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectField {
    /// Backend option category
    pub category: &'static str,
    /// Label shown next to the select
    pub label: &'static str,
    /// Form field name
    pub name: &'static str,
}

const fn field(category: &'static str, label: &'static str, name: &'static str) -> SelectField {
    SelectField {
        category,
        label,
        name,
    }
}

/// Select fields of the entry form, in display order
pub const FORM_CATEGORIES: [SelectField; 8] = [
    field("BU", "BU", "bu"),
    field("Line", "Line", "line"),
    field("Produk", "Product", "product"),
    field("Mesin", "Machine", "machine"),
    field("Masalah", "Problem", "problem"),
    field("Tindakan Perbaikan", "Repair action", "action"),
    field("Deskripsi", "Spare part", "description"),
    field("PIC", "PIC", "pic"),
];

/// Category name -> selectable values (first value is always `""`)
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OptionCatalog {
    categories: BTreeMap<String, Vec<String>>,
}

impl OptionCatalog {
    /// Wrap backend lists, prepending the empty default to each
    pub fn from_backend(lists: BTreeMap<String, Vec<String>>) -> Self {
        let categories = lists
            .into_iter()
            .map(|(name, mut values)| {
                values.insert(0, String::new());
                (name, values)
            })
            .collect();
        Self { categories }
    }

    /// Parse the backend's JSON object; non-array categories are dropped
    pub fn from_json(value: &Value) -> Self {
        let mut lists = BTreeMap::new();
        if let Value::Object(map) = value {
            for (name, entries) in map {
                match entries {
                    Value::Array(items) => {
                        let values = items
                            .iter()
                            .map(|v| match v {
                                Value::String(s) => s.clone(),
                                Value::Null => String::new(),
                                other => other.to_string(),
                            })
                            .collect();
                        lists.insert(name.clone(), values);
                    }
                    _ => {
                        tracing::warn!(category = %name, "Ignoring option category that is not a list");
                    }
                }
            }
        }
        Self::from_backend(lists)
    }

    /// Values for a category, or just the empty default when unknown
    pub fn choices(&self, category: &str) -> Vec<String> {
        self.categories
            .get(category)
            .cloned()
            .unwrap_or_else(|| vec![String::new()])
    }

    /// True when the backend sent no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Categories with their choices, in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter()
    }
}
