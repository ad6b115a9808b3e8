//! Problem tallies

use serde::Serialize;

use crate::records::Record;

/// Label used for rows with no problem text
pub const BLANK_LABEL: &str = "(blank)";

/// Number of records per problem
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProblemCount {
    pub problem: String,
    pub count: usize,
}

/// Count records per problem, most frequent first.
///
/// Ties keep the order in which the problems first appear.
pub fn problem_counts(records: &[Record]) -> Vec<ProblemCount> {
    let mut counts: Vec<ProblemCount> = Vec::new();

    for record in records {
        let label = if record.problem.trim().is_empty() {
            BLANK_LABEL
        } else {
            record.problem.as_str()
        };
        match counts.iter_mut().find(|c| c.problem == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(ProblemCount {
                problem: label.to_string(),
                count: 1,
            }),
        }
    }

    // Stable sort preserves first-appearance order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
