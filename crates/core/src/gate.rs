//! The gate check itself: does the pull request carry at least one
//! acceptable label.

use label_gate_developer_platforms::models::Label;

use crate::allowlist::AllowList;

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;

/// Returns true when at least one of the pull request's labels appears in
/// the allow-list. Comparison is exact string equality.
///
/// An empty label set or an empty allow-list never satisfies the gate.
pub fn evaluate(labels: &[Label], allow_list: &AllowList) -> bool {
    labels.iter().any(|label| allow_list.contains(&label.name))
}
