//! Reason-text composition for bomb scores.
//!
//! Each scoring signal contributes a [`ReasonClause`]. Clauses are applied in
//! ascending `priority` order, and the mode of each clause decides how it
//! interacts with whatever text is already there:
//!
//! | Mode        | Empty reason | Non-empty reason          |
//! |-------------|--------------|---------------------------|
//! | `Overwrite` | set          | replace                   |
//! | `Append`    | set          | append `", " + text`      |
//! | `Set`       | set          | leave unchanged           |
//!
//! Deadline proximity and the overdue override overwrite, everything else
//! appends, and the "On track" fallback only fills an empty reason. The last
//! overwriting clause to fire therefore wins over anything before it.

use serde::{Deserialize, Serialize};

/// How a clause combines with the reason built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonMode {
    Set,
    Append,
    Overwrite,
}

/// One candidate contribution to the reason text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonClause {
    /// Evaluation order; lower runs first
    pub priority: u8,
    pub triggered: bool,
    pub text: String,
    pub mode: ReasonMode,
}

impl ReasonClause {
    pub fn new(priority: u8, triggered: bool, text: impl Into<String>, mode: ReasonMode) -> Self {
        Self {
            priority,
            triggered,
            text: text.into(),
            mode,
        }
    }

    fn apply_to(&self, reason: &mut String) {
        if !self.triggered {
            return;
        }
        match self.mode {
            ReasonMode::Overwrite => {
                reason.clear();
                reason.push_str(&self.text);
            }
            ReasonMode::Append => {
                if !reason.is_empty() {
                    reason.push_str(", ");
                }
                reason.push_str(&self.text);
            }
            ReasonMode::Set => {
                if reason.is_empty() {
                    reason.push_str(&self.text);
                }
            }
        }
    }
}

/// Fold clauses into the final reason text.
///
/// Sorting is stable, so clauses sharing a priority keep their insertion order.
pub fn compose_reason(clauses: &[ReasonClause]) -> String {
    let mut ordered: Vec<&ReasonClause> = clauses.iter().collect();
    ordered.sort_by_key(|c| c.priority);

    let mut reason = String::new();
    for clause in ordered {
        clause.apply_to(&mut reason);
    }
    reason
}
