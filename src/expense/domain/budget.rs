//! Budget line a part of an expense is charged to.

use crate::authz::domain::CommitteeName;
use serde::{Deserialize, Serialize};

/// Position in the organisation's budget: committee, cost centre, and line.
///
/// Identifiers come from the external budget system and default to zero when
/// unknown. The committee name is what attest and accounting roles match on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Budget system committee identifier.
    #[serde(default)]
    pub committee_id: i32,
    /// Committee display name.
    #[serde(default)]
    pub committee_name: String,
    /// Budget system cost centre identifier.
    #[serde(default)]
    pub cost_centre_id: i32,
    /// Cost centre display name.
    #[serde(default)]
    pub cost_centre_name: String,
    /// Budget system budget line identifier.
    #[serde(default)]
    pub budget_line_id: i32,
    /// Budget line display name.
    #[serde(default)]
    pub budget_line_name: String,
}

impl BudgetLine {
    /// Creates a budget line with names only.
    #[must_use]
    pub fn named(
        committee_name: impl Into<String>,
        cost_centre_name: impl Into<String>,
        budget_line_name: impl Into<String>,
    ) -> Self {
        Self {
            committee_name: committee_name.into(),
            cost_centre_name: cost_centre_name.into(),
            budget_line_name: budget_line_name.into(),
            ..Self::default()
        }
    }

    /// Returns the normalised committee key, or `None` when unnamed.
    #[must_use]
    pub fn committee(&self) -> Option<CommitteeName> {
        CommitteeName::parse(&self.committee_name)
    }
}
