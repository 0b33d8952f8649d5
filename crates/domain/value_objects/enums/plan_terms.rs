use std::fmt::Display;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Billing term attached to a plan identifier.
///
/// Unrecognised identifiers (including an empty one) resolve to
/// [`PlanTerm::Monthly`]; callers rely on this never failing.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanTerm {
    #[default]
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "2months")]
    TwoMonths,
    #[serde(rename = "annual")]
    Annual,
}

impl PlanTerm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlanTerm::Monthly => "monthly",
            PlanTerm::TwoMonths => "2months",
            PlanTerm::Annual => "annual",
        }
    }

    pub fn from_plan_id(plan_id: &str) -> Self {
        match plan_id {
            "monthly" => PlanTerm::Monthly,
            "2months" => PlanTerm::TwoMonths,
            "annual" => PlanTerm::Annual,
            _ => PlanTerm::Monthly,
        }
    }

    pub const fn months(&self) -> u32 {
        match self {
            PlanTerm::Monthly => 1,
            PlanTerm::TwoMonths => 2,
            PlanTerm::Annual => 12,
        }
    }

    /// Calendar-aware: days past the end of the target month clamp to its last day.
    pub fn end_date_from(&self, start_date: DateTime<Utc>) -> DateTime<Utc> {
        start_date
            .checked_add_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Display for PlanTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn compute_end_date(plan_id: &str, start_date: DateTime<Utc>) -> DateTime<Utc> {
    PlanTerm::from_plan_id(plan_id).end_date_from(start_date)
}
