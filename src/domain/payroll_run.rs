use super::money::Money;
use super::payroll::PayrollBreakdown;
use crate::error::{AdminError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One approved payroll run, kept as an audit record.
///
/// Fields are private and there is no `Deserialize`, so [`aggregate`] is the
/// only way to build a run and its totals always match its breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollRun {
    id: Uuid,
    run_at: DateTime<Utc>,
    approved_by: String,
    breakdowns: Vec<PayrollBreakdown>,
    total_nett_pay: Money,
    total_cost: Money,
}

impl PayrollRun {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn run_at(&self) -> DateTime<Utc> {
        self.run_at
    }

    pub fn approved_by(&self) -> &str {
        &self.approved_by
    }

    pub fn breakdowns(&self) -> &[PayrollBreakdown] {
        &self.breakdowns
    }

    pub fn total_nett_pay(&self) -> Money {
        self.total_nett_pay
    }

    pub fn total_cost(&self) -> Money {
        self.total_cost
    }
}

/// Totals `breakdowns` into a new run, keeping them in the order given.
pub fn aggregate(
    breakdowns: Vec<PayrollBreakdown>,
    approved_by: impl Into<String>,
    run_at: DateTime<Utc>,
) -> Result<PayrollRun> {
    let total_nett_pay = Money::checked_total(breakdowns.iter().map(|b| b.nett_pay))
        .ok_or_else(|| AdminError::TotalOverflow("nett pay of payroll run".to_string()))?;
    let total_cost = Money::checked_total(breakdowns.iter().map(|b| b.employer_cost))
        .ok_or_else(|| AdminError::TotalOverflow("cost of payroll run".to_string()))?;

    Ok(PayrollRun {
        id: Uuid::new_v4(),
        run_at,
        approved_by: approved_by.into(),
        breakdowns,
        total_nett_pay,
        total_cost,
    })
}
