use crate::domain::budget::{Budget, BudgetUsage};
use crate::domain::money::Money;
use crate::domain::payroll::PayrollBreakdown;
use crate::domain::procurement::{BudgetId, ProcurementRequest, RequestId};
use crate::domain::staff::{RateCardId, StaffId};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes rows of any serializable type as CSV, header first.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RowWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_rows<T: Serialize>(&mut self, rows: impl IntoIterator<Item = T>) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Output shape of one payroll breakdown. Amounts are shown without
/// trailing zeros.
#[derive(Debug, Serialize)]
pub struct PayrollRow {
    pub teacher: StaffId,
    pub name: String,
    pub rate_card: RateCardId,
    pub base_salary: Money,
    pub variable_pay: Money,
    pub total_earnings: Money,
    pub tax: Money,
    pub other_deductions: Money,
    pub total_deductions: Money,
    pub nett_pay: Money,
    pub employer_cost: Money,
}

impl From<&PayrollBreakdown> for PayrollRow {
    fn from(b: &PayrollBreakdown) -> Self {
        Self {
            teacher: b.teacher_id,
            name: b.teacher_name.clone(),
            rate_card: b.rate_card_id,
            base_salary: b.base_salary.normalized(),
            variable_pay: b.variable_pay.normalized(),
            total_earnings: b.total_earnings.normalized(),
            tax: b.tax.normalized(),
            other_deductions: b.other_deductions.normalized(),
            total_deductions: b.total_deductions.normalized(),
            nett_pay: b.nett_pay.normalized(),
            employer_cost: b.employer_cost.normalized(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestRow {
    pub request: RequestId,
    pub requester: StaffId,
    pub item: String,
    pub amount: Money,
    pub budget: BudgetId,
    pub status: &'static str,
    pub current_approver: Option<StaffId>,
    pub history_entries: usize,
    pub last_stage: String,
}

impl From<&ProcurementRequest> for RequestRow {
    fn from(request: &ProcurementRequest) -> Self {
        Self {
            request: request.id,
            requester: request.requester_id,
            item: request.item.clone(),
            amount: Money::from(request.amount).normalized(),
            budget: request.budget_id,
            status: request.status.label(),
            current_approver: request.current_approver(),
            history_entries: request.history().len(),
            last_stage: request
                .history()
                .last()
                .map(|entry| entry.stage.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BudgetRow {
    pub budget: BudgetId,
    pub name: String,
    pub total: Money,
    pub spent: Money,
    pub remaining: Money,
}

impl BudgetRow {
    pub fn new(budget: &Budget, usage: BudgetUsage) -> Self {
        Self {
            budget: budget.id,
            name: budget.name.clone(),
            total: budget.total.normalized(),
            spent: usage.spent.normalized(),
            remaining: usage.remaining.normalized(),
        }
    }
}
