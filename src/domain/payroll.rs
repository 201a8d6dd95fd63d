use super::money::Money;
use super::staff::{RateCardId, StaffId, StaffMember};
use crate::error::{AdminError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employer-side contributions added on top of earnings. Nothing is levied yet.
pub const EMPLOYER_CONTRIBUTIONS: Money = Money::ZERO;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardDeduction {
    pub label: String,
    pub amount: Money,
}

/// Pay policy shared by every teacher assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    pub id: RateCardId,
    #[serde(default)]
    pub name: String,
    pub base_salary: Money,
    pub rate_per_period: Money,
    pub rate_per_moderation_hour: Money,
    /// Percentage, 0 to 100.
    pub tax_percentage: Decimal,
    #[serde(default)]
    pub standard_deductions: Vec<StandardDeduction>,
}

/// Most decimal places accepted on any rate, percentage or counter.
///
/// Keeps every intermediate product in [`compute`] within the 28 decimal
/// places `Decimal` can hold.
pub const MAX_INPUT_SCALE: u32 = 6;

impl RateCard {
    pub fn validate(&self) -> Result<()> {
        let hundred = Decimal::ONE_HUNDRED;
        if self.tax_percentage < Decimal::ZERO || self.tax_percentage > hundred {
            return Err(AdminError::Validation(format!(
                "Rate card {} has tax percentage {} outside 0-100",
                self.id, self.tax_percentage
            )));
        }
        if self.tax_percentage.scale() > MAX_INPUT_SCALE {
            return Err(AdminError::Validation(format!(
                "Rate card {} has more than {MAX_INPUT_SCALE} decimal places in tax percentage",
                self.id
            )));
        }

        let rates = [
            ("base salary", self.base_salary),
            ("rate per period", self.rate_per_period),
            ("rate per moderation hour", self.rate_per_moderation_hour),
        ];
        for (label, value) in rates {
            if value < Money::ZERO {
                return Err(AdminError::Validation(format!(
                    "Rate card {} has negative {label}",
                    self.id
                )));
            }
            if value.0.scale() > MAX_INPUT_SCALE {
                return Err(AdminError::Validation(format!(
                    "Rate card {} has more than {MAX_INPUT_SCALE} decimal places in {label}",
                    self.id
                )));
            }
        }

        if let Some(deduction) = self.standard_deductions.iter().find(|deduction| {
            deduction.amount < Money::ZERO || deduction.amount.0.scale() > MAX_INPUT_SCALE
        }) {
            return Err(AdminError::Validation(format!(
                "Rate card {} has invalid deduction '{}' ({})",
                self.id, deduction.label, deduction.amount
            )));
        }

        Ok(())
    }
}

/// Usage counters that feed variable pay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Workload {
    pub periods_worked: Decimal,
    pub moderation_hours: Decimal,
}

impl TryFrom<&StaffMember> for Workload {
    type Error = AdminError;

    /// Missing counters count as zero. Negative or over-precise moderation
    /// hours are rejected.
    fn try_from(member: &StaffMember) -> Result<Self> {
        let moderation_hours = member.moderation_hours.unwrap_or_default();
        if moderation_hours < Decimal::ZERO {
            return Err(AdminError::Validation(format!(
                "Teacher {} has negative moderation hours {moderation_hours}",
                member.id
            )));
        }
        if moderation_hours.scale() > MAX_INPUT_SCALE {
            return Err(AdminError::Validation(format!(
                "Teacher {} has more than {MAX_INPUT_SCALE} decimal places in moderation hours",
                member.id
            )));
        }

        Ok(Self {
            periods_worked: member.periods_worked.map(Decimal::from).unwrap_or_default(),
            moderation_hours,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub teacher_id: StaffId,
    pub teacher_name: String,
    pub rate_card_id: RateCardId,
    pub base_salary: Money,
    pub variable_pay: Money,
    pub total_earnings: Money,
    pub tax: Money,
    pub other_deductions: Money,
    pub total_deductions: Money,
    pub nett_pay: Money,
    pub employer_cost: Money,
}

/// Derives a teacher's pay for one run.
///
/// Returns `Ok(None)` when no rate card applies; such teachers are simply not
/// paid through payroll. Values are unrounded and exact as long as inputs
/// stay within [`MAX_INPUT_SCALE`] decimal places and every intermediate
/// value fits in 28 significant digits; past that `Decimal` drops fractional
/// digits. A result outside the `Decimal` range is a `PayrollOverflow`.
pub fn compute(
    teacher: &StaffMember,
    rate_card: Option<&RateCard>,
    workload: &Workload,
) -> Result<Option<PayrollBreakdown>> {
    let Some(card) = rate_card else {
        return Ok(None);
    };

    breakdown(teacher, card, workload)
        .map(Some)
        .ok_or(AdminError::PayrollOverflow {
            teacher: teacher.id,
            rate_card: card.id,
        })
}

fn breakdown(teacher: &StaffMember, card: &RateCard, workload: &Workload) -> Option<PayrollBreakdown> {
    let variable_pay = card
        .rate_per_period
        .checked_times(workload.periods_worked)?
        .checked_add(card.rate_per_moderation_hour.checked_times(workload.moderation_hours)?)?;
    let total_earnings = card.base_salary.checked_add(variable_pay)?;
    let tax_rate = card.tax_percentage.checked_div(Decimal::ONE_HUNDRED)?;
    let tax = total_earnings.checked_times(tax_rate)?;
    let other_deductions =
        Money::checked_total(card.standard_deductions.iter().map(|deduction| deduction.amount))?;
    let total_deductions = tax.checked_add(other_deductions)?;

    Some(PayrollBreakdown {
        teacher_id: teacher.id,
        teacher_name: teacher.name.clone(),
        rate_card_id: card.id,
        base_salary: card.base_salary,
        variable_pay,
        total_earnings,
        tax,
        other_deductions,
        total_deductions,
        nett_pay: total_earnings.checked_sub(total_deductions)?,
        employer_cost: total_earnings.checked_add(EMPLOYER_CONTRIBUTIONS)?,
    })
}
