use super::money::Money;
use super::procurement::{BudgetId, ProcurementRequest, RequestStatus};
use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,
    pub total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub spent: Money,
    pub remaining: Money,
}

impl Budget {
    /// Spending against this budget, counting every request that has not been
    /// denied. Recomputed from `requests` on every call.
    pub fn usage<'a>(
        &self,
        requests: impl IntoIterator<Item = &'a ProcurementRequest>,
    ) -> Result<BudgetUsage> {
        let overflow = || AdminError::TotalOverflow(format!("spent on budget {}", self.id));
        let spent = Money::checked_total(
            requests
                .into_iter()
                .filter(|request| request.budget_id == self.id)
                .filter(|request| request.status != RequestStatus::Denied)
                .map(|request| Money::from(request.amount)),
        )
        .ok_or_else(overflow)?;
        let remaining = self.total.checked_sub(spent).ok_or_else(overflow)?;

        Ok(BudgetUsage { spent, remaining })
    }
}
