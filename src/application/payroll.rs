use crate::domain::payroll::{RateCard, Workload, compute};
use crate::domain::payroll_run::{PayrollRun, aggregate};
use crate::domain::ports::PayrollRunStoreBox;
use crate::domain::staff::{RateCardId, StaffMember};
use crate::error::{AdminError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Runs payroll over a snapshot of staff and rate cards and keeps every
/// approved run as an audit record.
pub struct PayrollService {
    runs: PayrollRunStoreBox,
}

impl PayrollService {
    pub fn new(runs: PayrollRunStoreBox) -> Self {
        Self { runs }
    }

    /// Computes pay for every member with a rate card, in `staff` order.
    ///
    /// Members without a rate card are skipped. A member whose rate card id
    /// is not in `rate_cards` fails the whole run, as does any invalid card,
    /// invalid workload or pay too large to compute, and nothing is recorded.
    pub async fn run(
        &self,
        staff: &[StaffMember],
        rate_cards: &[RateCard],
        approved_by: &str,
        run_at: DateTime<Utc>,
    ) -> Result<PayrollRun> {
        let mut cards: HashMap<RateCardId, &RateCard> = HashMap::with_capacity(rate_cards.len());
        for card in rate_cards {
            card.validate()?;
            cards.insert(card.id, card);
        }

        let mut breakdowns = Vec::new();
        for member in staff {
            let Some(card_id) = member.rate_card_id else {
                debug!(teacher = member.id, "no rate card, excluded from payroll");
                continue;
            };
            let card = cards.get(&card_id).copied().ok_or(AdminError::MissingRateCard {
                teacher: member.id,
                rate_card: card_id,
            })?;

            let workload = Workload::try_from(member)?;
            if let Some(breakdown) = compute(member, Some(card), &workload)? {
                breakdowns.push(breakdown);
            }
        }

        let run = aggregate(breakdowns, approved_by, run_at)?;
        info!(
            run = %run.id(),
            teachers = run.breakdowns().len(),
            total_nett_pay = %run.total_nett_pay(),
            total_cost = %run.total_cost(),
            "payroll run approved"
        );

        self.runs.append(run.clone()).await?;
        Ok(run)
    }

    /// Every run recorded so far, oldest first.
    pub async fn history(&self) -> Result<Vec<PayrollRun>> {
        self.runs.get_all().await
    }
}
