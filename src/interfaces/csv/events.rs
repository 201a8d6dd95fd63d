use crate::application::procurement::ProcurementCommand;
use crate::domain::money::Amount;
use crate::domain::procurement::{BudgetId, Decision, RequestDraft, RequestId};
use crate::domain::staff::StaffId;
use crate::error::AdminError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Submit,
    Decide,
}

/// One row of a procurement event log.
///
/// `submit` rows carry the request details and `actor` is the requester;
/// `decide` rows carry only the decision.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EventRecord {
    pub r#type: EventType,
    pub request: RequestId,
    pub actor: StaffId,
    pub timestamp: DateTime<Utc>,
    pub decision: Option<Decision>,
    pub item: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub vendor: Option<String>,
    pub budget: Option<BudgetId>,
}

fn missing(record: &EventRecord, field: &str) -> AdminError {
    AdminError::InvalidEvent(format!(
        "{:?} event for request {} is missing '{field}'",
        record.r#type, record.request
    ))
}

impl TryFrom<EventRecord> for ProcurementCommand {
    type Error = AdminError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        match record.r#type {
            EventType::Submit => {
                let item = record.item.clone().ok_or_else(|| missing(&record, "item"))?;
                let amount = record.amount.ok_or_else(|| missing(&record, "amount"))?;
                let budget_id = record.budget.ok_or_else(|| missing(&record, "budget"))?;

                Ok(ProcurementCommand::Submit {
                    draft: RequestDraft {
                        id: record.request,
                        requester_id: record.actor,
                        item,
                        category: record.category.unwrap_or_default(),
                        amount: Amount::new(amount)?,
                        vendor: record.vendor.unwrap_or_default(),
                        budget_id,
                    },
                    timestamp: record.timestamp,
                })
            }
            EventType::Decide => {
                let decision = record.decision.ok_or_else(|| missing(&record, "decision"))?;
                Ok(ProcurementCommand::Decide {
                    request_id: record.request,
                    actor_id: record.actor,
                    decision,
                    timestamp: record.timestamp,
                })
            }
        }
    }
}
