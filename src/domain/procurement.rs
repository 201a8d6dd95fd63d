use super::hierarchy::ApprovalChain;
use super::money::Amount;
use super::staff::StaffId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RequestId = u32;
pub type BudgetId = u32;

pub const SUBMISSION_STAGE: &str = "Submission";

/// A decision an approver can hand down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Denied,
}

/// Outcome recorded on a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Approved,
    Denied,
    Pending,
}

impl From<Decision> for EntryStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => EntryStatus::Approved,
            Decision::Denied => EntryStatus::Denied,
        }
    }
}

/// Workflow state of a request.
///
/// Only a pending request has a current approver. `Pending { approver: None }`
/// is the state of a request whose requester has nobody above them; the
/// requester closes it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RequestStatus {
    Pending { approver: Option<StaffId> },
    Approved,
    Denied,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending { .. })
    }

    pub fn current_approver(&self) -> Option<StaffId> {
        match self {
            RequestStatus::Pending { approver } => *approver,
            RequestStatus::Approved | RequestStatus::Denied => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending { .. } => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub stage: String,
    pub approver_id: StaffId,
    pub status: EntryStatus,
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied fields of a new request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDraft {
    pub id: RequestId,
    pub requester_id: StaffId,
    pub item: String,
    pub category: String,
    pub amount: Amount,
    pub vendor: String,
    pub budget_id: BudgetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementRequest {
    pub id: RequestId,
    pub requester_id: StaffId,
    pub item: String,
    pub category: String,
    pub amount: Amount,
    pub vendor: String,
    pub budget_id: BudgetId,
    pub created_at: DateTime<Utc>,
    pub status: RequestStatus,
    history: Vec<HistoryEntry>,
}

impl ProcurementRequest {
    /// Opens a request: pending on the first approver of `chain` (if any),
    /// with the requester's own submission as the first history entry.
    pub fn submit(draft: RequestDraft, chain: &ApprovalChain, now: DateTime<Utc>) -> Self {
        let submission = HistoryEntry {
            stage: SUBMISSION_STAGE.to_string(),
            approver_id: draft.requester_id,
            status: EntryStatus::Approved,
            timestamp: now,
        };

        Self {
            id: draft.id,
            requester_id: draft.requester_id,
            item: draft.item,
            category: draft.category,
            amount: draft.amount,
            vendor: draft.vendor,
            budget_id: draft.budget_id,
            created_at: now,
            status: RequestStatus::Pending {
                approver: chain.first(),
            },
            history: vec![submission],
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn current_approver(&self) -> Option<StaffId> {
        self.status.current_approver()
    }

    /// Who may decide next: the current approver, or the requester when the
    /// chain was empty.
    pub fn expected_actor(&self) -> Option<StaffId> {
        match self.status {
            RequestStatus::Pending { approver } => approver.or(Some(self.requester_id)),
            RequestStatus::Approved | RequestStatus::Denied => None,
        }
    }

    /// Returns a copy in `status` with `entry` appended to the history.
    pub(crate) fn advanced(&self, status: RequestStatus, entry: HistoryEntry) -> Self {
        let mut next = self.clone();
        next.status = status;
        next.history.push(entry);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn draft(requester_id: StaffId) -> RequestDraft {
        RequestDraft {
            id: 1,
            requester_id,
            item: "Bunsen burners".to_string(),
            category: "Science".to_string(),
            amount: Amount::new(dec!(450.00)).unwrap(),
            vendor: "LabSupply".to_string(),
            budget_id: 7,
        }
    }

    #[test]
    fn test_submit_targets_first_approver() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let chain = ApprovalChain::new(vec![3, 2, 1]);
        let request = ProcurementRequest::submit(draft(4), &chain, now);

        assert_eq!(request.status, RequestStatus::Pending { approver: Some(3) });
        assert_eq!(request.created_at, now);
        assert_eq!(request.history().len(), 1);

        let submission = &request.history()[0];
        assert_eq!(submission.stage, SUBMISSION_STAGE);
        assert_eq!(submission.approver_id, 4);
        assert_eq!(submission.status, EntryStatus::Approved);
    }

    #[test]
    fn test_submit_without_chain_awaits_requester() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let request = ProcurementRequest::submit(draft(1), &ApprovalChain::default(), now);

        assert_eq!(request.current_approver(), None);
        assert_eq!(request.expected_actor(), Some(1));
        assert!(!request.status.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RequestStatus::Pending { approver: Some(3) }).unwrap();
        assert_eq!(json, r#"{"status":"pending","approver":3}"#);
        let json = serde_json::to_string(&RequestStatus::Denied).unwrap();
        assert_eq!(json, r#"{"status":"denied"}"#);
    }
}
