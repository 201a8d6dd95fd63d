use super::hierarchy::ApprovalChain;
use super::procurement::{Decision, HistoryEntry, ProcurementRequest, RequestStatus};
use super::staff::StaffId;
use crate::error::{AdminError, Result};
use chrono::{DateTime, Utc};

/// A decision handed down by one actor on one request.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionEvent {
    pub actor_id: StaffId,
    pub actor_name: String,
    pub decision: Decision,
    pub timestamp: DateTime<Utc>,
}

pub fn approval_stage(actor_name: &str) -> String {
    format!("Approval by {actor_name}")
}

/// Computes the request that results from `event`.
///
/// The transition is total: it does not check who the actor is or whether the
/// request is still open (see [`check_decision`]). An approval from an actor
/// who is last in `chain`, or not in it at all, closes the request as
/// approved. Every call appends exactly one history entry.
pub fn apply_decision(
    request: &ProcurementRequest,
    chain: &ApprovalChain,
    event: &DecisionEvent,
) -> ProcurementRequest {
    let status = match event.decision {
        Decision::Denied => RequestStatus::Denied,
        Decision::Approved => match chain.next_after(event.actor_id) {
            Some(next) => RequestStatus::Pending {
                approver: Some(next),
            },
            None => RequestStatus::Approved,
        },
    };

    let entry = HistoryEntry {
        stage: approval_stage(&event.actor_name),
        approver_id: event.actor_id,
        status: event.decision.into(),
        timestamp: event.timestamp,
    };

    request.advanced(status, entry)
}

/// Preconditions a caller must hold before calling [`apply_decision`].
pub fn check_decision(request: &ProcurementRequest, actor_id: StaffId) -> Result<()> {
    match request.expected_actor() {
        None => Err(AdminError::TerminalRequest(request.id)),
        Some(expected) if expected != actor_id => Err(AdminError::NotCurrentApprover {
            request: request.id,
            actor: actor_id,
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;
    use crate::domain::procurement::{EntryStatus, RequestDraft};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    const M1: StaffId = 11;
    const M2: StaffId = 12;
    const M3: StaffId = 13;
    const REQUESTER: StaffId = 20;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, hour, 0, 0).unwrap()
    }

    fn chain() -> ApprovalChain {
        ApprovalChain::new(vec![M1, M2, M3])
    }

    fn open_request(chain: &ApprovalChain) -> ProcurementRequest {
        let draft = RequestDraft {
            id: 5,
            requester_id: REQUESTER,
            item: "Projector".to_string(),
            category: "AV".to_string(),
            amount: Amount::new(dec!(1200)).unwrap(),
            vendor: "Brightview".to_string(),
            budget_id: 1,
        };
        ProcurementRequest::submit(draft, chain, at(8))
    }

    fn event(actor_id: StaffId, decision: Decision) -> DecisionEvent {
        DecisionEvent {
            actor_id,
            actor_name: format!("Manager {actor_id}"),
            decision,
            timestamp: at(10),
        }
    }

    #[test]
    fn test_approval_moves_to_next_approver() {
        let chain = chain();
        let request = open_request(&chain);

        let next = apply_decision(&request, &chain, &event(M1, Decision::Approved));

        assert_eq!(next.status, RequestStatus::Pending { approver: Some(M2) });
        assert_eq!(next.current_approver(), Some(M2));
    }

    #[test]
    fn test_approval_by_last_approver_closes_request() {
        let chain = chain();
        let request = open_request(&chain);

        let closed = apply_decision(&request, &chain, &event(M3, Decision::Approved));

        assert_eq!(closed.status, RequestStatus::Approved);
        assert_eq!(closed.current_approver(), None);
    }

    #[test]
    fn test_approval_by_unknown_actor_closes_request() {
        let chain = chain();
        let request = open_request(&chain);

        let closed = apply_decision(&request, &chain, &event(99, Decision::Approved));

        assert_eq!(closed.status, RequestStatus::Approved);
    }

    #[test]
    fn test_denial_is_terminal_from_any_position() {
        let chain = chain();
        for actor in [M1, M2, M3, 99] {
            let request = open_request(&chain);
            let denied = apply_decision(&request, &chain, &event(actor, Decision::Denied));
            assert_eq!(denied.status, RequestStatus::Denied);
            assert_eq!(denied.current_approver(), None);
        }
    }

    #[test]
    fn test_empty_chain_self_approval() {
        let chain = ApprovalChain::default();
        let request = open_request(&chain);

        check_decision(&request, REQUESTER).unwrap();
        let closed = apply_decision(&request, &chain, &event(REQUESTER, Decision::Approved));

        assert_eq!(closed.status, RequestStatus::Approved);
    }

    #[test]
    fn test_full_chain_walk() {
        let chain = chain();
        let mut request = open_request(&chain);

        for actor in [M1, M2, M3] {
            check_decision(&request, actor).unwrap();
            request = apply_decision(&request, &chain, &event(actor, Decision::Approved));
        }

        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.history().len(), 4);
    }

    #[test]
    fn test_history_grows_by_one_per_transition() {
        let chain = chain();
        let request = open_request(&chain);

        for (actor, decision) in [
            (M1, Decision::Approved),
            (M3, Decision::Approved),
            (99, Decision::Approved),
            (M2, Decision::Denied),
        ] {
            let next = apply_decision(&request, &chain, &event(actor, decision));
            assert_eq!(next.history().len(), request.history().len() + 1);
            assert_eq!(&next.history()[..1], request.history());
        }
    }

    #[test]
    fn test_history_entry_contents() {
        let chain = chain();
        let request = open_request(&chain);

        let next = apply_decision(&request, &chain, &event(M1, Decision::Denied));
        let entry = next.history().last().unwrap();

        assert_eq!(entry.stage, "Approval by Manager 11");
        assert_eq!(entry.approver_id, M1);
        assert_eq!(entry.status, EntryStatus::Denied);
        assert_eq!(entry.timestamp, at(10));
    }

    #[test]
    fn test_source_request_is_unchanged() {
        let chain = chain();
        let request = open_request(&chain);
        let before = request.clone();

        let _ = apply_decision(&request, &chain, &event(M1, Decision::Approved));

        assert_eq!(request, before);
    }

    #[test]
    fn test_check_decision_rejects_wrong_actor() {
        let chain = chain();
        let request = open_request(&chain);

        assert!(matches!(
            check_decision(&request, M2),
            Err(AdminError::NotCurrentApprover { request: 5, actor: M2 })
        ));
    }

    #[test]
    fn test_check_decision_rejects_closed_request() {
        let chain = chain();
        let request = open_request(&chain);
        let denied = apply_decision(&request, &chain, &event(M1, Decision::Denied));

        assert!(matches!(
            check_decision(&denied, M2),
            Err(AdminError::TerminalRequest(5))
        ));
    }
}
