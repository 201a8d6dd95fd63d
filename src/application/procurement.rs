use crate::domain::budget::{Budget, BudgetUsage};
use crate::domain::hierarchy::resolve_chain;
use crate::domain::ports::RequestStoreBox;
use crate::domain::procurement::{Decision, ProcurementRequest, RequestDraft, RequestId};
use crate::domain::staff::{Roster, StaffId};
use crate::domain::workflow::{DecisionEvent, apply_decision, check_decision};
use crate::error::{AdminError, Result};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Something that happens to a procurement request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcurementCommand {
    Submit {
        draft: RequestDraft,
        timestamp: DateTime<Utc>,
    },
    Decide {
        request_id: RequestId,
        actor_id: StaffId,
        decision: Decision,
        timestamp: DateTime<Utc>,
    },
}

/// Owns the request collection and drives requests through their approval chain.
///
/// Each command is a read-modify-write on one request. Commands are
/// serialised through a single lock, so two decisions can never both start
/// from the same prior state.
pub struct ProcurementService {
    roster: Roster,
    requests: RequestStoreBox,
    write_lock: Mutex<()>,
}

impl ProcurementService {
    /// Creates a new `ProcurementService` over a fixed staff roster.
    ///
    /// # Arguments
    ///
    /// * `roster` - Staff with manager links, used to resolve approval chains.
    /// * `requests` - The store for procurement requests.
    pub fn new(roster: Roster, requests: RequestStoreBox) -> Self {
        Self {
            roster,
            requests,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn handle(&self, command: ProcurementCommand) -> Result<ProcurementRequest> {
        match command {
            ProcurementCommand::Submit { draft, timestamp } => self.submit(draft, timestamp).await,
            ProcurementCommand::Decide {
                request_id,
                actor_id,
                decision,
                timestamp,
            } => self.decide(request_id, actor_id, decision, timestamp).await,
        }
    }

    /// Opens a new request, pending on the requester's direct manager.
    pub async fn submit(
        &self,
        draft: RequestDraft,
        timestamp: DateTime<Utc>,
    ) -> Result<ProcurementRequest> {
        let _guard = self.write_lock.lock().await;

        if !self.roster.contains(draft.requester_id) {
            return Err(AdminError::UnknownStaff(draft.requester_id));
        }
        if self.requests.get(draft.id).await?.is_some() {
            return Err(AdminError::DuplicateRequest(draft.id));
        }

        let chain = resolve_chain(draft.requester_id, &self.roster)?;
        let request = ProcurementRequest::submit(draft, &chain, timestamp);
        info!(
            request = request.id,
            requester = request.requester_id,
            approvers = chain.len(),
            "submitted procurement request"
        );

        self.requests.store(request.clone()).await?;
        Ok(request)
    }

    /// Applies one approver's decision.
    ///
    /// Fails without touching the request if it is already closed or if
    /// `actor_id` is not the one it is waiting on.
    pub async fn decide(
        &self,
        request_id: RequestId,
        actor_id: StaffId,
        decision: Decision,
        timestamp: DateTime<Utc>,
    ) -> Result<ProcurementRequest> {
        let _guard = self.write_lock.lock().await;

        let request = self
            .requests
            .get(request_id)
            .await?
            .ok_or(AdminError::UnknownRequest(request_id))?;
        check_decision(&request, actor_id)?;

        let chain = resolve_chain(request.requester_id, &self.roster)?;
        let event = DecisionEvent {
            actor_id,
            actor_name: self.roster.display_name(actor_id),
            decision,
            timestamp,
        };
        let next = apply_decision(&request, &chain, &event);
        debug!(request = request_id, actor = actor_id, ?decision, "applied decision");
        if next.status.is_terminal() {
            info!(request = request_id, status = %next.status, "procurement request closed");
        }

        self.requests.store(next.clone()).await?;
        Ok(next)
    }

    pub async fn get(&self, request_id: RequestId) -> Result<Option<ProcurementRequest>> {
        self.requests.get(request_id).await
    }

    pub async fn requests(&self) -> Result<Vec<ProcurementRequest>> {
        self.requests.get_all().await
    }

    /// Spending against `budget` as of the current request state.
    pub async fn budget_usage(&self, budget: &Budget) -> Result<BudgetUsage> {
        let requests = self.requests.get_all().await?;
        budget.usage(&requests)
    }
}
