use crate::domain::payroll_run::PayrollRun;
use crate::domain::ports::{PayrollRunStore, RequestStore};
use crate::domain::procurement::{ProcurementRequest, RequestId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for procurement requests.
///
/// Keyed by request id in a `BTreeMap` so listings come back in id order.
#[derive(Default, Clone)]
pub struct InMemoryRequestStore {
    requests: Arc<RwLock<BTreeMap<RequestId, ProcurementRequest>>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn store(&self, request: ProcurementRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request);
        Ok(())
    }

    async fn get(&self, request_id: RequestId) -> Result<Option<ProcurementRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&request_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<ProcurementRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.values().cloned().collect())
    }
}

/// A thread-safe in-memory log of payroll runs, in the order they were appended.
#[derive(Default, Clone)]
pub struct InMemoryPayrollRunStore {
    runs: Arc<RwLock<Vec<PayrollRun>>>,
}

impl InMemoryPayrollRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayrollRunStore for InMemoryPayrollRunStore {
    async fn append(&self, run: PayrollRun) -> Result<()> {
        self.runs.write().await.push(run);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<PayrollRun>> {
        Ok(self.runs.read().await.clone())
    }
}
