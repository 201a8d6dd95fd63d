use super::payroll_run::PayrollRun;
use super::procurement::{ProcurementRequest, RequestId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn store(&self, request: ProcurementRequest) -> Result<()>;
    async fn get(&self, request_id: RequestId) -> Result<Option<ProcurementRequest>>;
    /// All requests, ordered by id.
    async fn get_all(&self) -> Result<Vec<ProcurementRequest>>;
}

/// Append-only log of approved payroll runs.
#[async_trait]
pub trait PayrollRunStore: Send + Sync {
    async fn append(&self, run: PayrollRun) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<PayrollRun>>;
}

pub type RequestStoreBox = Box<dyn RequestStore>;
pub type PayrollRunStoreBox = Box<dyn PayrollRunStore>;
