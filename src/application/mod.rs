//! Application layer: the caller that owns mutable collections.
//!
//! `ProcurementService` keeps the request collection and feeds the approval
//! engine one decision at a time; `PayrollService` runs payroll over a staff
//! snapshot and records each run.

pub mod payroll;
pub mod procurement;
