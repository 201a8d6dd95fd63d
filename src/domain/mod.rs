//! Domain model and the pure engines.
//!
//! Nothing in here performs I/O or holds shared state: chain resolution, the
//! approval state machine, payroll computation and run aggregation are plain
//! functions over the records defined alongside them.

pub mod budget;
pub mod hierarchy;
pub mod money;
pub mod payroll;
pub mod payroll_run;
pub mod ports;
pub mod procurement;
pub mod staff;
pub mod workflow;
