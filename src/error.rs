use crate::domain::procurement::RequestId;
use crate::domain::staff::{RateCardId, StaffId};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum AdminError {
    #[error("CSV error: {0}")]
    #[diagnostic(code(eduadmin::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(eduadmin::io))]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(eduadmin::json))]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    #[diagnostic(code(eduadmin::validation))]
    Validation(String),

    /// The manager links starting at `staff` loop back on themselves.
    #[error("Cyclic management hierarchy reached from staff member {staff}")]
    #[diagnostic(
        code(eduadmin::hierarchy::cycle),
        help("fix the manager_id column so that every chain ends at a member without a manager")
    )]
    CyclicHierarchy { staff: StaffId },

    #[error("Teacher {teacher} references rate card {rate_card}, which does not exist")]
    #[diagnostic(
        code(eduadmin::payroll::missing_rate_card),
        help("add the rate card or clear the teacher's rate_card_id to exclude them from payroll")
    )]
    MissingRateCard {
        teacher: StaffId,
        rate_card: RateCardId,
    },

    #[error("Pay for teacher {teacher} on rate card {rate_card} is too large to compute")]
    #[diagnostic(
        code(eduadmin::payroll::overflow),
        help("check the rate card amounts and the teacher's workload counters")
    )]
    PayrollOverflow {
        teacher: StaffId,
        rate_card: RateCardId,
    },

    #[error("Total {0} is too large to compute")]
    #[diagnostic(code(eduadmin::overflow))]
    TotalOverflow(String),

    #[error("Unknown staff member {0}")]
    #[diagnostic(code(eduadmin::staff::unknown))]
    UnknownStaff(StaffId),

    #[error("Unknown procurement request {0}")]
    #[diagnostic(code(eduadmin::procurement::unknown))]
    UnknownRequest(RequestId),

    #[error("Procurement request {0} already exists")]
    #[diagnostic(code(eduadmin::procurement::duplicate))]
    DuplicateRequest(RequestId),

    #[error("Procurement request {0} is already closed")]
    #[diagnostic(code(eduadmin::procurement::terminal))]
    TerminalRequest(RequestId),

    #[error("Staff member {actor} is not the current approver of request {request}")]
    #[diagnostic(code(eduadmin::procurement::not_current_approver))]
    NotCurrentApprover { request: RequestId, actor: StaffId },

    #[error("Invalid event: {0}")]
    #[diagnostic(code(eduadmin::events::invalid))]
    InvalidEvent(String),
}

pub type Result<T> = std::result::Result<T, AdminError>;
