//! Static decision table for action eligibility.
//!
//! Rows list what a role may do in a given status. Blocked rows, gates and
//! terminal rows add the "why not" copy shown next to disabled buttons.

use crate::domain::a001_request::RequestStatus;
use crate::domain::a002_quote::QuoteStatus;
use crate::domain::a003_reservation::ReservationStatus;
use crate::domain::a004_task::TaskStatus;
use crate::domain::common::CanonicalStatus;
use crate::enums::{EntityKind, Role};

use super::action::ActionId;

/// Actions available to `role` while the entity is in `status`
#[derive(Debug, Clone, Copy)]
pub struct Row {
    pub role: Role,
    pub status: CanonicalStatus,
    pub actions: &'static [ActionId],
}

/// Action shown disabled for `role` in `status`
#[derive(Debug, Clone, Copy)]
pub struct BlockedRow {
    pub role: Role,
    pub status: CanonicalStatus,
    pub action: ActionId,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    HasTasks,
    HasApprovedQuote,
}

/// Blocks `action` on any `kind` entity whenever `flag == blocks_when`.
/// The gate reason replaces any reason set by a blocked row.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    pub kind: EntityKind,
    pub action: ActionId,
    pub flag: Flag,
    pub blocks_when: bool,
    pub reason: &'static str,
}

/// Terminal status: every action the role has for the kind is blocked
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    pub status: CanonicalStatus,
    pub reason: &'static str,
}

const fn res(s: ReservationStatus) -> CanonicalStatus {
    CanonicalStatus::Reservation(s)
}

const fn quote(s: QuoteStatus) -> CanonicalStatus {
    CanonicalStatus::Quote(s)
}

const fn req(s: RequestStatus) -> CanonicalStatus {
    CanonicalStatus::Request(s)
}

const fn task(s: TaskStatus) -> CanonicalStatus {
    CanonicalStatus::Task(s)
}

pub const ROWS: &[Row] = &[
    // Reservation
    Row {
        role: Role::Admin,
        status: res(ReservationStatus::Planning),
        actions: &[ActionId::Publish, ActionId::AddTask, ActionId::Cancel],
    },
    Row {
        role: Role::Admin,
        status: res(ReservationStatus::Scheduled),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Admin,
        status: res(ReservationStatus::InProgress),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Client,
        status: res(ReservationStatus::Planning),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Client,
        status: res(ReservationStatus::Scheduled),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Client,
        status: res(ReservationStatus::InProgress),
        actions: &[ActionId::Cancel],
    },
    // Quote
    Row {
        role: Role::Client,
        status: quote(QuoteStatus::Pending),
        actions: &[ActionId::Approve, ActionId::Reject],
    },
    Row {
        role: Role::Client,
        status: quote(QuoteStatus::InProgress),
        actions: &[ActionId::Approve, ActionId::Reject],
    },
    Row {
        role: Role::Admin,
        status: quote(QuoteStatus::Pending),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Admin,
        status: quote(QuoteStatus::InProgress),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Admin,
        status: quote(QuoteStatus::Approved),
        actions: &[ActionId::Convert],
    },
    // Request
    Row {
        role: Role::Admin,
        status: req(RequestStatus::Active),
        actions: &[ActionId::CreateQuote, ActionId::Deactivate],
    },
    // Task
    Row {
        role: Role::Employee,
        status: task(TaskStatus::Pending),
        actions: &[ActionId::Start],
    },
    Row {
        role: Role::Employee,
        status: task(TaskStatus::InProgress),
        actions: &[ActionId::Complete],
    },
    Row {
        role: Role::Admin,
        status: task(TaskStatus::Pending),
        actions: &[ActionId::Cancel],
    },
    Row {
        role: Role::Admin,
        status: task(TaskStatus::InProgress),
        actions: &[ActionId::Cancel],
    },
];

pub const BLOCKED: &[BlockedRow] = &[BlockedRow {
    role: Role::Admin,
    status: req(RequestStatus::Inactive),
    action: ActionId::CreateQuote,
    reason: "La solicitud está inactiva",
}];

pub const GATES: &[Gate] = &[
    Gate {
        kind: EntityKind::Reservation,
        action: ActionId::Publish,
        flag: Flag::HasTasks,
        blocks_when: false,
        reason: "Aún no hay tareas asignadas",
    },
    Gate {
        kind: EntityKind::Request,
        action: ActionId::CreateQuote,
        flag: Flag::HasApprovedQuote,
        blocks_when: true,
        reason: "Ya existe una cotización aprobada para esta solicitud",
    },
];

pub const TERMINALS: &[Terminal] = &[
    Terminal {
        status: res(ReservationStatus::Finished),
        reason: "La reserva ya finalizó",
    },
    Terminal {
        status: res(ReservationStatus::Cancelled),
        reason: "La reserva fue cancelada",
    },
    Terminal {
        status: quote(QuoteStatus::Approved),
        reason: "La cotización ya fue aprobada",
    },
    Terminal {
        status: quote(QuoteStatus::Rejected),
        reason: "La cotización fue rechazada",
    },
    Terminal {
        status: task(TaskStatus::Completed),
        reason: "La tarea ya fue completada",
    },
    Terminal {
        status: task(TaskStatus::Cancelled),
        reason: "La tarea fue cancelada",
    },
];

/// Reason used when the approval policy only accepts pending quotes
pub const PENDING_ONLY_REASON: &str = "Solo se pueden aprobar cotizaciones pendientes";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rows_are_unique_per_role_and_status() {
        let mut seen = HashSet::new();
        for row in ROWS {
            assert!(
                seen.insert((row.role, row.status)),
                "duplicate row for {:?} {:?}",
                row.role,
                row.status
            );
            assert!(!row.actions.is_empty());
        }
    }

    #[test]
    fn test_terminal_rows_use_terminal_statuses() {
        for t in TERMINALS {
            assert!(t.status.is_terminal(), "{:?} is not terminal", t.status);
            assert!(!t.reason.is_empty());
        }
    }

    #[test]
    fn test_no_row_for_terminal_status_except_convert() {
        for row in ROWS.iter().filter(|r| r.status.is_terminal()) {
            assert_eq!(row.actions, &[ActionId::Convert]);
        }
    }
}
