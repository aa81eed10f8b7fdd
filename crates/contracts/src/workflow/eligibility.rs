use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::a002_quote::QuoteStatus;
use crate::domain::common::CanonicalStatus;
use crate::enums::{EntityKind, Role};

use super::action::ActionId;
use super::error::WorkflowError;
use super::table::{self, Flag};

/// Auxiliary facts about the entity that gate some actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityFlags {
    pub has_tasks: bool,
    pub has_approved_quote: bool,
}

impl EligibilityFlags {
    pub fn with_tasks(mut self, has_tasks: bool) -> Self {
        self.has_tasks = has_tasks;
        self
    }

    pub fn with_approved_quote(mut self, has_approved_quote: bool) -> Self {
        self.has_approved_quote = has_approved_quote;
        self
    }

    fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::HasTasks => self.has_tasks,
            Flag::HasApprovedQuote => self.has_approved_quote,
        }
    }
}

/// Which quote statuses a client may approve or reject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteApprovalPolicy {
    PendingOnly,
    #[default]
    PendingOrInProgress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    pub quote_approval: QuoteApprovalPolicy,
}

/// Actions the viewer may trigger, and the reasons for the ones shown disabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub available: Vec<ActionId>,
    pub blocked: BTreeMap<ActionId, &'static str>,
}

impl Eligibility {
    pub fn is_available(&self, action: ActionId) -> bool {
        self.available.contains(&action)
    }

    pub fn blocked_reason(&self, action: ActionId) -> Option<&'static str> {
        self.blocked.get(&action).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.blocked.is_empty()
    }

    /// Available and blocked actions together, in display order
    pub fn visible(&self) -> Vec<(ActionId, Option<&'static str>)> {
        let mut all: Vec<_> = self.available.iter().map(|a| (*a, None)).collect();
        all.extend(self.blocked.iter().map(|(a, r)| (*a, Some(*r))));
        all.sort_by_key(|(a, _)| *a);
        all
    }

    pub fn check(&self, action: ActionId) -> Result<(), WorkflowError> {
        if self.is_available(action) {
            return Ok(());
        }
        let reason = self
            .blocked_reason(action)
            .unwrap_or("Acción no disponible")
            .to_string();
        Err(WorkflowError::EligibilityDenied { action, reason })
    }

    fn block(&mut self, action: ActionId, reason: &'static str) {
        self.available.retain(|a| *a != action);
        self.blocked.insert(action, reason);
    }
}

/// Pure resolver over the static decision table
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub fn resolve(
        &self,
        kind: EntityKind,
        status: CanonicalStatus,
        role: Option<Role>,
        flags: EligibilityFlags,
    ) -> Eligibility {
        let mut result = Eligibility::default();
        let Some(role) = role else {
            return result;
        };
        if status.kind() != kind {
            log::error!(
                "eligibility requested for {} with a {} status",
                kind,
                status.kind()
            );
            return result;
        }

        let role_rows: Vec<_> = table::ROWS
            .iter()
            .filter(|r| r.role == role && r.status.kind() == kind)
            .collect();
        if role_rows.is_empty() {
            return result;
        }

        for row in role_rows.iter().filter(|r| r.status == status) {
            for action in row.actions {
                if !result.available.contains(action) {
                    result.available.push(*action);
                }
            }
        }

        for row in table::BLOCKED
            .iter()
            .filter(|b| b.role == role && b.status == status)
        {
            result.block(row.action, row.reason);
        }

        let terminal = result
            .available
            .is_empty()
            .then(|| table::TERMINALS.iter().find(|t| t.status == status))
            .flatten();
        if let Some(terminal) = terminal {
            for row in &role_rows {
                for action in row.actions {
                    result.blocked.insert(*action, terminal.reason);
                }
            }
            // the terminal reason wins over every gate
            return result;
        }

        for gate in table::GATES.iter().filter(|g| g.kind == kind) {
            if flags.get(gate.flag) != gate.blocks_when {
                continue;
            }
            if result.is_available(gate.action) || result.blocked.contains_key(&gate.action) {
                result.block(gate.action, gate.reason);
            }
        }

        if self.options.quote_approval == QuoteApprovalPolicy::PendingOnly
            && status == CanonicalStatus::Quote(QuoteStatus::InProgress)
        {
            for action in [ActionId::Approve, ActionId::Reject] {
                if result.is_available(action) {
                    result.block(action, table::PENDING_ONLY_REASON);
                }
            }
        }

        result
    }
}

/// Resolve with the default options
pub fn resolve(
    kind: EntityKind,
    status: CanonicalStatus,
    role: Option<Role>,
    flags: EligibilityFlags,
) -> Eligibility {
    Resolver::default().resolve(kind, status, role, flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_request::RequestStatus;
    use crate::domain::a003_reservation::ReservationStatus;
    use crate::domain::a004_task::TaskStatus;
    use crate::domain::common::normalize;

    fn no_flags() -> EligibilityFlags {
        EligibilityFlags::default()
    }

    #[test]
    fn test_planning_without_tasks_blocks_publish() {
        let e = resolve(
            EntityKind::Reservation,
            ReservationStatus::Planning.into(),
            Some(Role::Admin),
            no_flags(),
        );
        assert!(!e.is_available(ActionId::Publish));
        assert!(!e.blocked_reason(ActionId::Publish).unwrap_or("").is_empty());
        assert_eq!(e.available, vec![ActionId::AddTask, ActionId::Cancel]);

        let e = resolve(
            EntityKind::Reservation,
            ReservationStatus::Planning.into(),
            Some(Role::Admin),
            no_flags().with_tasks(true),
        );
        assert_eq!(
            e.available,
            vec![ActionId::Publish, ActionId::AddTask, ActionId::Cancel]
        );
        assert!(e.blocked.is_empty());
    }

    #[test]
    fn test_in_progress_reservation_for_admin() {
        let status = normalize(EntityKind::Reservation, Some("ENCURSO"));
        assert_eq!(status, ReservationStatus::InProgress.into());
        let e = resolve(EntityKind::Reservation, status, Some(Role::Admin), no_flags());
        assert!(e.is_available(ActionId::Cancel));
        assert!(!e.is_available(ActionId::Publish));
        assert!(e.blocked_reason(ActionId::Publish).is_none());
    }

    #[test]
    fn test_terminal_reservation_blocks_everything() {
        let e = resolve(
            EntityKind::Reservation,
            ReservationStatus::Finished.into(),
            Some(Role::Admin),
            no_flags().with_tasks(true),
        );
        assert!(e.available.is_empty());
        for action in [ActionId::Publish, ActionId::AddTask, ActionId::Cancel] {
            assert_eq!(e.blocked_reason(action), Some("La reserva ya finalizó"));
        }
    }

    #[test]
    fn test_terminal_reason_survives_closed_gates() {
        for (status, reason) in [
            (ReservationStatus::Finished, "La reserva ya finalizó"),
            (ReservationStatus::Cancelled, "La reserva fue cancelada"),
        ] {
            let e = resolve(EntityKind::Reservation, status.into(), Some(Role::Admin), no_flags());
            assert!(e.available.is_empty());
            for action in [ActionId::Publish, ActionId::AddTask, ActionId::Cancel] {
                assert_eq!(e.blocked_reason(action), Some(reason), "{:?} {:?}", status, action);
            }
        }
    }

    #[test]
    fn test_approved_quote_for_client_is_terminal() {
        let status = normalize(EntityKind::Quote, Some("Aprobada"));
        assert_eq!(status, QuoteStatus::Approved.into());
        let e = resolve(EntityKind::Quote, status, Some(Role::Client), no_flags());
        assert!(e.available.is_empty());
        assert!(e.blocked_reason(ActionId::Approve).is_some());
    }

    #[test]
    fn test_approved_quote_for_admin_converts() {
        let e = resolve(
            EntityKind::Quote,
            QuoteStatus::Approved.into(),
            Some(Role::Admin),
            no_flags(),
        );
        assert_eq!(e.available, vec![ActionId::Convert]);
        assert!(e.blocked.is_empty());
    }

    #[test]
    fn test_quote_approval_policy() {
        let status: CanonicalStatus = QuoteStatus::InProgress.into();
        let permissive = resolve(EntityKind::Quote, status, Some(Role::Client), no_flags());
        assert_eq!(permissive.available, vec![ActionId::Approve, ActionId::Reject]);

        let strict = Resolver::new(ResolverOptions {
            quote_approval: QuoteApprovalPolicy::PendingOnly,
        })
        .resolve(EntityKind::Quote, status, Some(Role::Client), no_flags());
        assert!(strict.available.is_empty());
        assert_eq!(
            strict.blocked_reason(ActionId::Approve),
            Some(table::PENDING_ONLY_REASON)
        );

        let pending = Resolver::new(ResolverOptions {
            quote_approval: QuoteApprovalPolicy::PendingOnly,
        })
        .resolve(
            EntityKind::Quote,
            QuoteStatus::Pending.into(),
            Some(Role::Client),
            no_flags(),
        );
        assert_eq!(pending.available, vec![ActionId::Approve, ActionId::Reject]);
    }

    #[test]
    fn test_approved_quote_blocks_create_quote_for_every_status() {
        for status in CanonicalStatus::all_of(EntityKind::Request) {
            let e = resolve(
                EntityKind::Request,
                status,
                Some(Role::Admin),
                no_flags().with_approved_quote(true),
            );
            assert!(!e.is_available(ActionId::CreateQuote));
            assert_eq!(
                e.blocked_reason(ActionId::CreateQuote),
                Some("Ya existe una cotización aprobada para esta solicitud")
            );
        }
    }

    #[test]
    fn test_inactive_request_blocks_create_quote() {
        let e = resolve(
            EntityKind::Request,
            RequestStatus::Inactive.into(),
            Some(Role::Admin),
            no_flags(),
        );
        assert!(e.available.is_empty());
        assert_eq!(
            e.blocked_reason(ActionId::CreateQuote),
            Some("La solicitud está inactiva")
        );
    }

    #[test]
    fn test_fail_closed() {
        let status: CanonicalStatus = TaskStatus::Pending.into();
        assert!(resolve(EntityKind::Task, status, None, no_flags()).is_empty());
        assert!(resolve(EntityKind::Task, status, Some(Role::Client), no_flags()).is_empty());
        assert!(resolve(EntityKind::Reservation, status, Some(Role::Admin), no_flags()).is_empty());
        assert!(resolve(
            EntityKind::Request,
            RequestStatus::Active.into(),
            Some(Role::Client),
            no_flags()
        )
        .is_empty());
    }

    #[test]
    fn test_task_transitions_for_employee() {
        let e = resolve(
            EntityKind::Task,
            TaskStatus::Pending.into(),
            Some(Role::Employee),
            no_flags(),
        );
        assert_eq!(e.available, vec![ActionId::Start]);
        let e = resolve(
            EntityKind::Task,
            TaskStatus::InProgress.into(),
            Some(Role::Employee),
            no_flags(),
        );
        assert_eq!(e.available, vec![ActionId::Complete]);
        let e = resolve(
            EntityKind::Task,
            TaskStatus::Completed.into(),
            Some(Role::Employee),
            no_flags(),
        );
        assert!(e.available.is_empty());
        assert_eq!(e.blocked.len(), 2);
    }

    #[test]
    fn test_resolve_is_pure() {
        for kind in EntityKind::all() {
            for status in CanonicalStatus::all_of(kind) {
                for role in Role::all() {
                    let flags = no_flags().with_tasks(true);
                    let a = resolve(kind, status, Some(role), flags);
                    let b = resolve(kind, status, Some(role), flags);
                    assert_eq!(a, b);
                    for action in &a.available {
                        assert!(!a.blocked.contains_key(action));
                    }
                }
            }
        }
    }

    #[test]
    fn test_check() {
        let e = resolve(
            EntityKind::Reservation,
            ReservationStatus::Planning.into(),
            Some(Role::Admin),
            no_flags(),
        );
        assert!(e.check(ActionId::Cancel).is_ok());
        match e.check(ActionId::Publish) {
            Err(WorkflowError::EligibilityDenied { action, reason }) => {
                assert_eq!(action, ActionId::Publish);
                assert_eq!(reason, "Aún no hay tareas asignadas");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
