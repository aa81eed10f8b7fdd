use contracts::domain::a003_reservation::{ReservationDetail, ReservationStatus};
use contracts::domain::a004_task::{CreateTaskDto, TaskDto};
use contracts::domain::common::CanonicalStatus;
use contracts::enums::{EntityKind, Role};
use contracts::workflow::{ActionId, EligibilityFlags, RefetchPlan, TransitionKey, ViewScope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use crate::domain::a003_reservation::api;
use crate::domain::a003_reservation::ui::list::state::{self as list_state, ReservationListState};
use crate::domain::a004_task::api as task_api;
use crate::domain::a004_task::ui::list::run_task_action;
use crate::shared::refresh::{detail_and_list, nonce, spawn_transition, TransitionUi};
use crate::system::auth::context::current_role;

/// Reservation detail, with its tasks, plus the viewer's reservation list
pub fn reservation_plan(
    detail: impl Future<Output = Result<ReservationDetail, String>> + 'static,
    reservation: RwSignal<Option<ReservationDetail>>,
    list: impl Future<Output = Result<Vec<ReservationDetail>, String>> + 'static,
    reservations: RwSignal<ReservationListState>,
) -> RefetchPlan<'static> {
    detail_and_list(detail, reservation, list, move |items| {
        reservations.update(|s| s.set_items(items))
    })
}

#[derive(Clone)]
pub struct ReservationDetailsViewModel {
    pub id: String,
    pub reservation: RwSignal<Option<ReservationDetail>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub show_task_form: RwSignal<bool>,
    pub ui: TransitionUi,
    pub scope: ViewScope,
    role: Signal<Option<Role>>,
    reservations: RwSignal<ReservationListState>,
}

impl ReservationDetailsViewModel {
    pub fn new(id: String, scope: ViewScope) -> Self {
        Self {
            id,
            reservation: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            show_task_form: RwSignal::new(false),
            ui: TransitionUi::new(),
            scope,
            role: current_role(),
            reservations: list_state::use_store(),
        }
    }

    pub fn status(&self) -> Signal<Option<CanonicalStatus>> {
        let reservation = self.reservation;
        Signal::derive(move || reservation.with(|r| r.as_ref().map(|r| r.status().into())))
    }

    pub fn flags(&self) -> Signal<EligibilityFlags> {
        let reservation = self.reservation;
        Signal::derive(move || {
            EligibilityFlags::default()
                .with_tasks(reservation.with(|r| r.as_ref().is_some_and(|r| r.has_tasks())))
        })
    }

    pub fn load(&self) {
        let (id, reservation, error, loading) =
            (self.id.clone(), self.reservation, self.error, self.loading);
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(r) => {
                    let _ = reservation.try_set(Some(r));
                }
                Err(e) => {
                    let _ = error.try_set(Some(format!("No se pudo cargar la reservación: {}", e)));
                }
            }
            let _ = loading.try_set(false);
        });
    }

    /// Tasks travel inside the reservation, so the detail refetch covers them;
    /// the list carries status and progress
    fn refetch_plan(&self) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
        let (id, reservation, reservations, role) =
            (self.id.clone(), self.reservation, self.reservations, self.role);
        move || {
            reservation_plan(
                async move { api::fetch_by_id(&id).await },
                reservation,
                api::fetch_for_role(role.get_untracked()),
                reservations,
            )
        }
    }

    fn key(&self, action: ActionId) -> TransitionKey {
        TransitionKey::new(EntityKind::Reservation, self.id.clone(), action)
    }

    pub fn publish(&self) {
        spawn_transition(
            &self.scope,
            self.ui,
            self.key(ActionId::Publish),
            api::publish(self.id.clone()),
            self.refetch_plan(),
            |_| {},
        );
    }

    pub fn cancel(&self) {
        spawn_transition(
            &self.scope,
            self.ui,
            self.key(ActionId::Cancel),
            api::update_status(self.id.clone(), ReservationStatus::Cancelled),
            self.refetch_plan(),
            |_| {},
        );
    }

    /// Every submitted task is a new transition
    pub fn add_task(&self, dto: CreateTaskDto) {
        if let Err(errors) = dto.validate() {
            self.ui.errors.set(errors);
            return;
        }
        let show_form = self.show_task_form;
        spawn_transition(
            &self.scope,
            self.ui,
            self.key(ActionId::AddTask).with_nonce(nonce()),
            task_api::create(dto),
            self.refetch_plan(),
            move |task: TaskDto| {
                log::info!("task {} added", task.id);
                show_form.set(false);
            },
        );
    }

    /// Status action on one of the reservation's tasks
    pub fn run_on_task(&self, task_id: String, action: ActionId) {
        run_task_action(&self.scope, self.ui, task_id, action, self.refetch_plan());
    }

    pub fn run(&self, action: ActionId) {
        match action {
            ActionId::Publish => self.publish(),
            ActionId::Cancel => self.cancel(),
            ActionId::AddTask => self.show_task_form.set(true),
            other => log::error!("action {} is not handled on reservations", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_reservation::ReservationStatus;
    use contracts::workflow::{after_mutate, resolve, MutationFailure, RefetchOutcome};
    use futures::executor::block_on;
    use futures::future::ready;
    use leptos::reactive::owner::Owner;

    fn reservation(status: &str, tasks: &[&str]) -> ReservationDetail {
        let tasks: Vec<_> = tasks
            .iter()
            .enumerate()
            .map(|(i, s)| serde_json::json!({"id": format!("t{}", i), "title": "Montaje", "status": s}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "id": "r1",
            "eventName": "Boda",
            "status": status,
            "tasks": tasks,
        }))
        .unwrap()
    }

    #[test]
    fn test_publish_refreshes_detail_and_list() {
        let owner = Owner::new();
        owner.with(|| {
            let detail = RwSignal::new(Some(reservation("EN_PLANEACION", &["PENDIENTE"])));
            let reservations = RwSignal::new(ReservationListState::default());
            reservations.update(|s| s.set_items(vec![reservation("EN_PLANEACION", &["PENDIENTE"])]));
            let scope = ViewScope::new();
            let key = TransitionKey::new(EntityKind::Reservation, "r1", ActionId::Publish);

            let plan = reservation_plan(
                ready(Ok(reservation("PROGRAMADA", &["PENDIENTE"]))),
                detail,
                ready(Ok(vec![reservation("PROGRAMADA", &["PENDIENTE"])])),
                reservations,
            );
            let outcome = block_on(after_mutate(&scope, key, ready(Ok::<_, MutationFailure>(())), plan))
                .unwrap();

            let report = outcome.report().unwrap();
            assert_eq!(report.detail, RefetchOutcome::Applied);
            assert_eq!(report.list, RefetchOutcome::Applied);
            assert_eq!(
                reservations.with_untracked(|s| s.items[0].status()),
                ReservationStatus::Scheduled
            );

            let status = detail.with_untracked(|r| r.as_ref().map(|r| r.status().into())).unwrap();
            let after = resolve(
                EntityKind::Reservation,
                status,
                Some(Role::Admin),
                EligibilityFlags::default().with_tasks(true),
            );
            assert_eq!(after.available, vec![ActionId::Cancel]);
        });
    }

    #[test]
    fn test_closed_tab_leaves_list_untouched() {
        let owner = Owner::new();
        owner.with(|| {
            let detail = RwSignal::new(Some(reservation("PROGRAMADA", &[])));
            let reservations = RwSignal::new(ReservationListState::default());
            let scope = ViewScope::new();
            let key = TransitionKey::new(EntityKind::Reservation, "r1", ActionId::Cancel);
            scope.close();

            let plan = reservation_plan(
                ready(Ok(reservation("CANCELADA", &[]))),
                detail,
                ready(Ok(vec![reservation("CANCELADA", &[])])),
                reservations,
            );
            let outcome = block_on(after_mutate(&scope, key, ready(Ok::<_, MutationFailure>(())), plan))
                .unwrap();

            assert_eq!(outcome.report().unwrap().list, RefetchOutcome::Discarded);
            assert!(!reservations.with_untracked(|s| s.is_loaded));
            assert_eq!(
                detail.with_untracked(|r| r.as_ref().map(|r| r.status())),
                Some(ReservationStatus::Scheduled)
            );
        });
    }
}
