use contracts::domain::a002_quote::{QuoteAction, QuoteDto};
use contracts::domain::a003_reservation::{CreateReservationDto, ReservationDetail};
use contracts::domain::common::CanonicalStatus;
use contracts::enums::{EntityKind, Role};
use contracts::workflow::{ActionId, MutationFailure, RefetchPlan, TransitionKey, ViewScope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use crate::domain::a002_quote::api;
use crate::domain::a002_quote::ui::list::state::{self as list_state, QuoteListState};
use crate::domain::a003_reservation::api as reservation_api;
use crate::domain::a003_reservation::ui::list::state::{
    self as reservation_list_state, ReservationListState,
};
use crate::shared::refresh::{detail_and_list, spawn_transition, TransitionUi};
use crate::system::auth::context::current_role;

/// Quote detail plus the viewer's quote list
pub fn quote_plan(
    detail: impl Future<Output = Result<QuoteDto, String>> + 'static,
    quote: RwSignal<Option<QuoteDto>>,
    list: impl Future<Output = Result<Vec<QuoteDto>, String>> + 'static,
    quotes: RwSignal<QuoteListState>,
) -> RefetchPlan<'static> {
    detail_and_list(detail, quote, list, move |items| quotes.update(|s| s.set_items(items)))
}

/// After a conversion the new reservation shows up in the reservation list
pub fn convert_plan(
    detail: impl Future<Output = Result<QuoteDto, String>> + 'static,
    quote: RwSignal<Option<QuoteDto>>,
    list: impl Future<Output = Result<Vec<ReservationDetail>, String>> + 'static,
    reservations: RwSignal<ReservationListState>,
) -> RefetchPlan<'static> {
    detail_and_list(detail, quote, list, move |items| {
        reservations.update(|s| s.set_items(items))
    })
}

#[derive(Clone)]
pub struct QuoteDetailsViewModel {
    pub id: String,
    pub quote: RwSignal<Option<QuoteDto>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    /// Notes sent with an approval or rejection
    pub notes: RwSignal<String>,
    pub show_convert: RwSignal<bool>,
    pub ui: TransitionUi,
    pub scope: ViewScope,
    role: Signal<Option<Role>>,
    quotes: RwSignal<QuoteListState>,
    reservations: RwSignal<ReservationListState>,
}

impl QuoteDetailsViewModel {
    pub fn new(id: String, scope: ViewScope) -> Self {
        Self {
            id,
            quote: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            notes: RwSignal::new(String::new()),
            show_convert: RwSignal::new(false),
            ui: TransitionUi::new(),
            scope,
            role: current_role(),
            quotes: list_state::use_store(),
            reservations: reservation_list_state::use_store(),
        }
    }

    pub fn status(&self) -> Signal<Option<CanonicalStatus>> {
        let quote = self.quote;
        Signal::derive(move || quote.with(|q| q.as_ref().map(|q| q.status().into())))
    }

    pub fn load(&self) {
        let (id, quote, error, loading) = (self.id.clone(), self.quote, self.error, self.loading);
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(q) => {
                    let _ = quote.try_set(Some(q));
                }
                Err(e) => {
                    let _ = error.try_set(Some(format!("No se pudo cargar la cotización: {}", e)));
                }
            }
            let _ = loading.try_set(false);
        });
    }

    fn refetch_plan(&self) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
        let (id, quote, quotes, role) = (self.id.clone(), self.quote, self.quotes, self.role);
        move || {
            quote_plan(
                async move { api::fetch_by_id(&id).await },
                quote,
                api::fetch_for_role(role.get_untracked()),
                quotes,
            )
        }
    }

    fn convert_plan(&self) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
        let (id, quote, reservations, role) =
            (self.id.clone(), self.quote, self.reservations, self.role);
        move || {
            convert_plan(
                async move { api::fetch_by_id(&id).await },
                quote,
                reservation_api::fetch_for_role(role.get_untracked()),
                reservations,
            )
        }
    }

    fn key(&self, action: ActionId) -> TransitionKey {
        TransitionKey::new(EntityKind::Quote, self.id.clone(), action)
    }

    fn transition<T: 'static>(
        &self,
        action: ActionId,
        mutation: impl Future<Output = Result<T, MutationFailure>> + 'static,
    ) {
        spawn_transition(&self.scope, self.ui, self.key(action), mutation, self.refetch_plan(), |_| {});
    }

    fn decision_notes(&self) -> Option<String> {
        Some(self.notes.get_untracked().trim().to_string()).filter(|n| !n.is_empty())
    }

    /// `on_converted` receives the new reservation once the quote was refetched
    pub fn convert(&self, dto: CreateReservationDto, on_converted: Callback<ReservationDetail>) {
        if let Err(errors) = dto.validate() {
            self.ui.errors.set(errors);
            return;
        }
        let show_convert = self.show_convert;
        spawn_transition(
            &self.scope,
            self.ui,
            self.key(ActionId::Convert),
            reservation_api::create(dto),
            self.convert_plan(),
            move |reservation: ReservationDetail| {
                show_convert.set(false);
                on_converted.run(reservation);
            },
        );
    }

    pub fn run(&self, action: ActionId) {
        let id = self.id.clone();
        match action {
            ActionId::Approve => {
                self.transition(action, api::act(id, QuoteAction::Approve, self.decision_notes()))
            }
            ActionId::Reject => {
                self.transition(action, api::act(id, QuoteAction::Reject, self.decision_notes()))
            }
            ActionId::Cancel => self.transition(action, api::cancel(id)),
            ActionId::Convert => self.show_convert.set(true),
            other => log::error!("action {} is not handled on quotes", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_quote::QuoteStatus;
    use contracts::workflow::{after_mutate, resolve, EligibilityFlags, RefetchOutcome};
    use futures::executor::block_on;
    use leptos::reactive::owner::Owner;
    use futures::future::ready;

    fn quote(status: &str) -> QuoteDto {
        serde_json::from_value(serde_json::json!({
            "id": "q1",
            "eventName": "Boda",
            "total": 1200.0,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_approval_refreshes_detail_and_list() {
        let owner = Owner::new();
        owner.with(|| {
            let detail = RwSignal::new(Some(quote("PENDIENTE")));
            let quotes = RwSignal::new(QuoteListState::default());
            quotes.update(|s| s.set_items(vec![quote("PENDIENTE")]));
            let scope = ViewScope::new();
            let key = TransitionKey::new(EntityKind::Quote, "q1", ActionId::Approve);

            let plan = quote_plan(
                ready(Ok(quote("APROBADA"))),
                detail,
                ready(Ok(vec![quote("APROBADA")])),
                quotes,
            );
            let outcome = block_on(after_mutate(&scope, key, ready(Ok::<_, MutationFailure>(())), plan))
                .unwrap();

            let report = outcome.report().unwrap();
            assert_eq!(report.detail, RefetchOutcome::Applied);
            assert_eq!(report.list, RefetchOutcome::Applied);
            assert_eq!(quotes.with_untracked(|s| s.items[0].status()), QuoteStatus::Approved);

            let status = detail.with_untracked(|q| q.as_ref().map(|q| q.status().into())).unwrap();
            let after = resolve(EntityKind::Quote, status, Some(Role::Client), EligibilityFlags::default());
            assert!(after.available.is_empty());
        });
    }

    #[test]
    fn test_failed_list_refetch_keeps_detail() {
        let owner = Owner::new();
        owner.with(|| {
            let detail = RwSignal::new(Some(quote("PENDIENTE")));
            let quotes = RwSignal::new(QuoteListState::default());
            let scope = ViewScope::new();
            let key = TransitionKey::new(EntityKind::Quote, "q1", ActionId::Reject);

            let plan = quote_plan(
                ready(Ok(quote("RECHAZADA"))),
                detail,
                ready(Err("sin conexión".to_string())),
                quotes,
            );
            let outcome = block_on(after_mutate(&scope, key, ready(Ok::<_, MutationFailure>(())), plan))
                .unwrap();

            let report = outcome.report().unwrap();
            assert_eq!(report.detail, RefetchOutcome::Applied);
            assert_eq!(report.warnings().len(), 1);
            assert!(!quotes.with_untracked(|s| s.is_loaded));
        });
    }

    #[test]
    fn test_conversion_fills_reservation_list() {
        let owner = Owner::new();
        owner.with(|| {
            let detail = RwSignal::new(Some(quote("APROBADA")));
            let reservations = RwSignal::new(ReservationListState::default());
            let reservation: ReservationDetail = serde_json::from_value(serde_json::json!({
                "id": "r1",
                "eventName": "Boda",
                "status": "EN_PLANEACION",
            }))
            .unwrap();
            let scope = ViewScope::new();
            let key = TransitionKey::new(EntityKind::Quote, "q1", ActionId::Convert);

            let plan = convert_plan(
                ready(Ok(quote("APROBADA"))),
                detail,
                ready(Ok(vec![reservation])),
                reservations,
            );
            block_on(after_mutate(&scope, key, ready(Ok::<_, MutationFailure>(())), plan)).unwrap();

            assert!(reservations.with_untracked(|s| s.is_loaded));
            assert_eq!(reservations.with_untracked(|s| s.items[0].id.clone()), "r1");
        });
    }
}
