use contracts::domain::a001_request::{RequestDto, RequestStatus};
use contracts::domain::a002_quote::{has_approved_quote, CreateQuoteDto, QuoteDto};
use contracts::domain::common::CanonicalStatus;
use contracts::enums::{EntityKind, Role};
use contracts::workflow::{
    ActionId, EligibilityFlags, Refetch, RefetchPlan, TransitionKey, ViewScope,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use crate::domain::a001_request::api;
use crate::domain::a001_request::ui::list::state::{self as list_state, RequestListState};
use crate::domain::a002_quote::api as quote_api;
use crate::shared::refresh::{detail_and_list, nonce, spawn_transition, TransitionUi};
use crate::system::auth::context::current_role;

/// Deactivation leaves the quotes alone; the requests list shows the new status
pub fn deactivate_plan(
    detail: impl Future<Output = Result<RequestDto, String>> + 'static,
    request: RwSignal<Option<RequestDto>>,
    list: impl Future<Output = Result<Vec<RequestDto>, String>> + 'static,
    requests: RwSignal<RequestListState>,
) -> RefetchPlan<'static> {
    detail_and_list(detail, request, list, move |items| {
        requests.update(|s| s.set_items(items))
    })
}

#[derive(Clone)]
pub struct RequestDetailsViewModel {
    pub id: String,
    pub request: RwSignal<Option<RequestDto>>,
    pub quotes: RwSignal<Vec<QuoteDto>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub show_quote_form: RwSignal<bool>,
    pub ui: TransitionUi,
    pub scope: ViewScope,
    role: Signal<Option<Role>>,
    requests: RwSignal<RequestListState>,
}

impl RequestDetailsViewModel {
    pub fn new(id: String, scope: ViewScope) -> Self {
        Self {
            id,
            request: RwSignal::new(None),
            quotes: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            show_quote_form: RwSignal::new(false),
            ui: TransitionUi::new(),
            scope,
            role: current_role(),
            requests: list_state::use_store(),
        }
    }

    pub fn status(&self) -> Signal<Option<CanonicalStatus>> {
        let request = self.request;
        Signal::derive(move || request.with(|r| r.as_ref().map(|r| r.status().into())))
    }

    pub fn flags(&self) -> Signal<EligibilityFlags> {
        let quotes = self.quotes;
        Signal::derive(move || {
            EligibilityFlags::default().with_approved_quote(quotes.with(|q| has_approved_quote(q)))
        })
    }

    /// Load the request and its quotes; a failed quotes fetch keeps the page usable
    pub fn load(&self) {
        let (id, request, quotes, error, loading) = (
            self.id.clone(),
            self.request,
            self.quotes,
            self.error,
            self.loading,
        );
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let (req, qs) = futures::join!(api::fetch_by_id(&id), api::fetch_quotes(&id));
            match req {
                Ok(r) => {
                    let _ = request.try_set(Some(r));
                }
                Err(e) => {
                    let _ = error.try_set(Some(format!("No se pudo cargar la solicitud: {}", e)));
                }
            }
            match qs {
                Ok(q) => {
                    let _ = quotes.try_set(q);
                }
                Err(e) => log::warn!("quotes of request {} not loaded: {}", id, e),
            }
            let _ = loading.try_set(false);
        });
    }

    /// Request plus its quotes, after a quote was created
    fn refetch_plan(&self) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
        let (id, request, quotes) = (self.id.clone(), self.request, self.quotes);
        move || {
            let detail_id = id.clone();
            RefetchPlan::default()
                .detail(Refetch::new(
                    async move { api::fetch_by_id(&detail_id).await },
                    move |r| request.set(Some(r)),
                ))
                .list(Refetch::new(
                    async move { api::fetch_quotes(&id).await },
                    move |q| quotes.set(q),
                ))
        }
    }

    fn deactivate_plan(&self) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
        let (id, request, requests, role) = (self.id.clone(), self.request, self.requests, self.role);
        move || {
            deactivate_plan(
                async move { api::fetch_by_id(&id).await },
                request,
                api::fetch_for_role(role.get_untracked()),
                requests,
            )
        }
    }

    pub fn deactivate(&self) {
        let key = TransitionKey::new(EntityKind::Request, self.id.clone(), ActionId::Deactivate);
        spawn_transition(
            &self.scope,
            self.ui,
            key,
            api::update_status(self.id.clone(), RequestStatus::Inactive),
            self.deactivate_plan(),
            |_| {},
        );
    }

    /// Create a quote for this request; a new attempt gets a new key
    pub fn create_quote(&self, dto: CreateQuoteDto) {
        if let Err(errors) = dto.validate() {
            self.ui.errors.set(errors);
            return;
        }
        let key = TransitionKey::new(EntityKind::Request, self.id.clone(), ActionId::CreateQuote)
            .with_nonce(nonce());
        let show_form = self.show_quote_form;
        spawn_transition(
            &self.scope,
            self.ui,
            key,
            quote_api::create(dto),
            self.refetch_plan(),
            move |quote: QuoteDto| {
                log::info!("quote {} created", quote.id);
                show_form.set(false);
            },
        );
    }

    pub fn run(&self, action: ActionId) {
        match action {
            ActionId::Deactivate => self.deactivate(),
            ActionId::CreateQuote => self.show_quote_form.set(true),
            other => log::error!("action {} is not handled on requests", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::workflow::{after_mutate, MutationFailure, RefetchOutcome};
    use futures::executor::block_on;
    use futures::future::ready;
    use leptos::reactive::owner::Owner;

    fn request(status: &str) -> RequestDto {
        serde_json::from_value(serde_json::json!({
            "id": "s1",
            "eventDate": "2025-05-10",
            "location": "San Salvador",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_deactivation_refreshes_requests_list() {
        let owner = Owner::new();
        owner.with(|| {
            let detail = RwSignal::new(Some(request("ACTIVO")));
            let requests = RwSignal::new(RequestListState::default());
            requests.update(|s| s.set_items(vec![request("ACTIVO")]));
            let scope = ViewScope::new();
            let key = TransitionKey::new(EntityKind::Request, "s1", ActionId::Deactivate);

            let plan = deactivate_plan(
                ready(Ok(request("INACTIVO"))),
                detail,
                ready(Ok(vec![request("INACTIVO")])),
                requests,
            );
            let outcome = block_on(after_mutate(&scope, key, ready(Ok::<_, MutationFailure>(())), plan))
                .unwrap();

            assert!(outcome.report().unwrap().is_clean());
            assert_eq!(
                requests.with_untracked(|s| s.items[0].status()),
                RequestStatus::Inactive
            );
            assert_eq!(
                detail.with_untracked(|r| r.as_ref().map(|r| r.status())),
                Some(RequestStatus::Inactive)
            );
        });
    }
}
