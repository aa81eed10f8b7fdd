//! Leptos glue for the refresh-after-mutate orchestrator.

use std::future::Future;

use contracts::workflow::{
    after_mutate, MutateOutcome, MutationFailure, Refetch, RefetchPlan, TransitionKey, ViewScope,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Scope owned by the calling component, closed when it is disposed
pub fn use_view_scope() -> ViewScope {
    let scope = ViewScope::new();
    let for_cleanup = scope.clone();
    on_cleanup(move || for_cleanup.close());
    scope
}

/// Feedback signals shared by the buttons and banners of one view
#[derive(Clone, Copy)]
pub struct TransitionUi {
    pub busy: RwSignal<bool>,
    pub errors: RwSignal<Vec<String>>,
    pub warnings: RwSignal<Vec<String>>,
}

impl TransitionUi {
    pub fn new() -> Self {
        Self {
            busy: RwSignal::new(false),
            errors: RwSignal::new(Vec::new()),
            warnings: RwSignal::new(Vec::new()),
        }
    }

    pub fn clear(&self) {
        self.errors.set(Vec::new());
        self.warnings.set(Vec::new());
    }
}

impl Default for TransitionUi {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a mutation and its refetch plan in the background.
///
/// Mutation errors land in `ui.errors` one line per message; refetch
/// failures land in `ui.warnings`. `on_done` runs after a successful
/// mutation, once the refetches settled.
pub fn spawn_transition<T, M, P, D>(
    scope: &ViewScope,
    ui: TransitionUi,
    key: TransitionKey,
    mutation: M,
    plan: P,
    on_done: D,
) where
    T: 'static,
    M: Future<Output = Result<T, MutationFailure>> + 'static,
    P: FnOnce() -> RefetchPlan<'static> + 'static,
    D: FnOnce(T) + 'static,
{
    let scope = scope.clone();
    ui.busy.set(true);
    ui.clear();
    spawn_local(async move {
        let outcome = after_mutate(&scope, key, mutation, plan()).await;
        if !scope.is_alive() {
            return;
        }
        ui.busy.set(false);
        match outcome {
            Ok(MutateOutcome::Done { value, report }) => {
                let warnings: Vec<String> = report
                    .warnings()
                    .into_iter()
                    .map(|f| format!("{} ({})", f.warning_text(), f))
                    .collect();
                ui.warnings.set(warnings);
                on_done(value);
            }
            Ok(MutateOutcome::Duplicate) => {}
            Err(failure) => ui.errors.set(failure.user_messages()),
        }
    });
}

/// Plan refreshing a detail snapshot together with the list that shows it
pub fn detail_and_list<D, L>(
    detail: impl Future<Output = Result<D, String>> + 'static,
    into_detail: RwSignal<Option<D>>,
    list: impl Future<Output = Result<Vec<L>, String>> + 'static,
    into_list: impl FnOnce(Vec<L>) + 'static,
) -> RefetchPlan<'static>
where
    D: Send + Sync + 'static,
    L: 'static,
{
    RefetchPlan::default()
        .detail(Refetch::new(detail, move |d| into_detail.set(Some(d))))
        .list(Refetch::new(list, into_list))
}

/// Millisecond timestamp, used as nonce for repeatable transitions
pub fn nonce() -> u64 {
    js_sys::Date::now() as u64
}
