//! Refresh-after-mutate orchestration.
//!
//! A write is awaited first. Once it succeeds the detail and list refetches
//! run concurrently; each is caught on its own and a failure only produces a
//! warning. Results are applied only while the owning [`ViewScope`] is alive.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::enums::EntityKind;

use super::action::ActionId;
use super::error::{MutationFailure, RefetchFailure, RefetchTarget};

/// What a transition writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Entity(EntityKind),
    /// Console accounts, managed by admins
    User,
}

impl Subject {
    pub fn code(&self) -> &'static str {
        match self {
            Subject::Entity(kind) => kind.code(),
            Subject::User => "user",
        }
    }
}

/// Identity of one logical transition, used to drop repeated submits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    pub subject: Subject,
    pub id: String,
    pub action: ActionId,
    pub nonce: Option<u64>,
}

impl TransitionKey {
    pub fn new(kind: EntityKind, id: impl Into<String>, action: ActionId) -> Self {
        Self {
            subject: Subject::Entity(kind),
            id: id.into(),
            action,
            nonce: None,
        }
    }

    pub fn user(id: impl Into<String>, action: ActionId) -> Self {
        Self {
            subject: Subject::User,
            id: id.into(),
            action,
            nonce: None,
        }
    }

    /// For actions that may legitimately repeat on the same entity (adding tasks)
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

impl std::fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.subject.code(), self.id, self.action)?;
        if let Some(nonce) = self.nonce {
            write!(f, "#{}", nonce)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Transitions {
    in_flight: HashSet<TransitionKey>,
    completed: HashSet<TransitionKey>,
}

#[derive(Debug, Default)]
struct ScopeState {
    closed: AtomicBool,
    transitions: Mutex<Transitions>,
}

/// Lifetime token of one view. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    state: Arc<ScopeState>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn transitions(&self) -> MutexGuard<'_, Transitions> {
        // a poisoned lock still holds valid sets
        self.state
            .transitions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_alive(&self) -> bool {
        !self.state.closed.load(Ordering::Acquire)
    }

    /// Called on view teardown; later refetch results are discarded
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::Release);
    }

    /// Registers `key` as in flight. False when it is already running or done.
    pub fn begin(&self, key: &TransitionKey) -> bool {
        let mut transitions = self.transitions();
        if transitions.completed.contains(key) {
            return false;
        }
        transitions.in_flight.insert(key.clone())
    }

    /// A failed transition may be retried, a successful one may not
    pub fn finish(&self, key: &TransitionKey, succeeded: bool) {
        let mut transitions = self.transitions();
        transitions.in_flight.remove(key);
        if succeeded {
            transitions.completed.insert(key.clone());
        }
    }
}

/// A refetch: the fetch future and the closure that stores its result
pub struct Refetch<'a> {
    fetch: LocalBoxFuture<'a, Result<Box<dyn FnOnce() + 'a>, String>>,
}

impl<'a> Refetch<'a> {
    pub fn new<T, Fut, A>(fetch: Fut, apply: A) -> Self
    where
        T: 'a,
        Fut: Future<Output = Result<T, String>> + 'a,
        A: FnOnce(T) + 'a,
    {
        let fetch = async move {
            let value = fetch.await?;
            Ok(Box::new(move || apply(value)) as Box<dyn FnOnce() + 'a>)
        }
        .boxed_local();
        Self { fetch }
    }
}

/// What to refetch once the write succeeded
#[derive(Default)]
pub struct RefetchPlan<'a> {
    pub detail: Option<Refetch<'a>>,
    pub list: Option<Refetch<'a>>,
}

impl<'a> RefetchPlan<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detail(mut self, refetch: Refetch<'a>) -> Self {
        self.detail = Some(refetch);
        self
    }

    pub fn list(mut self, refetch: Refetch<'a>) -> Self {
        self.list = Some(refetch);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefetchOutcome {
    /// Nothing planned for this target
    Skipped,
    Applied,
    /// Fetched after the view was closed, result dropped
    Discarded,
    Failed(RefetchFailure),
}

impl RefetchOutcome {
    pub fn failure(&self) -> Option<&RefetchFailure> {
        match self {
            RefetchOutcome::Failed(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub detail: RefetchOutcome,
    pub list: RefetchOutcome,
}

impl RefreshReport {
    pub fn warnings(&self) -> Vec<&RefetchFailure> {
        [&self.detail, &self.list]
            .into_iter()
            .filter_map(RefetchOutcome::failure)
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings().is_empty()
    }
}

#[derive(Debug)]
pub enum MutateOutcome<T> {
    Done { value: T, report: RefreshReport },
    /// Same transition already running or done in this scope; nothing ran
    Duplicate,
}

impl<T> MutateOutcome<T> {
    pub fn report(&self) -> Option<&RefreshReport> {
        match self {
            MutateOutcome::Done { report, .. } => Some(report),
            MutateOutcome::Duplicate => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, MutateOutcome::Duplicate)
    }
}

/// Run `mutation`, then the refetches in `plan`.
///
/// Mutation errors are returned and no refetch runs. Refetch errors are
/// logged and reported, never returned.
pub async fn after_mutate<'a, T, M>(
    scope: &ViewScope,
    key: TransitionKey,
    mutation: M,
    plan: RefetchPlan<'a>,
) -> Result<MutateOutcome<T>, MutationFailure>
where
    M: Future<Output = Result<T, MutationFailure>>,
{
    if !scope.begin(&key) {
        log::debug!("transition {} already submitted, skipping", key);
        return Ok(MutateOutcome::Duplicate);
    }

    let value = match mutation.await {
        Ok(value) => value,
        Err(err) => {
            scope.finish(&key, false);
            log::error!("transition {} failed: {}", key, err);
            return Err(err);
        }
    };
    scope.finish(&key, true);

    let (detail, list) = futures::join!(
        run_refetch(scope, RefetchTarget::Detail, plan.detail),
        run_refetch(scope, RefetchTarget::List, plan.list),
    );

    Ok(MutateOutcome::Done {
        value,
        report: RefreshReport { detail, list },
    })
}

async fn run_refetch(
    scope: &ViewScope,
    target: RefetchTarget,
    refetch: Option<Refetch<'_>>,
) -> RefetchOutcome {
    let Some(refetch) = refetch else {
        return RefetchOutcome::Skipped;
    };
    if !scope.is_alive() {
        return RefetchOutcome::Discarded;
    }
    match refetch.fetch.await {
        Ok(apply) => {
            if scope.is_alive() {
                apply();
                RefetchOutcome::Applied
            } else {
                RefetchOutcome::Discarded
            }
        }
        Err(message) => {
            let failure = RefetchFailure { target, message };
            log::warn!("{}", failure);
            RefetchOutcome::Failed(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_quote::{QuoteDto, QuoteStatus};
    use crate::domain::common::CanonicalStatus;
    use crate::enums::Role;
    use crate::workflow::eligibility::{resolve, EligibilityFlags};
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::ready;
    use std::cell::{Cell, RefCell};

    fn key() -> TransitionKey {
        TransitionKey::new(EntityKind::Quote, "q1", ActionId::Approve)
    }

    fn quote(status: &str) -> QuoteDto {
        serde_json::from_value(serde_json::json!({
            "id": "q1",
            "eventName": "Boda",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_client_approves_pending_quote() {
        let backend = RefCell::new(quote("PENDIENTE"));
        let detail = RefCell::new(quote("PENDIENTE"));
        let list: RefCell<Vec<QuoteDto>> = RefCell::new(vec![]);
        let scope = ViewScope::new();

        let before = resolve(
            EntityKind::Quote,
            detail.borrow().status().into(),
            Some(Role::Client),
            EligibilityFlags::default(),
        );
        assert!(before.check(ActionId::Approve).is_ok());

        let mutation = async {
            backend.borrow_mut().raw_status = Some("APROBADA".into());
            Ok::<_, MutationFailure>(())
        };
        let plan = RefetchPlan::new()
            .detail(Refetch::new(
                async { Ok(backend.borrow().clone()) },
                |q| *detail.borrow_mut() = q,
            ))
            .list(Refetch::new(
                async { Ok(vec![backend.borrow().clone()]) },
                |qs| *list.borrow_mut() = qs,
            ));

        let outcome = block_on(after_mutate(&scope, key(), mutation, plan)).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.detail, RefetchOutcome::Applied);
        assert_eq!(report.list, RefetchOutcome::Applied);
        assert!(report.is_clean());

        assert_eq!(detail.borrow().status(), QuoteStatus::Approved);
        assert_eq!(list.borrow().len(), 1);
        let after = resolve(
            EntityKind::Quote,
            CanonicalStatus::from(detail.borrow().status()),
            Some(Role::Client),
            EligibilityFlags::default(),
        );
        assert!(after.available.is_empty());
    }

    #[test]
    fn test_list_failure_is_a_warning() {
        let scope = ViewScope::new();
        let applied = Cell::new(false);
        let plan = RefetchPlan::new()
            .detail(Refetch::new(ready(Ok(1)), |_| applied.set(true)))
            .list(Refetch::new(ready(Err::<(), _>("500".to_string())), |_| {
                panic!("failed refetch must not apply")
            }));

        let outcome = block_on(after_mutate(&scope, key(), ready(Ok(())), plan)).unwrap();
        let report = outcome.report().unwrap();
        assert!(applied.get());
        assert_eq!(report.detail, RefetchOutcome::Applied);
        let warnings = report.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].target, RefetchTarget::List);
        assert_eq!(warnings[0].message, "500");
    }

    #[test]
    fn test_mutation_failure_skips_refetch() {
        let scope = ViewScope::new();
        let fetched = Cell::new(false);
        let plan = RefetchPlan::new().detail(Refetch::new(
            async {
                fetched.set(true);
                Ok(())
            },
            |_| {},
        ));
        let mutation = ready(Err::<(), _>(MutationFailure::new(
            "Solo se pueden aprobar cotizaciones pendientes",
        )));

        let err = block_on(after_mutate(&scope, key(), mutation, plan)).unwrap_err();
        assert_eq!(err.message, "Solo se pueden aprobar cotizaciones pendientes");
        assert!(!fetched.get());
        // failed transitions can be retried
        assert!(scope.begin(&key()));
    }

    #[test]
    fn test_duplicate_key_does_not_poll_mutation() {
        let scope = ViewScope::new();
        let calls = Cell::new(0);
        let run = || {
            block_on(after_mutate(
                &scope,
                key(),
                async {
                    calls.set(calls.get() + 1);
                    Ok::<_, MutationFailure>(())
                },
                RefetchPlan::new(),
            ))
            .unwrap()
        };

        assert!(!run().is_duplicate());
        assert!(run().is_duplicate());
        assert_eq!(calls.get(), 1);

        // in flight keys are rejected too
        let other = key().with_nonce(7);
        assert!(scope.begin(&other));
        let outcome = block_on(after_mutate(&scope, other, ready(Ok(())), RefetchPlan::new()));
        assert!(outcome.unwrap().is_duplicate());
    }

    #[test]
    fn test_closed_scope_discards_results() {
        let scope = ViewScope::new();
        let applied = Cell::new(false);
        let plan = RefetchPlan::new()
            .detail(Refetch::new(
                async {
                    // view torn down while the refetch was in flight
                    scope.close();
                    Ok(())
                },
                |_| applied.set(true),
            ))
            .list(Refetch::new(ready(Ok(())), |_| applied.set(true)));

        let outcome = block_on(after_mutate(&scope, key(), ready(Ok(())), plan)).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.detail, RefetchOutcome::Discarded);
        assert_eq!(report.list, RefetchOutcome::Discarded);
        assert!(!applied.get());
    }

    #[test]
    fn test_refetches_run_concurrently() {
        // detail waits for a value that only the list refetch sends
        let scope = ViewScope::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let seen = Cell::new(0);
        let plan = RefetchPlan::new()
            .detail(Refetch::new(
                async { rx.await.map_err(|e| e.to_string()) },
                |v| seen.set(v),
            ))
            .list(Refetch::new(
                async move {
                    tx.send(42).map_err(|_| "receiver dropped".to_string())?;
                    Ok(())
                },
                |_| {},
            ));

        let outcome = block_on(after_mutate(&scope, key(), ready(Ok(())), plan)).unwrap();
        assert!(outcome.report().unwrap().is_clean());
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_skipped_targets() {
        let scope = ViewScope::new();
        let outcome = block_on(after_mutate(
            &scope,
            key(),
            ready(Ok::<_, MutationFailure>(5)),
            RefetchPlan::new(),
        ))
        .unwrap();
        match outcome {
            MutateOutcome::Done { value, report } => {
                assert_eq!(value, 5);
                assert_eq!(report.detail, RefetchOutcome::Skipped);
                assert_eq!(report.list, RefetchOutcome::Skipped);
            }
            MutateOutcome::Duplicate => panic!("unexpected duplicate"),
        }
    }

    #[test]
    fn test_user_keys_do_not_collide_with_entities() {
        let user = TransitionKey::user("q1", ActionId::Approve);
        assert_ne!(user, key());
        assert_eq!(user.to_string(), "user/q1/approve");
        assert_eq!(key().with_nonce(7).to_string(), "quote/q1/approve#7");

        let scope = ViewScope::new();
        assert!(scope.begin(&key()));
        assert!(scope.begin(&user));
    }
}
