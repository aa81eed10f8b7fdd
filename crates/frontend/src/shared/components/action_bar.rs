use contracts::domain::common::CanonicalStatus;
use contracts::enums::EntityKind;
use contracts::workflow::{ActionId, Eligibility, EligibilityFlags, Resolver};
use leptos::prelude::*;
use thaw::*;

use crate::shared::config::config;
use crate::system::auth::context::current_role;

/// Eligibility of the loaded record for the signed in viewer; empty until
/// the record is loaded
pub fn use_eligibility(
    kind: EntityKind,
    status: Signal<Option<CanonicalStatus>>,
    flags: Signal<EligibilityFlags>,
) -> Signal<Eligibility> {
    let role = current_role();
    let resolver = Resolver::new(config().resolver_options());
    Signal::derive(move || match status.get() {
        Some(status) => resolver.resolve(kind, status, role.get(), flags.get()),
        None => Eligibility::default(),
    })
}

/// Guard run before every transition.
///
/// Invoking an action the resolver did not offer is a bug in the caller:
/// it panics in debug builds and is logged and ignored in release builds.
pub fn ensure_eligible(eligibility: &Eligibility, action: ActionId) -> bool {
    match eligibility.check(action) {
        Ok(()) => true,
        Err(err) => {
            log::error!("{}", err);
            debug_assert!(false, "{}", err);
            false
        }
    }
}

/// Browser confirm for actions that carry a prompt
pub fn confirm(action: ActionId) -> bool {
    let Some(message) = action.confirmation() else {
        return true;
    };
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Extra class for actions that close or discard a record
pub fn action_class(action: ActionId) -> &'static str {
    if action.is_destructive() {
        "action-bar__button action-bar__button--danger"
    } else {
        "action-bar__button"
    }
}

fn appearance(action: ActionId) -> ButtonAppearance {
    match action {
        ActionId::Approve
        | ActionId::Publish
        | ActionId::Convert
        | ActionId::CreateQuote
        | ActionId::Start
        | ActionId::Complete => ButtonAppearance::Primary,
        _ => ButtonAppearance::Secondary,
    }
}

/// One button per visible action; blocked actions are disabled with the
/// reason as tooltip
#[component]
pub fn ActionBar(
    #[prop(into)] eligibility: Signal<Eligibility>,
    #[prop(into)] busy: Signal<bool>,
    on_action: Callback<ActionId>,
) -> impl IntoView {
    move || {
        let current = eligibility.get();
        if current.is_empty() {
            return view! { <></> }.into_any();
        }
        view! {
            <Space class="action-bar">
                {current.visible().into_iter().map(|(action, reason)| {
                    let blocked = reason.is_some();
                    let title = reason.unwrap_or(action.label());
                    view! {
                        <Button
                            appearance=appearance(action)
                            class=action_class(action)
                            disabled=Signal::derive(move || blocked || busy.get())
                            attr:title=title
                            attr:data-action=action.code()
                            on_click=move |_| {
                                if !ensure_eligible(&eligibility.get_untracked(), action) {
                                    return;
                                }
                                if confirm(action) {
                                    on_action.run(action);
                                }
                            }
                        >
                            {action.label()}
                        </Button>
                    }
                }).collect_view()}
            </Space>
        }.into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_reservation::ReservationStatus;
    use contracts::enums::{EntityKind, Role};
    use contracts::workflow::{resolve, EligibilityFlags};

    fn planning_without_tasks() -> Eligibility {
        resolve(
            EntityKind::Reservation,
            ReservationStatus::Planning.into(),
            Some(Role::Admin),
            EligibilityFlags::default(),
        )
    }

    #[test]
    fn test_available_action_passes() {
        assert!(ensure_eligible(&planning_without_tasks(), ActionId::Cancel));
    }

    #[test]
    fn test_destructive_actions_get_danger_class() {
        assert!(action_class(ActionId::Cancel).ends_with("--danger"));
        assert!(action_class(ActionId::Deactivate).ends_with("--danger"));
        assert_eq!(action_class(ActionId::Publish), "action-bar__button");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_blocked_action_asserts_in_debug() {
        ensure_eligible(&planning_without_tasks(), ActionId::Publish);
    }
}
