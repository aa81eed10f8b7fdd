use contracts::enums::Role;
use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for the listed roles
#[component]
pub fn RequireRole(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                let state = auth_state.get();
                state.is_authenticated()
                    && state.role().map(|r| roles.contains(&r)).unwrap_or(false)
            }
            fallback=|| view! {
                <div class="access-denied">"Acceso denegado. No tienes permisos para ver esta sección."</div>
            }
        >
            {children()}
        </Show>
    }
}
