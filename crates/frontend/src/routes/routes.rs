use crate::domain::{a001_request, a002_quote, a003_reservation};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use thaw::Spinner;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    tabs_store.init_router_integration();

    // list snapshots live as long as the session layout
    a001_request::ui::list::state::provide_store();
    a002_quote::ui::list::state::provide_store();
    a003_reservation::ui::list::state::provide_store();

    // a restored session lands on the role's default tab
    if tabs_store.opened.with_untracked(|t| t.is_empty()) {
        if let Some(role) = auth_state.with_untracked(|s| s.role()) {
            let key = role.landing_tab();
            tabs_store.open_tab(key, tab_label_for_key(key));
        }
    }

    view! { <Shell /> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || !auth_state.with(|s| s.restoring)
            fallback=|| view! { <div class="app-loading"><Spinner label="Cargando sesión..." /></div> }
        >
            <Show
                when=move || auth_state.with(|s| s.is_authenticated())
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
