//! Top bar: brand, sidebar toggle, signed in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        ctx.close_all();
        do_logout(set_auth_state);
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Punto Evento"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user_info.as_ref().map(|u| u.name.clone()).unwrap_or_else(|| "Invitado".to_string())
                        })}
                    </span>
                    <span class="top-header__role">
                        {move || auth_state.with(|s| s.role().map(|r| r.display_name()).unwrap_or(""))}
                    </span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
