//! Tab content registry: maps a tab key to its view.

use super::tab_labels::{QUOTE_DETAIL, REQUEST_DETAIL, RESERVATION_DETAIL};
use crate::domain::a001_request::ui::details::RequestDetails;
use crate::domain::a001_request::ui::list::RequestList;
use crate::domain::a002_quote::ui::details::QuoteDetails;
use crate::domain::a002_quote::ui::list::QuoteList;
use crate::domain::a003_reservation::ui::details::ReservationDetails;
use crate::domain::a003_reservation::ui::list::ReservationList;
use crate::domain::a004_task::ui::list::TaskList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::users::ui::list::UsersListPage;
use leptos::logging::log;
use leptos::prelude::*;

/// Render the content of the tab with `key`; unknown keys get a placeholder
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        "a001_request" => view! { <RequestList /> }.into_any(),
        k if k.starts_with(REQUEST_DETAIL) => {
            let id = k[REQUEST_DETAIL.len()..].to_string();
            view! { <RequestDetails id=id on_close=on_close /> }.into_any()
        }

        "a002_quote" => view! { <QuoteList /> }.into_any(),
        k if k.starts_with(QUOTE_DETAIL) => {
            let id = k[QUOTE_DETAIL.len()..].to_string();
            view! { <QuoteDetails id=id on_close=on_close /> }.into_any()
        }

        "a003_reservation" => view! { <ReservationList /> }.into_any(),
        k if k.starts_with(RESERVATION_DETAIL) => {
            let id = k[RESERVATION_DETAIL.len()..].to_string();
            view! { <ReservationDetails id=id on_close=on_close /> }.into_any()
        }

        "a004_task" => view! { <TaskList /> }.into_any(),

        "sys_users" => view! { <UsersListPage /> }.into_any(),

        _ => {
            log!("⚠️ Unknown tab type: {}", key);
            view! { <div class="placeholder">{format!("Pestaña desconocida: {}", key)}</div> }
                .into_any()
        }
    }
}
