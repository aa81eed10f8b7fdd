use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Tab strip plus the pages of every open tab; inactive pages stay mounted
#[component]
pub fn Center() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs">
            <div class="tabs__bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabHandle tab=tab /> }
                />
            </div>
            <div class="tabs__content">
                <Show
                    when=move || tabs_store.opened.with(|t| !t.is_empty())
                    fallback=|| view! { <div class="tabs__empty">"Selecciona una sección en el menú"</div> }
                >
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                    />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn TabHandle(tab: TabData) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| tabs_store.active.get().as_deref() == Some(key.get_value().as_str()));

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div
            class="tab"
            class:active=is_active
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span>
                {move || tabs_store.opened.with(|tabs| {
                    tabs.iter()
                        .find(|t| t.key == key.get_value())
                        .map(|t| t.title.clone())
                        .unwrap_or_default()
                })}
            </span>
            <button class="tab-close" on:click=on_close title="Cerrar">{icon("x")}</button>
        </div>
    }
}
