pub mod state;

use contracts::domain::a002_quote::QuoteDto;
use contracts::domain::common::CanonicalStatus;
use contracts::enums::{EntityKind, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_quote::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::status_badge::{matches_status, StatusBadge, StatusFilter};
use crate::shared::date_utils::{format_date_opt, format_money};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, filter_list, get_sort_indicator, sort_list, SearchInput, Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::current_role;
use state::{create_status_filter, use_store};

impl Sortable for QuoteDto {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "name" => self.display_name().to_lowercase().cmp(&other.display_name().to_lowercase()),
            "event_date" => self.event_date().cmp(&other.event_date()),
            "total" => self.total.total_cmp(&other.total),
            "status" => self.status().cmp(&other.status()),
            _ => self.created_at.cmp(&other.created_at),
        }
    }
}

impl Searchable for QuoteDto {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(self.display_name(), filter)
            || self
                .client
                .as_ref()
                .is_some_and(|c| contains_ci(&c.name, filter))
    }
}

/// Quotes of the viewer with a status filter
#[component]
pub fn QuoteList() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let role = current_role();
    let state = use_store();
    let status_filter = create_status_filter();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let role = role.get_untracked();
        spawn_local(async move {
            match api::fetch_for_role(role).await {
                Ok(items) => {
                    let _ = state.try_update(|s| s.set_items(items));
                }
                Err(e) => {
                    log::warn!("Failed to fetch quotes: {}", e);
                    let _ = set_error.try_set(Some(e));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
            let (f, asc) = (s.sort_field.clone(), s.sort_ascending);
            sort_list(&mut s.items, &f, asc);
        });
    };

    let header = move |field: &'static str, title: &'static str| {
        view! {
            <TableHeaderCell>
                <span class="sortable" on:click=move |_| toggle_sort(field)>
                    {title}
                    {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                </span>
            </TableHeaderCell>
        }
    };

    let visible = move || {
        let filter = status_filter.get();
        state.with(|s| {
            filter_list(s.items.clone(), &s.search_query)
                .into_iter()
                .filter(|q| matches_status(filter, q.status().into()))
                .collect::<Vec<_>>()
        })
    };

    let is_admin = move || role.get() == Some(Role::Admin);

    view! {
        <PageFrame page_id="a002_quote--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h2>{move || if is_admin() { "Cotizaciones" } else { "Mis cotizaciones" }}</h2>
                <Space>
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                        on_change=Callback::new(move |q: String| state.update(|s| s.search_query = q))
                        placeholder="Buscar por evento o cliente"
                    />
                    <StatusFilter kind=EntityKind::Quote value=status_filter />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data() disabled=loading>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </Space>
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {header("name", "Evento")}
                            <Show when=is_admin>
                                <TableHeaderCell>"Cliente"</TableHeaderCell>
                            </Show>
                            {header("event_date", "Fecha")}
                            {header("total", "Total")}
                            {header("status", "Estado")}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if loading.get() && !state.with(|s| s.is_loaded) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="5">
                                            <Flex justify=FlexJustify::Center gap=FlexGap::Small>
                                                <Spinner />
                                                "Cargando..."
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            let rows = visible();
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="5">"No hay cotizaciones"</TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            rows.into_iter().map(|quote| {
                                let status = CanonicalStatus::from(quote.status());
                                let key = detail_tab_key(EntityKind::Quote, &quote.id);
                                let title = detail_tab_label(EntityKind::Quote, quote.display_name());
                                let client = quote.client.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                                let name = quote.display_name().to_string();
                                let event_date = format_date_opt(quote.event_date());
                                view! {
                                    <TableRow attr:class="row--clickable" on:click=move |_| tabs_store.open_tab(&key, &title)>
                                        <TableCell>{name}</TableCell>
                                        <Show when=is_admin>
                                            {
                                                let client = client.clone();
                                                view! { <TableCell>{client}</TableCell> }
                                            }
                                        </Show>
                                        <TableCell>{event_date}</TableCell>
                                        <TableCell>{format_money(quote.total)}</TableCell>
                                        <TableCell><StatusBadge status=status /></TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}
