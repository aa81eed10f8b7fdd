pub mod state;

use contracts::domain::a001_request::RequestDto;
use contracts::domain::common::CanonicalStatus;
use contracts::enums::{EntityKind, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::create::RequestCreateForm;
use crate::domain::a001_request::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::components::warning_banner::WarningBanner;
use crate::shared::date_utils::format_date_es;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, filter_list, get_sort_indicator, sort_list, SearchInput, Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::refresh::{use_view_scope, TransitionUi};
use crate::system::auth::context::current_role;
use state::use_store;

impl Sortable for RequestDto {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "name" => self.display_name().to_lowercase().cmp(&other.display_name().to_lowercase()),
            "location" => self.location.to_lowercase().cmp(&other.location.to_lowercase()),
            "status" => self.status().cmp(&other.status()),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => self.event_date.cmp(&other.event_date),
        }
    }
}

impl Searchable for RequestDto {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.display_name(), filter)
            || contains_ci(&self.location, filter)
            || contains_ci(&self.requested_services, filter)
            || self
                .client
                .as_ref()
                .is_some_and(|c| contains_ci(&c.name, filter))
    }
}

/// Requests of the viewer: all of them for admins, own ones for clients
#[component]
pub fn RequestList() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let role = current_role();
    let state = use_store();
    let scope = use_view_scope();
    let ui = TransitionUi::new();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let show_form = RwSignal::new(false);

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
                    log::warn!("Failed to fetch requests: {}", e);
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

    let open_detail = move |request: &RequestDto| {
        let key = detail_tab_key(EntityKind::Request, &request.id);
        tabs_store.open_tab(&key, &detail_tab_label(EntityKind::Request, &request.display_name()));
    };

    let is_admin = move || role.get() == Some(Role::Admin);
    let is_client = move || role.get() == Some(Role::Client);

    view! {
        <PageFrame page_id="a001_request--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h2>{move || if is_admin() { "Solicitudes" } else { "Mis solicitudes" }}</h2>
                <Space>
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                        on_change=Callback::new(move |q: String| state.update(|s| s.search_query = q))
                        placeholder="Buscar por evento, lugar o servicio"
                    />
                    <Show when=is_client>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| show_form.update(|v| *v = !*v)
                        >
                            {icon("plus")}
                            {move || if show_form.get() { " Ocultar formulario" } else { " Nueva solicitud" }}
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data() disabled=loading>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </Space>
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
            <WarningBanner warnings=ui.warnings />

            <Show when=move || show_form.get() && is_client()>
                <RequestCreateForm
                    scope=scope.clone()
                    ui=ui
                    on_created=Callback::new(move |_| show_form.set(false))
                    apply_list=Callback::new(move |items: Vec<RequestDto>| state.update(|s| s.set_items(items)))
                />
            </Show>

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {header("name", "Evento")}
                            {header("event_date", "Fecha")}
                            {header("location", "Lugar")}
                            <TableHeaderCell>"Servicios"</TableHeaderCell>
                            <Show when=is_admin>
                                <TableHeaderCell>"Cliente"</TableHeaderCell>
                            </Show>
                            {header("status", "Estado")}
                            {header("created_at", "Creada")}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if loading.get() && !state.with(|s| s.is_loaded) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="7">
                                            <Flex justify=FlexJustify::Center gap=FlexGap::Small>
                                                <Spinner />
                                                "Cargando..."
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            let rows = state.with(|s| filter_list(s.items.clone(), &s.search_query));
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="7">"No hay solicitudes"</TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            rows.into_iter().map(|request| {
                                let status = CanonicalStatus::from(request.status());
                                let client = request.client.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                                let created = request.created_at.as_deref().map(format_date_es).unwrap_or_default();
                                let row = request.clone();
                                let name = request.display_name();
                                let event_date = format_date_es(&request.event_date);
                                let location = request.location.clone();
                                let requested_services = request.requested_services.clone();
                                view! {
                                    <TableRow attr:class="row--clickable" on:click=move |_| open_detail(&row)>
                                        <TableCell>{name}</TableCell>
                                        <TableCell>{event_date}</TableCell>
                                        <TableCell>{location}</TableCell>
                                        <TableCell>{requested_services}</TableCell>
                                        <Show when=is_admin>
                                            {
                                                let client = client.clone();
                                                view! { <TableCell>{client}</TableCell> }
                                            }
                                        </Show>
                                        <TableCell><StatusBadge status=status /></TableCell>
                                        <TableCell>{created}</TableCell>
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
