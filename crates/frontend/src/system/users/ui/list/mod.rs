pub mod state;

use contracts::enums::Role;
use contracts::system::users::{UpdateUserDto, User};
use contracts::workflow::{ActionId, RefetchPlan, TransitionKey, ViewScope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::action_bar::{action_class, confirm};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::warning_banner::{ErrorList, WarningBanner};
use crate::shared::date_utils::format_date_es;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, sort_list, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::refresh::{nonce, spawn_transition, use_view_scope, TransitionUi};
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireRole;
use crate::system::users::api;
use crate::system::users::ui::form::{UserForm, UserSubmission};
use state::{create_state, page_plan, row_actions, UserFormMode, UsersListState};

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "email" => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            "user_type" => self.role_label().cmp(other.role_label()),
            "active" => self.active.cmp(&other.active),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Admin]>
            <UsersList />
        </RequireRole>
    }
}

fn role_badge(user: &User) -> AnyView {
    let label = user.role_label().to_string();
    let color = match user.role() {
        Some(Role::Admin) => BadgeColor::Danger,
        Some(Role::Employee) => BadgeColor::Brand,
        Some(Role::Client) => BadgeColor::Success,
        None => BadgeColor::Informative,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge> }.into_any()
}

fn list_refetch(state: RwSignal<UsersListState>) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
    move || {
        let (page, size) = state.with_untracked(|s| (s.page as u32, s.page_size as u32));
        page_plan(api::fetch_users(page, size), state)
    }
}

/// Row mutations. Toggles may repeat on the same account, a delete may not.
fn run_row_action(
    scope: &ViewScope,
    ui: TransitionUi,
    state: RwSignal<UsersListState>,
    user: User,
    action: ActionId,
) {
    if !confirm(action) {
        return;
    }
    let id = user.id.clone();
    match action {
        ActionId::Edit => state.update(|s| s.open_form(UserFormMode::Edit(user))),
        ActionId::Deactivate => spawn_transition(
            scope,
            ui,
            TransitionKey::user(id.clone(), action).with_nonce(nonce()),
            api::deactivate(id),
            list_refetch(state),
            |_| {},
        ),
        ActionId::Activate => spawn_transition(
            scope,
            ui,
            TransitionKey::user(id.clone(), action).with_nonce(nonce()),
            api::update(id, UpdateUserDto::activate()),
            list_refetch(state),
            |_| {},
        ),
        ActionId::Delete => spawn_transition(
            scope,
            ui,
            TransitionKey::user(id.clone(), action),
            api::delete(id),
            list_refetch(state),
            |_| {},
        ),
        other => log::error!("action {} is not handled on users", other),
    }
}

fn save_user(scope: &ViewScope, ui: TransitionUi, state: RwSignal<UsersListState>, submission: UserSubmission) {
    if let Err(errors) = submission.validate() {
        ui.errors.set(errors);
        return;
    }
    let close = move |user: User| {
        log::info!("user {} saved", user.id);
        state.update(|s| s.close_form());
    };
    match submission {
        UserSubmission::Create(dto) => spawn_transition(
            scope,
            ui,
            TransitionKey::user("new", ActionId::Create).with_nonce(nonce()),
            api::create(dto),
            list_refetch(state),
            close,
        ),
        UserSubmission::Update { id, dto } => spawn_transition(
            scope,
            ui,
            TransitionKey::user(id.clone(), ActionId::Edit).with_nonce(nonce()),
            api::update(id, dto),
            list_refetch(state),
            close,
        ),
    }
}

#[component]
fn UserRowActions(
    user: User,
    current_user_id: Option<String>,
    scope: ViewScope,
    ui: TransitionUi,
    state: RwSignal<UsersListState>,
) -> impl IntoView {
    let actions = row_actions(&user, current_user_id.as_deref());
    let user = StoredValue::new(user);
    let scope = StoredValue::new(scope);

    view! {
        <Space>
            {actions.into_iter().map(|(action, reason)| {
                let title = reason.unwrap_or_default();
                view! {
                    <Button
                        class=action_class(action)
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || reason.is_some() || ui.busy.get())
                        attr:title=title
                        on_click=move |_| {
                            scope.with_value(|scope| run_row_action(scope, ui, state, user.get_value(), action))
                        }
                    >
                        {action.label()}
                    </Button>
                }
            }).collect_view()}
        </Space>
    }
}

fn role_filter_value(role: Option<Role>) -> String {
    role.map(|r| r.code().to_string()).unwrap_or_default()
}

fn active_filter_value(active: Option<bool>) -> &'static str {
    match active {
        Some(true) => "active",
        Some(false) => "inactive",
        None => "",
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let scope = use_view_scope();
    let ui = TransitionUi::new();
    let (auth_state, _) = use_auth();
    let current_user_id = move || auth_state.with(|a| a.user_info.as_ref().map(|u| u.id.clone()));
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        let (page, size) = state.with_untracked(|s| (s.page, s.page_size));
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_users(page as u32, size as u32).await {
                Ok(data) => {
                    let _ = state.try_update(|s| s.set_page(data));
                }
                Err(e) => {
                    log::warn!("Failed to fetch users: {}", e);
                    let _ = set_error.try_set(Some(format!("No se pudieron cargar los usuarios: {}", e)));
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

    let visible_items = move || state.with(|s| s.visible());

    let scope = StoredValue::new(scope);
    let on_save = Callback::new(move |submission: UserSubmission| {
        scope.with_value(|scope| save_user(scope, ui, state, submission))
    });

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

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <h2>"Usuarios"</h2>
                <Space>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Buscar por nombre o correo"
                        prop:value=move || state.with(|s| s.search_query.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.search_query = value);
                        }
                    />
                    <select
                        class="form__select"
                        prop:value=move || state.with(|s| role_filter_value(s.role_filter))
                        on:change=move |ev| {
                            let role = Role::from_user_type(&event_target_value(&ev));
                            state.update(|s| s.role_filter = role);
                        }
                    >
                        <option value="">"Todos los roles"</option>
                        {Role::all().into_iter().map(|r| view! {
                            <option value=r.code()>{r.display_name()}</option>
                        }).collect_view()}
                    </select>
                    <select
                        class="form__select"
                        prop:value=move || state.with(|s| active_filter_value(s.active_filter))
                        on:change=move |ev| {
                            let active = match event_target_value(&ev).as_str() {
                                "active" => Some(true),
                                "inactive" => Some(false),
                                _ => None,
                            };
                            state.update(|s| s.active_filter = active);
                        }
                    >
                        <option value="">"Todos los estados"</option>
                        <option value="active">"Activos"</option>
                        <option value="inactive">"Inactivos"</option>
                    </select>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data() disabled=loading>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| {
                            ui.clear();
                            state.update(|s| s.open_form(UserFormMode::Create));
                        }
                    >
                        {icon("plus")}
                        " Nuevo usuario"
                    </Button>
                </Space>
            </div>

            {move || error.get().map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}
            <ErrorList errors=ui.errors />
            <WarningBanner warnings=ui.warnings />

            {move || state.with(|s| s.form.clone()).map(|mode| view! {
                <UserForm
                    mode=mode
                    busy=Signal::derive(move || ui.busy.get())
                    on_submit=on_save
                    on_cancel=Callback::new(move |_| {
                        ui.clear();
                        state.update(|s| s.close_form());
                    })
                />
            })}

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {header("name", "Nombre")}
                            {header("email", "Correo")}
                            {header("user_type", "Rol")}
                            {header("active", "Estado")}
                            {header("created_at", "Creado")}
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="6">
                                            <Flex justify=FlexJustify::Center gap=FlexGap::Small>
                                                <Spinner />
                                                "Cargando..."
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            let users = visible_items();
                            if users.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="6">"No se encontraron usuarios"</TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            let me = current_user_id();
                            users.into_iter().map(|user| {
                                let me = me.clone();
                                let badge = role_badge(&user);
                                let row_user = user.clone();
                                let created = user.created_at.as_deref().map(format_date_es).unwrap_or_default();
                                view! {
                                    <TableRow>
                                        <TableCell>{user.name}</TableCell>
                                        <TableCell>{user.email}</TableCell>
                                        <TableCell>{badge}</TableCell>
                                        <TableCell>
                                            {if user.active {
                                                view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Activo"</Badge> }.into_any()
                                            } else {
                                                view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Inactivo"</Badge> }.into_any()
                                            }}
                                        </TableCell>
                                        <TableCell>{created}</TableCell>
                                        <TableCell>
                                            <UserRowActions
                                                user=row_user
                                                current_user_id=me.clone()
                                                scope=scope.get_value()
                                                ui=ui
                                                state=state
                                            />
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>

                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                    total_count=Signal::derive(move || state.with(|s| s.total_count))
                    page_size=Signal::derive(move || state.with(|s| s.page_size))
                    on_page_change=Callback::new(move |page| {
                        state.update(|s| s.page = page);
                        load_data();
                    })
                    on_page_size_change=Callback::new(move |size| {
                        state.update(|s| {
                            s.page_size = size;
                            s.page = 0;
                        });
                        load_data();
                    })
                    page_size_options=vec![10, 20, 50]
                />
            </div>
        </PageFrame>
    }
}
