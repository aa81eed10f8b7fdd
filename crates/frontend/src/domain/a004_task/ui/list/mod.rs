mod state;

use contracts::domain::a004_task::{count_by_status, TaskDto, TaskStatus};
use contracts::domain::common::CanonicalStatus;
use contracts::enums::EntityKind;
use contracts::workflow::{ActionId, EligibilityFlags, Refetch, RefetchPlan, TransitionKey, ViewScope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_task::api;
use crate::shared::components::action_bar::{use_eligibility, ActionBar};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::components::warning_banner::{ErrorList, WarningBanner};
use crate::shared::date_utils::{format_date_opt, format_datetime_es};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, filter_list, get_sort_indicator, sort_list, SearchInput, Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::refresh::{spawn_transition, use_view_scope, TransitionUi};
use state::{create_state, TaskListState};

impl Sortable for TaskDto {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "title" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "event" => self.reservation_event_name.cmp(&other.reservation_event_name),
            "status" => self.status().cmp(&other.status()),
            _ => self.start_datetime.cmp(&other.start_datetime),
        }
    }
}

impl Searchable for TaskDto {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.title, filter)
            || self
                .reservation_event_name
                .as_deref()
                .is_some_and(|n| contains_ci(n, filter))
            || self
                .reservation_location
                .as_deref()
                .is_some_and(|l| contains_ci(l, filter))
    }
}

/// Status written by a task action
pub fn target_status(action: ActionId) -> Option<TaskStatus> {
    match action {
        ActionId::Start => Some(TaskStatus::InProgress),
        ActionId::Complete => Some(TaskStatus::Completed),
        ActionId::Cancel => Some(TaskStatus::Cancelled),
        _ => None,
    }
}

/// Run a status action on one task, then refetch with `plan`
pub fn run_task_action(
    scope: &ViewScope,
    ui: TransitionUi,
    task_id: String,
    action: ActionId,
    plan: impl FnOnce() -> RefetchPlan<'static> + 'static,
) {
    let Some(status) = target_status(action) else {
        log::error!("action {} is not handled on tasks", action);
        return;
    };
    let key = TransitionKey::new(EntityKind::Task, task_id.clone(), action);
    spawn_transition(scope, ui, key, api::update_status(task_id, status), plan, |_| {});
}

fn list_refetch(state: RwSignal<TaskListState>) -> impl FnOnce() -> RefetchPlan<'static> + 'static {
    move || {
        RefetchPlan::default().list(Refetch::new(api::fetch_my_tasks(), move |items| {
            state.update(|s| s.set_items(items))
        }))
    }
}

#[component]
fn TaskActions(
    task: TaskDto,
    scope: ViewScope,
    ui: TransitionUi,
    state: RwSignal<TaskListState>,
) -> impl IntoView {
    let status = Signal::stored(Some(CanonicalStatus::from(task.status())));
    let eligibility = use_eligibility(EntityKind::Task, status, Signal::stored(EligibilityFlags::default()));
    let task_id = StoredValue::new(task.id);
    let scope = StoredValue::new(scope);

    view! {
        <ActionBar
            eligibility=eligibility
            busy=Signal::derive(move || ui.busy.get())
            on_action=Callback::new(move |action| {
                scope.with_value(|scope| {
                    run_task_action(scope, ui, task_id.get_value(), action, list_refetch(state))
                })
            })
        />
    }
}

#[component]
fn Counter(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="counter">
            <div class="counter__value">{value}</div>
            <div class="counter__label">{label}</div>
        </div>
    }
}

/// Tasks assigned to the signed in employee
#[component]
pub fn TaskList() -> impl IntoView {
    let scope = use_view_scope();
    let ui = TransitionUi::new();
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_my_tasks().await {
                Ok(items) => {
                    let _ = state.try_update(|s| s.set_items(items));
                }
                Err(e) => {
                    log::warn!("Failed to fetch tasks: {}", e);
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

    let counters = move || {
        let counts = state.with(|s| count_by_status(&s.items));
        [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed]
            .into_iter()
            .map(|status| {
                let label = CanonicalStatus::from(status).label();
                view! { <Counter label=label value=counts.get(&status).copied().unwrap_or(0) /> }
            })
            .collect_view()
    };

    let scope = StoredValue::new(scope);

    view! {
        <PageFrame page_id="a004_task--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h2>"Mis tareas"</h2>
                <Space>
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                        on_change=Callback::new(move |q: String| state.update(|s| s.search_query = q))
                        placeholder="Buscar por tarea o evento"
                    />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data() disabled=loading>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </Space>
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
            <ErrorList errors=ui.errors />
            <WarningBanner warnings=ui.warnings />

            <Flex class="counters" gap=FlexGap::Large>{counters}</Flex>

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {header("title", "Tarea")}
                            {header("event", "Evento")}
                            <TableHeaderCell>"Lugar"</TableHeaderCell>
                            {header("start", "Inicio")}
                            {header("status", "Estado")}
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if loading.get() && !state.with(|s| s.is_loaded) {
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
                            let rows = state.with(|s| filter_list(s.items.clone(), &s.search_query));
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="6">"No tienes tareas asignadas"</TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            rows.into_iter().map(|task| {
                                let status = CanonicalStatus::from(task.status());
                                let start = task
                                    .start_datetime
                                    .as_deref()
                                    .map(format_datetime_es)
                                    .unwrap_or_else(|| format_date_opt(task.reservation_scheduled_for.as_deref()));
                                let title = task.title.clone();
                                let description = task.description.clone().unwrap_or_default();
                                let event_name = task.reservation_event_name.clone().unwrap_or_default();
                                let location = task.reservation_location.clone().unwrap_or_default();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <div>{title}</div>
                                            <div class="text-muted">{description}</div>
                                        </TableCell>
                                        <TableCell>{event_name}</TableCell>
                                        <TableCell>{location}</TableCell>
                                        <TableCell>{start}</TableCell>
                                        <TableCell><StatusBadge status=status /></TableCell>
                                        <TableCell>
                                            <TaskActions task=task scope=scope.get_value() ui=ui state=state />
                                        </TableCell>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_status() {
        assert_eq!(target_status(ActionId::Start), Some(TaskStatus::InProgress));
        assert_eq!(target_status(ActionId::Complete), Some(TaskStatus::Completed));
        assert_eq!(target_status(ActionId::Cancel), Some(TaskStatus::Cancelled));
        assert_eq!(target_status(ActionId::Publish), None);
    }
}
