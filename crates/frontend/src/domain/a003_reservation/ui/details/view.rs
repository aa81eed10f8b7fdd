use contracts::domain::a003_reservation::{ReservationDetail, ServiceInfo, TaskInfo};
use contracts::domain::common::CanonicalStatus;
use contracts::enums::{EntityKind, Role};
use contracts::workflow::{ActionId, EligibilityFlags};
use leptos::prelude::*;
use thaw::*;

use super::view_model::ReservationDetailsViewModel;
use crate::domain::a004_task::ui::create::TaskCreateForm;
use crate::shared::components::action_bar::{use_eligibility, ActionBar};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::components::warning_banner::{ErrorList, WarningBanner};
use crate::shared::date_utils::{format_date_opt, format_datetime_es, format_money};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::refresh::use_view_scope;
use crate::system::auth::context::current_role;

/// Clients only see tasks once the reservation left planning
pub fn tasks_visible(reservation: &ReservationDetail, role: Option<Role>) -> bool {
    role != Some(Role::Client) || reservation.tasks_visible_to_client()
}

#[component]
pub fn ReservationDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let vm = ReservationDetailsViewModel::new(id, use_view_scope());
    vm.load();

    let status = vm.status();
    let eligibility = use_eligibility(EntityKind::Reservation, status, vm.flags());
    let role = current_role();
    let (reservation, ui) = (vm.reservation, vm.ui);
    let (error, loading, show_form) = (vm.error, vm.loading, vm.show_task_form);
    let vm = StoredValue::new(vm);

    let on_task_action = Callback::new(move |(task_id, action): (String, ActionId)| {
        vm.with_value(|vm| vm.run_on_task(task_id, action))
    });

    view! {
        <PageFrame page_id="a003_reservation--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h2>
                    {move || reservation.with(|r| r.as_ref().map(|r| r.display_name().to_string()).unwrap_or_else(|| "Reservación".to_string()))}
                </h2>
                <Space>
                    {move || status.get().map(|s| view! { <StatusBadge status=s /> })}
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.with_value(|vm| vm.load())>
                        {icon("refresh")}
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </Space>
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
            <ErrorList errors=ui.errors />
            <WarningBanner warnings=ui.warnings />

            <div class="page__content">
                <Show when=move || loading.get() && reservation.with(|r| r.is_none())>
                    <Spinner label="Cargando..." />
                </Show>

                {move || reservation.get().map(|r| {
                    let progress = r.progress();
                    view! {
                        <dl class="detail-grid">
                            <dt>"Fecha"</dt>
                            <dd>{r.scheduled_for.as_deref().map(format_datetime_es).unwrap_or_else(|| format_date_opt(None))}</dd>
                            <dt>"Ubicación"</dt><dd>{r.location.clone().unwrap_or_default()}</dd>
                            <dt>"Cliente"</dt>
                            <dd>{r.client.as_ref().map(|c| c.display_contact()).unwrap_or_default()}</dd>
                            <dt>"Total cotizado"</dt>
                            <dd>{r.quote.as_ref().map(|q| format_money(q.total)).unwrap_or_default()}</dd>
                            <dt>"Notas"</dt><dd>{r.notes.clone().unwrap_or_default()}</dd>
                            <dt>"Progreso"</dt>
                            <dd>
                                <div class="progress">
                                    <div class="progress__bar" style=format!("width: {:.0}%", progress)></div>
                                </div>
                                {format!("{:.0}% ({} de {} tareas)", progress, r.completed_tasks(), r.tasks.len())}
                            </dd>
                        </dl>
                    }
                })}

                <ActionBar
                    eligibility=eligibility
                    busy=Signal::derive(move || ui.busy.get())
                    on_action=Callback::new(move |action| vm.with_value(|vm| vm.run(action)))
                />

                {move || {
                    if !show_form.get() {
                        return None;
                    }
                    reservation.get().map(|r| view! {
                        <TaskCreateForm
                            reservation=r
                            busy=Signal::derive(move || ui.busy.get())
                            on_submit=Callback::new(move |dto| vm.with_value(|vm| vm.add_task(dto)))
                            on_cancel=Callback::new(move |_| show_form.set(false))
                        />
                    })
                }}

                <h3>"Servicios"</h3>
                <ServicesPanel services=Signal::derive(move || {
                    reservation.with(|r| r.as_ref().map(|r| r.services.clone()).unwrap_or_default())
                }) />

                {move || {
                    let r = reservation.get()?;
                    if !tasks_visible(&r, role.get()) {
                        return Some(view! {
                            <div class="empty-state">"Las tareas se mostrarán cuando la reserva sea publicada"</div>
                        }.into_any());
                    }
                    Some(view! {
                        <h3>"Tareas"</h3>
                        <TasksPanel tasks=r.tasks on_action=on_task_action />
                    }.into_any())
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn ServicesPanel(services: Signal<Vec<ServiceInfo>>) -> impl IntoView {
    move || {
        let items = services.get();
        if items.is_empty() {
            return view! { <div class="empty-state">"Sin servicios"</div> }.into_any();
        }
        view! {
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Servicio"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                        <TableHeaderCell>"Total"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {items.into_iter().map(|s| view! {
                        <TableRow>
                            <TableCell>{s.description.clone()}</TableCell>
                            <TableCell>{s.quantity.to_string()}</TableCell>
                            <TableCell>{format_money(s.unit_price)}</TableCell>
                            <TableCell>{format_money(s.total)}</TableCell>
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    }
}

#[component]
fn TaskRowActions(task_id: String, status: CanonicalStatus, on_action: Callback<(String, ActionId)>) -> impl IntoView {
    let eligibility = use_eligibility(
        EntityKind::Task,
        Signal::stored(Some(status)),
        Signal::stored(EligibilityFlags::default()),
    );
    let task_id = StoredValue::new(task_id);
    view! {
        <ActionBar
            eligibility=eligibility
            busy=Signal::stored(false)
            on_action=Callback::new(move |action| on_action.run((task_id.get_value(), action)))
        />
    }
}

#[component]
fn TasksPanel(tasks: Vec<TaskInfo>, on_action: Callback<(String, ActionId)>) -> impl IntoView {
    if tasks.is_empty() {
        return view! { <div class="empty-state">"Aún no hay tareas asignadas"</div> }.into_any();
    }
    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Tarea"</TableHeaderCell>
                    <TableHeaderCell>"Empleado"</TableHeaderCell>
                    <TableHeaderCell>"Inicio"</TableHeaderCell>
                    <TableHeaderCell>"Estado"</TableHeaderCell>
                    <TableHeaderCell>""</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {tasks.into_iter().map(|task| {
                    let status = CanonicalStatus::from(task.status());
                    view! {
                        <TableRow>
                            <TableCell>{task.title.clone()}</TableCell>
                            <TableCell>{task.employee_name.clone().unwrap_or_else(|| "Sin asignar".to_string())}</TableCell>
                            <TableCell>{format_date_opt(task.start_datetime.as_deref())}</TableCell>
                            <TableCell><StatusBadge status=status /></TableCell>
                            <TableCell>
                                <TaskRowActions task_id=task.id.clone() status=status on_action=on_action />
                            </TableCell>
                        </TableRow>
                    }
                }).collect_view()}
            </TableBody>
        </Table>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(status: &str) -> ReservationDetail {
        serde_json::from_value(serde_json::json!({
            "id": "r1",
            "status": status,
            "tasks": [{"id": "t1", "title": "Montaje", "status": "PENDIENTE"}],
        }))
        .unwrap()
    }

    #[test]
    fn test_tasks_hidden_from_client_while_planning() {
        let planning = reservation("EN_PLANEACION");
        assert!(!tasks_visible(&planning, Some(Role::Client)));
        assert!(tasks_visible(&planning, Some(Role::Admin)));
        assert!(tasks_visible(&reservation("PROGRAMADA"), Some(Role::Client)));
    }
}
