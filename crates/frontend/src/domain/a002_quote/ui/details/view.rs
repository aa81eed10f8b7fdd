use contracts::enums::{EntityKind, Role};
use contracts::workflow::{ActionId, EligibilityFlags};
use leptos::prelude::*;
use thaw::*;

use super::view_model::QuoteDetailsViewModel;
use crate::domain::a003_reservation::ui::create::ReservationCreateForm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::action_bar::{use_eligibility, ActionBar};
use crate::shared::components::form::TextAreaField;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::components::warning_banner::{ErrorList, WarningBanner};
use crate::shared::date_utils::{format_date_opt, format_money};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::refresh::use_view_scope;
use crate::system::auth::context::current_role;

#[component]
pub fn QuoteDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let vm = QuoteDetailsViewModel::new(id, use_view_scope());
    vm.load();

    let status = vm.status();
    let eligibility = use_eligibility(EntityKind::Quote, status, Signal::stored(EligibilityFlags::default()));
    let role = current_role();
    let (quote, ui, notes) = (vm.quote, vm.ui, vm.notes);
    let (error, loading, show_convert) = (vm.error, vm.loading, vm.show_convert);
    let vm = StoredValue::new(vm);

    // notes only matter while the client can still decide
    let can_decide = move || {
        role.get() == Some(Role::Client)
            && eligibility.with(|e| e.is_available(ActionId::Approve) || e.is_available(ActionId::Reject))
    };

    let on_converted = Callback::new(move |reservation: contracts::domain::a003_reservation::ReservationDetail| {
        let key = detail_tab_key(EntityKind::Reservation, &reservation.id);
        tabs_store.open_tab(&key, &detail_tab_label(EntityKind::Reservation, reservation.display_name()));
    });

    view! {
        <PageFrame page_id="a002_quote--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h2>
                    {move || quote.with(|q| q.as_ref().map(|q| q.display_name().to_string()).unwrap_or_else(|| "Cotización".to_string()))}
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
                <Show when=move || loading.get() && quote.with(|q| q.is_none())>
                    <Spinner label="Cargando..." />
                </Show>

                {move || quote.get().map(|q| {
                    let items = q.items.clone();
                    view! {
                        <dl class="detail-grid">
                            <dt>"Cliente"</dt>
                            <dd>{q.client.as_ref().map(|c| c.display_contact()).unwrap_or_default()}</dd>
                            <dt>"Inicio"</dt><dd>{format_date_opt(q.start_date.as_deref())}</dd>
                            <dt>"Fin"</dt><dd>{format_date_opt(q.end_date.as_deref())}</dd>
                            <dt>"Horas estimadas"</dt>
                            <dd>{q.estimated_hours.map(|h| h.to_string()).unwrap_or_else(|| "-".to_string())}</dd>
                        </dl>

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
                                {items.into_iter().map(|item| view! {
                                    <TableRow>
                                        <TableCell>{item.service_name.clone().unwrap_or(item.description.clone())}</TableCell>
                                        <TableCell>{item.quantity.to_string()}</TableCell>
                                        <TableCell>{format_money(item.unit_price)}</TableCell>
                                        <TableCell>{format_money(item.total)}</TableCell>
                                    </TableRow>
                                }).collect_view()}
                            </TableBody>
                        </Table>

                        <dl class="detail-grid detail-grid--totals">
                            <dt>"Subtotal"</dt><dd>{format_money(q.subtotal)}</dd>
                            <dt>"Impuestos"</dt><dd>{format_money(q.tax_total)}</dd>
                            <dt>"Costos adicionales"</dt><dd>{format_money(q.additional_costs)}</dd>
                            <dt>"Total"</dt><dd><strong>{format_money(q.total)}</strong></dd>
                        </dl>
                    }
                })}

                <Show when=can_decide>
                    <TextAreaField label="Comentarios (opcional)" value=notes rows=2 />
                </Show>

                <ActionBar
                    eligibility=eligibility
                    busy=Signal::derive(move || ui.busy.get())
                    on_action=Callback::new(move |action| vm.with_value(|vm| vm.run(action)))
                />

                {move || {
                    if !show_convert.get() {
                        return None;
                    }
                    quote.get().map(|q| view! {
                        <ReservationCreateForm
                            quote=q
                            busy=Signal::derive(move || ui.busy.get())
                            on_submit=Callback::new(move |dto| vm.with_value(|vm| vm.convert(dto, on_converted)))
                            on_cancel=Callback::new(move |_| show_convert.set(false))
                        />
                    })
                }}
            </div>
        </PageFrame>
    }
}
