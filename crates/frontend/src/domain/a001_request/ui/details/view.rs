use contracts::domain::a002_quote::QuoteDto;
use contracts::domain::common::CanonicalStatus;
use contracts::enums::EntityKind;
use leptos::prelude::*;
use thaw::*;

use super::view_model::RequestDetailsViewModel;
use crate::domain::a002_quote::ui::create::QuoteCreateForm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::action_bar::{use_eligibility, ActionBar};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::components::warning_banner::{ErrorList, WarningBanner};
use crate::shared::date_utils::{format_date_es, format_date_opt, format_money};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::refresh::use_view_scope;

#[component]
pub fn RequestDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let vm = RequestDetailsViewModel::new(id, use_view_scope());
    vm.load();

    let status = vm.status();
    let eligibility = use_eligibility(EntityKind::Request, status, vm.flags());
    let (request, quotes, ui) = (vm.request, vm.quotes, vm.ui);
    let (error, loading, show_form) = (vm.error, vm.loading, vm.show_quote_form);
    let vm = StoredValue::new(vm);

    view! {
        <PageFrame page_id="a001_request--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h2>
                    {move || request.with(|r| r.as_ref().map(|r| r.display_name()).unwrap_or_else(|| "Solicitud".to_string()))}
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
                <Show when=move || loading.get() && request.with(|r| r.is_none())>
                    <Spinner label="Cargando..." />
                </Show>

                {move || request.get().map(|r| view! {
                    <dl class="detail-grid">
                        <dt>"Fecha del evento"</dt><dd>{format_date_es(&r.event_date)}</dd>
                        <dt>"Ubicación"</dt><dd>{r.location.clone()}</dd>
                        <dt>"Servicios"</dt><dd>{r.requested_services.clone()}</dd>
                        <dt>"Cliente"</dt>
                        <dd>{r.client.as_ref().map(|c| c.display_contact()).unwrap_or_default()}</dd>
                        <dt>"Notas"</dt><dd>{r.notes.clone().unwrap_or_else(|| "—".to_string())}</dd>
                        <dt>"Creada"</dt><dd>{format_date_opt(r.created_at.as_deref())}</dd>
                    </dl>
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
                    request.get().map(|r| view! {
                        <QuoteCreateForm
                            request=r
                            busy=Signal::derive(move || ui.busy.get())
                            on_submit=Callback::new(move |dto| vm.with_value(|vm| vm.create_quote(dto)))
                            on_cancel=Callback::new(move |_| show_form.set(false))
                        />
                    })
                }}

                <h3>"Cotizaciones"</h3>
                <QuotesPanel quotes=quotes />
            </div>
        </PageFrame>
    }
}

/// Quotes of one request; a row opens the quote tab
#[component]
fn QuotesPanel(quotes: RwSignal<Vec<QuoteDto>>) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    move || {
        let items = quotes.get();
        if items.is_empty() {
            return view! { <div class="empty-state">"Aún no hay cotizaciones para esta solicitud"</div> }
                .into_any();
        }
        view! {
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Evento"</TableHeaderCell>
                        <TableHeaderCell>"Fechas"</TableHeaderCell>
                        <TableHeaderCell>"Total"</TableHeaderCell>
                        <TableHeaderCell>"Estado"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {items.into_iter().map(|quote| {
                        let status = CanonicalStatus::from(quote.status());
                        let key = detail_tab_key(EntityKind::Quote, &quote.id);
                        let title = detail_tab_label(EntityKind::Quote, quote.display_name());
                        let dates = format!(
                            "{} – {}",
                            format_date_opt(quote.start_date.as_deref()),
                            format_date_opt(quote.end_date.as_deref())
                        );
                        let name = quote.display_name().to_string();
                        view! {
                            <TableRow attr:class="row--clickable" on:click=move |_| tabs_store.open_tab(&key, &title)>
                                <TableCell>{name}</TableCell>
                                <TableCell>{dates}</TableCell>
                                <TableCell>{format_money(quote.total)}</TableCell>
                                <TableCell><StatusBadge status=status /></TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    }
}
