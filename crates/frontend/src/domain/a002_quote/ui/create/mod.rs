//! Admin form for a quote on a request

use contracts::domain::a001_request::RequestDto;
use contracts::domain::a002_quote::{CreateQuoteDto, QuoteItemDto};
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::TextField;
use crate::shared::date_utils::format_money;
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct ItemRow {
    key: usize,
    description: RwSignal<String>,
    quantity: RwSignal<String>,
    unit_price: RwSignal<String>,
}

impl ItemRow {
    fn new(key: usize, description: &str) -> Self {
        Self {
            key,
            description: RwSignal::new(description.to_string()),
            quantity: RwSignal::new("1".to_string()),
            unit_price: RwSignal::new(String::new()),
        }
    }

    fn to_dto(&self) -> QuoteItemDto {
        QuoteItemDto {
            service_id: None,
            description: self.description.get_untracked().trim().to_string(),
            quantity: parse_amount(&self.quantity.get_untracked()),
            unit_price: parse_amount(&self.unit_price.get_untracked()),
        }
    }
}

/// Lenient number parsing for form inputs; blank or invalid is 0
pub fn parse_amount(text: &str) -> f64 {
    text.trim().replace(',', ".").parse().unwrap_or(0.0)
}

/// One item per requested service, so the admin only fills prices
pub fn seed_items(requested_services: &str) -> Vec<String> {
    requested_services
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn QuoteCreateForm(
    request: RequestDto,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<CreateQuoteDto>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let event_name = RwSignal::new(request.display_name());
    let hours = RwSignal::new("4".to_string());
    let start_date = RwSignal::new(request.event_date.chars().take(10).collect::<String>());
    let end_date = RwSignal::new(String::new());
    let additional = RwSignal::new("0".to_string());

    let mut seeded: Vec<ItemRow> = seed_items(&request.requested_services)
        .iter()
        .enumerate()
        .map(|(i, s)| ItemRow::new(i, s))
        .collect();
    if seeded.is_empty() {
        seeded.push(ItemRow::new(0, ""));
    }
    let next_key = StoredValue::new(seeded.len());
    let items = RwSignal::new(seeded);

    let build = {
        let request_id = request.id.clone();
        let client_id = request.client.as_ref().map(|c| c.id.clone()).unwrap_or_default();
        move || CreateQuoteDto {
            request_id: Some(request_id.clone()),
            client_id: client_id.clone(),
            event_name: event_name.get_untracked().trim().to_string(),
            estimated_hours: hours.get_untracked().trim().parse().unwrap_or(0),
            start_date: start_date.get_untracked(),
            end_date: end_date.get_untracked(),
            additional_costs: parse_amount(&additional.get_untracked()),
            items: items.with_untracked(|rows| rows.iter().map(ItemRow::to_dto).collect()),
        }
    };
    let build = StoredValue::new(build);

    let estimated = move || {
        let lines: f64 = items.with(|rows| {
            rows.iter()
                .map(|r| parse_amount(&r.quantity.get()) * parse_amount(&r.unit_price.get()))
                .sum()
        });
        lines + parse_amount(&additional.get())
    };

    let add_item = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        items.update(|rows| rows.push(ItemRow::new(key, "")));
    };

    view! {
        <div class="form-card">
            <h3>"Nueva cotización"</h3>
            <TextField label="Nombre del evento" value=event_name required=true />
            <div class="form-row">
                <TextField label="Horas estimadas" value=hours input_type="number" />
                <TextField label="Inicio" value=start_date input_type="date" />
                <TextField label="Fin" value=end_date input_type="date" />
                <TextField label="Costos adicionales" value=additional input_type="number" />
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Servicio"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || items.get()
                        key=|row| row.key
                        children=move |row| {
                            let key = row.key;
                            view! {
                                <TableRow>
                                    <TableCell><TextField value=row.description /></TableCell>
                                    <TableCell><TextField value=row.quantity input_type="number" /></TableCell>
                                    <TableCell><TextField value=row.unit_price input_type="number" /></TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| items.update(|rows| rows.retain(|r| r.key != key))
                                        >
                                            {icon("x")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>

            <div class="form-card__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=add_item>
                    {icon("plus")}
                    " Agregar servicio"
                </Button>
                <span class="form-card__total">
                    "Subtotal estimado: " {move || format_money(estimated())}
                </span>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=busy
                    on_click=move |_| on_submit.run(build.with_value(|b| b()))
                >
                    "Guardar cotización"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount(" 3,75 "), 3.75);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
    }

    #[test]
    fn test_seed_items_from_services() {
        assert_eq!(seed_items("Catering, Sonido"), vec!["Catering", "Sonido"]);
        assert!(seed_items("").is_empty());
    }
}
