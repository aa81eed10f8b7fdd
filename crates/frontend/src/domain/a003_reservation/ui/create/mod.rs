//! Conversion form: approved quote → reservation

use contracts::domain::a002_quote::QuoteDto;
use contracts::domain::a003_reservation::CreateReservationDto;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::{TextAreaField, TextField};

/// `datetime-local` default for a quote: its start date at 09:00
pub fn default_schedule(quote: &QuoteDto) -> String {
    quote
        .start_date
        .as_deref()
        .map(|d| format!("{}T09:00", d.chars().take(10).collect::<String>()))
        .unwrap_or_default()
}

#[component]
pub fn ReservationCreateForm(
    quote: QuoteDto,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<CreateReservationDto>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let event_name = RwSignal::new(quote.display_name().to_string());
    let scheduled_for = RwSignal::new(default_schedule(&quote));
    let location = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let quote_id = StoredValue::new(quote.id.clone());

    let submit = move |_| {
        on_submit.run(CreateReservationDto {
            quote_id: quote_id.get_value(),
            event_name: event_name.get_untracked().trim().to_string(),
            scheduled_for: scheduled_for.get_untracked(),
            location: location.get_untracked().trim().to_string(),
            notes: Some(notes.get_untracked().trim().to_string()).filter(|n| !n.is_empty()),
        })
    };

    view! {
        <div class="form-card">
            <h3>"Convertir en reserva"</h3>
            <TextField label="Nombre del evento" value=event_name required=true />
            <TextField label="Fecha y hora" value=scheduled_for input_type="datetime-local" required=true />
            <TextField label="Ubicación" value=location required=true />
            <TextAreaField label="Notas" value=notes rows=2 />
            <div class="form-card__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=busy on_click=submit>
                    "Crear reserva"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let mut quote: QuoteDto = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "total": 10.0,
            "startDate": "2025-06-01",
        }))
        .unwrap();
        assert_eq!(default_schedule(&quote), "2025-06-01T09:00");
        quote.start_date = None;
        assert_eq!(default_schedule(&quote), "");
    }
}
