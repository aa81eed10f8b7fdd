//! Client form for a new event request

use contracts::domain::a001_request::{CreateRequestDto, RequestDto};
use contracts::enums::EntityKind;
use contracts::workflow::{ActionId, Refetch, RefetchPlan, TransitionKey, ViewScope};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_request::api;
use crate::shared::components::form::{TextAreaField, TextField};
use crate::shared::components::warning_banner::ErrorList;
use crate::shared::refresh::{nonce, spawn_transition, TransitionUi};

/// One service per line or comma separated
pub fn split_services(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn RequestCreateForm(
    scope: ViewScope,
    ui: TransitionUi,
    on_created: Callback<()>,
    /// Stores the refetched list of the owning page
    apply_list: Callback<Vec<RequestDto>>,
) -> impl IntoView {
    let event_date = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let services = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    let reset = move || {
        event_date.set(String::new());
        location.set(String::new());
        services.set(String::new());
        notes.set(String::new());
    };

    let submit = move |_| {
        let dto = CreateRequestDto {
            event_date: event_date.get_untracked(),
            location: location.get_untracked().trim().to_string(),
            requested_services: split_services(&services.get_untracked()),
            notes: Some(notes.get_untracked().trim().to_string()).filter(|n| !n.is_empty()),
        };
        if let Err(errors) = dto.validate() {
            ui.errors.set(errors);
            return;
        }
        let key = TransitionKey::new(EntityKind::Request, "new", ActionId::Submit).with_nonce(nonce());
        spawn_transition(
            &scope,
            ui,
            key,
            api::create(dto),
            move || {
                RefetchPlan::default().list(Refetch::new(api::fetch_my_requests(), move |items| {
                    apply_list.run(items)
                }))
            },
            move |created: RequestDto| {
                log::info!("request {} created", created.id);
                reset();
                on_created.run(());
            },
        );
    };

    view! {
        <div class="form-card">
            <h3>"Nueva solicitud"</h3>
            <ErrorList errors=ui.errors />
            <TextField label="Fecha del evento" value=event_date input_type="date" required=true />
            <TextField label="Ubicación" value=location placeholder="Ej. Hotel Real, San Salvador" required=true />
            <TextAreaField
                label="Servicios solicitados"
                value=services
                placeholder="Un servicio por línea o separados por coma"
                rows=4
            />
            <TextAreaField label="Notas" value=notes rows=3 />
            <div class="form-card__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || ui.busy.get())
                >
                    {ActionId::Submit.label()}
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_services() {
        assert_eq!(
            split_services("Catering, Decoración\nSonido\n\n , "),
            vec!["Catering", "Decoración", "Sonido"]
        );
        assert!(split_services("  ").is_empty());
    }
}
