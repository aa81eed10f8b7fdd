//! Task form shown on a reservation in planning

use contracts::domain::a003_reservation::{ReservationDetail, ServiceInfo};
use contracts::domain::a004_task::CreateTaskDto;
use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::form::{SelectField, TextAreaField, TextField};
use crate::system::users::api as users_api;

fn none_option(label: &str) -> (String, String) {
    (String::new(), label.to_string())
}

pub fn employee_options(employees: &[User]) -> Vec<(String, String)> {
    std::iter::once(none_option("Sin asignar"))
        .chain(employees.iter().map(|e| (e.id.clone(), e.name.clone())))
        .collect()
}

pub fn service_options(services: &[ServiceInfo]) -> Vec<(String, String)> {
    std::iter::once(none_option("Ninguno"))
        .chain(services.iter().map(|s| (s.id.clone(), s.description.clone())))
        .collect()
}

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    Some(value).filter(|v| !v.is_empty())
}

#[component]
pub fn TaskCreateForm(
    reservation: ReservationDetail,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<CreateTaskDto>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let employee_id = RwSignal::new(String::new());
    let service_id = RwSignal::new(String::new());
    let start = RwSignal::new(reservation.scheduled_for.clone().unwrap_or_default());
    let end = RwSignal::new(String::new());
    let reservation_id = StoredValue::new(reservation.id.clone());
    let services = service_options(&reservation.services);
    let employees = RwSignal::new(employee_options(&[]));

    spawn_local(async move {
        match users_api::fetch_employees().await {
            Ok(list) => {
                let _ = employees.try_set(employee_options(&list));
            }
            Err(e) => log::warn!("employees not loaded: {}", e),
        }
    });

    let submit = move |_| {
        on_submit.run(CreateTaskDto {
            reservation_id: reservation_id.get_value(),
            employee_id: optional(employee_id.get_untracked()),
            service_id: optional(service_id.get_untracked()),
            title: title.get_untracked().trim().to_string(),
            description: optional(description.get_untracked()),
            start_datetime: start.get_untracked(),
            end_datetime: end.get_untracked(),
        })
    };

    view! {
        <div class="form-card">
            <h3>"Nueva tarea"</h3>
            <TextField label="Título" value=title required=true placeholder="Montaje de escenario" />
            <TextAreaField label="Descripción" value=description rows=2 />
            <SelectField label="Empleado" value=employee_id options=employees />
            <SelectField label="Servicio" value=service_id options=Signal::stored(services) />
            <TextField label="Inicio" value=start input_type="datetime-local" required=true />
            <TextField label="Fin" value=end input_type="datetime-local" required=true />
            <div class="form-card__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=busy on_click=submit>
                    "Agregar tarea"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_start_with_empty_choice() {
        let services: Vec<ServiceInfo> = serde_json::from_value(serde_json::json!([
            {"id": "s1", "description": "Sonido", "quantity": 1.0, "unitPrice": 50.0, "total": 50.0}
        ]))
        .unwrap();
        let options = service_options(&services);
        assert_eq!(options[0], (String::new(), "Ninguno".to_string()));
        assert_eq!(options[1], ("s1".to_string(), "Sonido".to_string()));
        assert_eq!(employee_options(&[]).len(), 1);
    }

    #[test]
    fn test_optional_trims_blank() {
        assert_eq!(optional("  ".into()), None);
        assert_eq!(optional(" e1 ".into()), Some("e1".to_string()));
    }
}
