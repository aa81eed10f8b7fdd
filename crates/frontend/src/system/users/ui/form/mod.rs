//! Create / edit form for console accounts

use contracts::enums::Role;
use contracts::system::users::{CreateUserDto, UpdateUserDto};
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::{SelectField, TextField};
use crate::system::users::ui::list::state::UserFormMode;

/// What the form hands back to the list
#[derive(Clone, Debug, PartialEq)]
pub enum UserSubmission {
    Create(CreateUserDto),
    Update { id: String, dto: UpdateUserDto },
}

impl UserSubmission {
    pub fn build(mode: &UserFormMode, name: &str, email: &str, password: &str, user_type: &str) -> Self {
        match mode {
            UserFormMode::Create => UserSubmission::Create(CreateUserDto {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: password.to_string(),
                user_type: user_type.to_string(),
                active: true,
            }),
            UserFormMode::Edit(user) => UserSubmission::Update {
                id: user.id.clone(),
                dto: UpdateUserDto::edit(name, email, password, user_type),
            },
        }
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        match self {
            UserSubmission::Create(dto) => dto.validate(),
            UserSubmission::Update { dto, .. } => dto.validate(),
        }
    }
}

fn role_options() -> Vec<(String, String)> {
    Role::all()
        .into_iter()
        .map(|r| (r.code().to_string(), r.display_name().to_string()))
        .collect()
}

#[component]
pub fn UserForm(
    mode: UserFormMode,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<UserSubmission>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let (title, password_hint) = match &mode {
        UserFormMode::Create => ("Nuevo usuario", "Mínimo 6 caracteres"),
        UserFormMode::Edit(_) => ("Editar usuario", "Dejar vacío para mantener la actual"),
    };
    let seed = match &mode {
        UserFormMode::Edit(user) => (user.name.clone(), user.email.clone(), user.user_type.clone()),
        UserFormMode::Create => (String::new(), String::new(), Role::Client.code().to_string()),
    };
    let name = RwSignal::new(seed.0);
    let email = RwSignal::new(seed.1);
    let user_type = RwSignal::new(seed.2);
    let password = RwSignal::new(String::new());
    let mode = StoredValue::new(mode);

    let submit = move |_| {
        let submission = mode.with_value(|m| {
            UserSubmission::build(
                m,
                &name.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
                &user_type.get_untracked(),
            )
        });
        on_submit.run(submission);
    };

    view! {
        <div class="form-card">
            <h3>{title}</h3>
            <TextField label="Nombre" value=name required=true placeholder="Nombre completo" />
            <TextField label="Correo" value=email input_type="email" required=true placeholder="usuario@ejemplo.com" />
            <TextField label="Contraseña" value=password input_type="password" placeholder=password_hint />
            <SelectField label="Tipo de usuario" value=user_type options=Signal::stored(role_options()) />
            <div class="form-card__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=busy on_click=submit>
                    "Guardar"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::User;

    #[test]
    fn test_create_submission_starts_active() {
        let submission = UserSubmission::build(&UserFormMode::Create, " Ana ", "ana@punto.sv", "secreto", "ADMIN");
        assert!(submission.validate().is_ok());
        let UserSubmission::Create(dto) = submission else {
            panic!("expected a create submission");
        };
        assert_eq!(dto.name, "Ana");
        assert!(dto.active);
    }

    #[test]
    fn test_edit_submission_targets_user() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u7", "name": "Luis", "email": "luis@punto.sv", "userType": "EMPLOYEE", "active": true
        }))
        .unwrap();
        let submission = UserSubmission::build(&UserFormMode::Edit(user), "Luis", "luis@punto.sv", "", "EMPLOYEE");
        assert!(submission.validate().is_ok());
        match submission {
            UserSubmission::Update { id, dto } => {
                assert_eq!(id, "u7");
                assert_eq!(dto.password, None);
                assert_eq!(dto.active, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(role_options().len(), 3);
    }
}
