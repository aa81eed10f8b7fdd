use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Client snapshot embedded in requests, quotes and reservations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ClientSummary {
    /// "name · email · phone", skipping missing parts
    pub fn display_contact(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.email.as_deref())
            .chain(self.phone.as_deref())
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// Console user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Kept as a string: unknown user types must not break deserialization
    pub user_type: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::from_user_type(&self.user_type)
    }

    pub fn role_label(&self) -> &str {
        self.role()
            .map(|r| r.display_name())
            .unwrap_or(self.user_type.as_str())
    }
}

/// One page of `GET /users?page=&size=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    #[serde(default)]
    pub content: Vec<User>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    /// Zero based page index
    #[serde(default)]
    pub number: u32,
}

impl UserPage {
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.number > 0
    }
}

/// `\S+@\S+\.\S+` without a regex engine
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain
                .rsplit_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    })
}

fn check_name(name: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push("El nombre es obligatorio.".to_string());
    }
}

fn check_email(email: &str, errors: &mut Vec<String>) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("El correo es obligatorio.".to_string());
    } else if !looks_like_email(email) {
        errors.push("El formato del correo no es válido.".to_string());
    }
}

fn check_password(password: &str, errors: &mut Vec<String>) {
    if password.chars().count() < 6 {
        errors.push("La contraseña debe tener al menos 6 caracteres.".to_string());
    }
}

fn check_user_type(user_type: &str, errors: &mut Vec<String>) {
    if Role::from_user_type(user_type).is_none() {
        errors.push("El tipo de usuario no es válido.".to_string());
    }
}

fn into_result(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Body of `POST /users`; new accounts start active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub active: bool,
}

impl Default for CreateUserDto {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            user_type: Role::Client.code().to_string(),
            active: true,
        }
    }
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_email(&self.email, &mut errors);
        if self.password.trim().is_empty() {
            errors.push("La contraseña es obligatoria.".to_string());
        } else {
            check_password(&self.password, &mut errors);
        }
        check_user_type(&self.user_type, &mut errors);
        into_result(errors)
    }
}

/// Body of `PUT /users/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateUserDto {
    /// Profile edit from the user form. A blank password keeps the current one.
    pub fn edit(name: &str, email: &str, password: &str, user_type: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
            email: Some(email.trim().to_string()),
            password: Some(password.to_string()).filter(|p| !p.trim().is_empty()),
            user_type: Some(user_type.to_string()),
            active: None,
        }
    }

    /// Re-enable a deactivated account
    pub fn activate() -> Self {
        Self {
            active: Some(true),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        if let Some(password) = &self.password {
            check_password(password, &mut errors);
        }
        if let Some(user_type) = &self.user_type {
            check_user_type(user_type, &mut errors);
        }
        into_result(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_contact_line() {
        let client = ClientSummary {
            id: "c1".into(),
            name: "Ana López".into(),
            email: Some("ana@example.com".into()),
            phone: None,
        };
        assert_eq!(client.display_contact(), "Ana López · ana@example.com");
    }

    #[test]
    fn test_user_page_navigation() {
        let page: UserPage = serde_json::from_value(serde_json::json!({
            "content": [
                {"id": "1", "name": "Ana", "email": "ana@x.sv", "userType": "ADMIN", "active": true},
                {"id": "2", "name": "Luis", "email": "luis@x.sv", "userType": "SUPERVISOR", "active": false}
            ],
            "totalElements": 12,
            "totalPages": 2,
            "size": 10,
            "number": 0
        }))
        .unwrap();
        assert!(page.has_next());
        assert!(!page.has_prev());
        assert_eq!(page.content[0].role(), Some(Role::Admin));
        assert_eq!(page.content[1].role(), None);
        assert_eq!(page.content[1].role_label(), "SUPERVISOR");
    }

    #[test]
    fn test_create_user_requires_password() {
        let dto = CreateUserDto {
            name: "Ana".into(),
            email: "ana@x".into(),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("correo no es válido"));
        assert!(errors[1].contains("contraseña es obligatoria"));

        let ok = CreateUserDto {
            email: "ana@punto.sv".into(),
            password: "secreto".into(),
            ..dto
        };
        assert!(ok.validate().is_ok());
        assert!(ok.active);
    }

    #[test]
    fn test_edit_keeps_password_when_blank() {
        let dto = UpdateUserDto::edit(" Ana ", "ana@punto.sv", "  ", "EMPLOYEE");
        assert!(dto.validate().is_ok());
        let body = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Ana", "email": "ana@punto.sv", "userType": "EMPLOYEE"})
        );

        let short = UpdateUserDto::edit("Ana", "ana@punto.sv", "123", "SUPERVISOR");
        assert_eq!(short.validate().unwrap_err().len(), 2);
    }

    #[test]
    fn test_activate_sends_only_the_flag() {
        let body = serde_json::to_value(UpdateUserDto::activate()).unwrap();
        assert_eq!(body, serde_json::json!({"active": true}));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(!looks_like_email("a b@c.d"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a@.c"));
    }
}
