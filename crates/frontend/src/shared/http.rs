//! Envelope HTTP client.
//!
//! Every backend response is an [`ApiResponse`]. Reads return
//! `Result<T, String>`; writes return `Result<T, MutationFailure>` so field
//! errors reach the form that caused them.

use contracts::shared::ApiResponse;
use contracts::workflow::MutationFailure;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

fn get_auth_header() -> Option<String> {
    storage::get_access_token().map(|token| format!("Bearer {}", token))
}

fn with_headers(builder: RequestBuilder) -> RequestBuilder {
    let request_id = uuid::Uuid::new_v4().to_string();
    let builder = builder.header("X-Request-Id", &request_id);
    match get_auth_header() {
        Some(auth) => builder.header("Authorization", &auth),
        None => builder,
    }
}

/// Unwrap an envelope body received with `status`
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, MutationFailure> {
    let envelope: ApiResponse<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => {
            return Err(MutationFailure::transport(format!(
                "respuesta inválida: {}",
                e
            )))
        }
        Err(_) => return Err(MutationFailure::new(status_message(status))),
    };

    if !(200..300).contains(&status) || !envelope.success {
        let mut failure = MutationFailure::from_response(&envelope);
        if failure.message.trim().is_empty() && failure.field_errors.is_empty() {
            failure.message = status_message(status);
        }
        return Err(failure);
    }

    match envelope.data {
        Some(data) => Ok(data),
        // Empty payloads are fine for `()` and `Option<_>`
        None => serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| MutationFailure::transport("respuesta sin datos")),
    }
}

fn status_message(status: u16) -> String {
    match status {
        200..=299 => String::new(),
        401 => "Sesión expirada, vuelve a iniciar sesión".to_string(),
        403 => "No tienes permisos para esta acción".to_string(),
        404 => "Recurso no encontrado".to_string(),
        _ => format!("Error del servidor ({})", status),
    }
}

async fn send<T: DeserializeOwned>(
    method: &'static str,
    builder: RequestBuilder,
    body: Option<serde_json::Value>,
) -> Result<T, MutationFailure> {
    let builder = with_headers(builder);
    let request: Result<Request, _> = match body {
        Some(body) => builder.json(&body),
        None => builder.build(),
    };
    let request = request.map_err(|e| MutationFailure::transport(format!("Failed to build request: {}", e)))?;
    let url = request.url();

    let response = request
        .send()
        .await
        .map_err(|e| MutationFailure::transport(e))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| MutationFailure::transport(e))?;

    log::debug!("{} {} -> {}", method, url, status);
    decode_envelope(status, &text)
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, MutationFailure> {
    serde_json::to_value(body)
        .map_err(|e| MutationFailure::transport(format!("Failed to serialize request: {}", e)))
}

/// GET; failures are flattened to a display string
pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    send("GET", Request::get(&api_url(path)), None)
        .await
        .map_err(|e| e.summary())
}

pub async fn post<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, MutationFailure> {
    send("POST", Request::post(&api_url(path)), Some(to_body(body)?)).await
}

/// POST without a body
pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, MutationFailure> {
    send("POST", Request::post(&api_url(path)), None).await
}

pub async fn put<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: Option<&B>,
) -> Result<T, MutationFailure> {
    let body = body.map(to_body).transpose()?;
    send("PUT", Request::put(&api_url(path)), body).await
}

pub async fn patch<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: Option<&B>,
) -> Result<T, MutationFailure> {
    let body = body.map(to_body).transpose()?;
    send("PATCH", Request::patch(&api_url(path)), body).await
}

pub async fn delete<T: DeserializeOwned>(path: &str) -> Result<T, MutationFailure> {
    send("DELETE", Request::delete(&api_url(path)), None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let body = r#"{"success":true,"message":"ok","data":{"id":"r1"}}"#;
        let value: serde_json::Value = decode_envelope(200, body).unwrap();
        assert_eq!(value["id"], "r1");
    }

    #[test]
    fn test_decode_unit_without_data() {
        let body = r#"{"success":true,"message":"Reserva publicada"}"#;
        let decoded: Result<(), _> = decode_envelope(200, body);
        assert!(decoded.is_ok());
    }

    #[test]
    fn test_decode_business_failure_with_fields() {
        let body = r#"{"success":false,"message":"Datos inválidos","errors":[{"field":"location","message":"La ubicación es obligatoria"}]}"#;
        let err = decode_envelope::<serde_json::Value>(400, body).unwrap_err();
        assert_eq!(err.message, "Datos inválidos");
        assert_eq!(
            err.user_messages(),
            vec!["location: La ubicación es obligatoria".to_string()]
        );
    }

    #[test]
    fn test_decode_success_flag_false_on_200() {
        let body = r#"{"success":false,"message":"Solo se pueden aprobar cotizaciones pendientes"}"#;
        let err = decode_envelope::<()>(200, body).unwrap_err();
        assert_eq!(err.summary(), "Solo se pueden aprobar cotizaciones pendientes");
    }

    #[test]
    fn test_decode_non_envelope_error() {
        let err = decode_envelope::<()>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.message, "Error del servidor (502)");

        let err = decode_envelope::<()>(403, r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.message, "No tienes permisos para esta acción");
    }

    #[test]
    fn test_decode_missing_data_for_list() {
        let err = decode_envelope::<Vec<String>>(200, r#"{"success":true}"#).unwrap_err();
        assert!(err.message.contains("sin datos"));
    }
}
