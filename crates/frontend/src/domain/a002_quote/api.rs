use contracts::domain::a002_quote::{CreateQuoteDto, QuoteAction, QuoteActionDto, QuoteDto};
use contracts::enums::Role;
use contracts::workflow::MutationFailure;

use crate::shared::http;

pub async fn fetch_all_quotes() -> Result<Vec<QuoteDto>, String> {
    http::get("/api/quotes").await
}

pub async fn fetch_my_quotes() -> Result<Vec<QuoteDto>, String> {
    http::get("/api/quotes/my-quotes").await
}

/// Admins see every quote, clients their own
pub async fn fetch_for_role(role: Option<Role>) -> Result<Vec<QuoteDto>, String> {
    match role {
        Some(Role::Admin) => fetch_all_quotes().await,
        Some(Role::Client) => fetch_my_quotes().await,
        _ => Err("No tienes acceso a las cotizaciones".to_string()),
    }
}

pub async fn fetch_by_id(id: &str) -> Result<QuoteDto, String> {
    http::get(&format!("/api/quotes/{}", id)).await
}

pub async fn create(dto: CreateQuoteDto) -> Result<QuoteDto, MutationFailure> {
    http::post("/api/quotes", &dto).await
}

/// Client approval or rejection with optional notes
pub async fn act(id: String, action: QuoteAction, notes: Option<String>) -> Result<QuoteDto, MutationFailure> {
    let body = QuoteActionDto { action, notes };
    http::post(&format!("/api/quotes/{}/action", id), &body).await
}

pub async fn cancel(id: String) -> Result<QuoteDto, MutationFailure> {
    http::put::<(), _>(&format!("/api/quotes/cancel/{}", id), None).await
}
