use contracts::domain::a001_request::{
    CreateRequestDto, RequestDto, RequestStatus, UpdateRequestStatusDto,
};
use contracts::domain::a002_quote::QuoteDto;
use contracts::enums::Role;
use contracts::workflow::MutationFailure;

use crate::shared::http;

pub async fn fetch_my_requests() -> Result<Vec<RequestDto>, String> {
    http::get("/api/requests/my-requests").await
}

pub async fn fetch_all_requests() -> Result<Vec<RequestDto>, String> {
    http::get("/api/requests").await
}

/// Admins see every request, clients their own
pub async fn fetch_for_role(role: Option<Role>) -> Result<Vec<RequestDto>, String> {
    match role {
        Some(Role::Admin) => fetch_all_requests().await,
        Some(Role::Client) => fetch_my_requests().await,
        _ => Err("No tienes acceso a las solicitudes".to_string()),
    }
}

pub async fn fetch_by_id(id: &str) -> Result<RequestDto, String> {
    http::get(&format!("/api/requests/{}", id)).await
}

pub async fn fetch_quotes(id: &str) -> Result<Vec<QuoteDto>, String> {
    http::get(&format!("/api/requests/{}/quotes", id)).await
}

pub async fn create(dto: CreateRequestDto) -> Result<RequestDto, MutationFailure> {
    http::post("/api/requests", &dto).await
}

pub async fn update_status(id: String, status: RequestStatus) -> Result<RequestDto, MutationFailure> {
    let body = UpdateRequestStatusDto::new(status);
    http::patch(&format!("/api/requests/{}/status", id), Some(&body)).await
}
