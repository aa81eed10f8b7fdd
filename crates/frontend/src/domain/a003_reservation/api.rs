use contracts::domain::a003_reservation::{
    CreateReservationDto, ReservationDetail, ReservationStatus, UpdateReservationStatusDto,
};
use contracts::enums::Role;
use contracts::workflow::MutationFailure;

use crate::shared::http;

pub async fn fetch_all_reservations() -> Result<Vec<ReservationDetail>, String> {
    http::get("/api/reservations").await
}

pub async fn fetch_my_reservations() -> Result<Vec<ReservationDetail>, String> {
    http::get("/api/reservations/my-reservations").await
}

/// Admins see every reservation, clients their own
pub async fn fetch_for_role(role: Option<Role>) -> Result<Vec<ReservationDetail>, String> {
    match role {
        Some(Role::Admin) => fetch_all_reservations().await,
        Some(Role::Client) => fetch_my_reservations().await,
        _ => Err("No tienes acceso a las reservaciones".to_string()),
    }
}

pub async fn fetch_by_id(id: &str) -> Result<ReservationDetail, String> {
    http::get(&format!("/api/reservations/{}", id)).await
}

/// Convert an approved quote into a reservation
pub async fn create(dto: CreateReservationDto) -> Result<ReservationDetail, MutationFailure> {
    http::post("/api/reservations", &dto).await
}

/// Planning → Scheduled; the backend rejects it while no task exists
pub async fn publish(id: String) -> Result<ReservationDetail, MutationFailure> {
    http::post_empty(&format!("/api/reservations/{}/publish", id)).await
}

pub async fn update_status(
    id: String,
    status: ReservationStatus,
) -> Result<ReservationDetail, MutationFailure> {
    let body = UpdateReservationStatusDto::new(status);
    http::patch(&format!("/api/reservations/{}/status", id), Some(&body)).await
}
