use contracts::enums::Role;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserPage};
use contracts::workflow::MutationFailure;

use crate::shared::http;

/// Fetch one page of users (zero based)
pub async fn fetch_users(page: u32, size: u32) -> Result<UserPage, String> {
    http::get(&format!("/users?page={}&size={}", page, size)).await
}

/// Active employees, for task assignment
pub async fn fetch_employees() -> Result<Vec<User>, String> {
    let page = fetch_users(0, 200).await?;
    Ok(page
        .content
        .into_iter()
        .filter(|u| u.active && u.role() == Some(Role::Employee))
        .collect())
}

pub async fn create(dto: CreateUserDto) -> Result<User, MutationFailure> {
    http::post("/users", &dto).await
}

pub async fn update(id: String, dto: UpdateUserDto) -> Result<User, MutationFailure> {
    http::put(&format!("/users/{}", id), Some(&dto)).await
}

/// `PATCH /users/{id}/deactivate`; the account stays listed as inactive
pub async fn deactivate(id: String) -> Result<(), MutationFailure> {
    http::patch::<(), _>(&format!("/users/{}/deactivate", id), None).await
}

pub async fn delete(id: String) -> Result<(), MutationFailure> {
    http::delete(&format!("/users/{}", id)).await
}
