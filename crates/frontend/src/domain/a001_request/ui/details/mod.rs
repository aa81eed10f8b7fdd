//! Request detail: request data, its quotes and the admin actions.
//!
//! - view_model.rs: state, loading and transition commands
//! - view.rs: Leptos component

mod view;
mod view_model;

pub use view::RequestDetails;
pub use view_model::RequestDetailsViewModel;
