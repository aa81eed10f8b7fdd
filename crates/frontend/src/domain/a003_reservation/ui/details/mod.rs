mod view;
mod view_model;

pub use view::ReservationDetails;
pub use view_model::ReservationDetailsViewModel;
