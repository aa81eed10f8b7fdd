mod view;
mod view_model;

pub use view::QuoteDetails;
pub use view_model::QuoteDetailsViewModel;
