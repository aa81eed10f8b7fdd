pub mod aggregate;
pub mod status;

pub use aggregate::{CreateRequestDto, RequestDto, UpdateRequestStatusDto};
pub use status::RequestStatus;
