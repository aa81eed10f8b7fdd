pub mod aggregate;
pub mod status;

pub use aggregate::{
    CreateReservationDto, ReservationDetail, ReservationQuoteSnapshot, ReservationRequestSnapshot,
    ServiceInfo, TaskInfo, UpdateReservationStatusDto,
};
pub use status::ReservationStatus;
