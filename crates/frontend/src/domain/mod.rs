pub mod a001_request;
pub mod a002_quote;
pub mod a003_reservation;
pub mod a004_task;
