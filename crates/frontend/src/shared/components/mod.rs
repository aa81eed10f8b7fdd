pub mod action_bar;
pub mod form;
pub mod pagination_controls;
pub mod status_badge;
pub mod warning_banner;
