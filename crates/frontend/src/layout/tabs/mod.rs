//! Tabs: the page wrapper, the key → view registry and tab titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_key, detail_tab_label, pick_identifier, tab_label_for_key};
