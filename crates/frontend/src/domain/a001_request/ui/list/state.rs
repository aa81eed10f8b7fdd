use contracts::domain::a001_request::RequestDto;
use leptos::prelude::*;

use crate::shared::list_utils::sort_list;

#[derive(Clone, Debug)]
pub struct RequestListState {
    pub items: Vec<RequestDto>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for RequestListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "event_date".to_string(),
            sort_ascending: false,
            is_loaded: false,
        }
    }
}

impl RequestListState {
    /// Replace the rows keeping the current sort
    pub fn set_items(&mut self, mut items: Vec<RequestDto>) {
        sort_list(&mut items, &self.sort_field, self.sort_ascending);
        self.items = items;
        self.is_loaded = true;
    }
}

/// Session-wide snapshot of the requests list; detail tabs refresh it
/// after their transitions
pub fn provide_store() {
    provide_context(RwSignal::new(RequestListState::default()));
}

pub fn use_store() -> RwSignal<RequestListState> {
    use_context::<RwSignal<RequestListState>>().expect("RequestListState context not found")
}
