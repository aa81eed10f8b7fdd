use contracts::domain::a003_reservation::ReservationDetail;
use contracts::domain::common::CanonicalStatus;
use leptos::prelude::*;

use crate::shared::list_utils::sort_list;

#[derive(Clone, Debug)]
pub struct ReservationListState {
    pub items: Vec<ReservationDetail>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for ReservationListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "scheduled_for".to_string(),
            sort_ascending: false,
            is_loaded: false,
        }
    }
}

impl ReservationListState {
    pub fn set_items(&mut self, mut items: Vec<ReservationDetail>) {
        sort_list(&mut items, &self.sort_field, self.sort_ascending);
        self.items = items;
        self.is_loaded = true;
    }
}

/// Session-wide snapshot of the reservations list; detail tabs refresh it
/// after their transitions
pub fn provide_store() {
    provide_context(RwSignal::new(ReservationListState::default()));
}

pub fn use_store() -> RwSignal<ReservationListState> {
    use_context::<RwSignal<ReservationListState>>().expect("ReservationListState context not found")
}

/// Separate from the list state so the select keeps its own signal
pub fn create_status_filter() -> RwSignal<Option<CanonicalStatus>> {
    RwSignal::new(None)
}
