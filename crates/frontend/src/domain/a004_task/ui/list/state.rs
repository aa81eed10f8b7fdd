use contracts::domain::a004_task::TaskDto;
use leptos::prelude::*;

use crate::shared::list_utils::sort_list;

#[derive(Clone, Debug)]
pub struct TaskListState {
    pub items: Vec<TaskDto>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for TaskListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "start".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

impl TaskListState {
    pub fn set_items(&mut self, mut items: Vec<TaskDto>) {
        sort_list(&mut items, &self.sort_field, self.sort_ascending);
        self.items = items;
        self.is_loaded = true;
    }
}

pub fn create_state() -> RwSignal<TaskListState> {
    RwSignal::new(TaskListState::default())
}
