use contracts::enums::Role;
use contracts::system::users::{User, UserPage};
use contracts::workflow::{ActionId, Refetch, RefetchPlan};
use leptos::prelude::*;
use std::future::Future;

use crate::shared::list_utils::sort_list;

/// What the user form is editing
#[derive(Clone, Debug, PartialEq)]
pub enum UserFormMode {
    Create,
    Edit(User),
}

#[derive(Clone, Debug)]
pub struct UsersListState {
    pub items: Vec<User>,
    pub search_query: String,
    pub role_filter: Option<Role>,
    /// `Some(true)` keeps active accounts only
    pub active_filter: Option<bool>,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub is_loaded: bool,
    pub form: Option<UserFormMode>,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            role_filter: None,
            active_filter: None,
            sort_field: "name".to_string(),
            sort_ascending: true,
            page: 0,
            page_size: 10,
            total_count: 0,
            total_pages: 1,
            is_loaded: false,
            form: None,
        }
    }
}

impl UsersListState {
    /// Replace the rows with a fetched page, keeping the current sort
    pub fn set_page(&mut self, mut page: UserPage) {
        sort_list(&mut page.content, &self.sort_field, self.sort_ascending);
        self.items = page.content;
        self.total_count = page.total_elements as usize;
        self.total_pages = (page.total_pages as usize).max(1);
        // a delete may empty the last page
        self.page = self.page.min(self.total_pages - 1);
        self.is_loaded = true;
    }

    pub fn visible(&self) -> Vec<User> {
        let query = self.search_query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|u| {
                query.is_empty()
                    || u.name.to_lowercase().contains(&query)
                    || u.email.to_lowercase().contains(&query)
            })
            .filter(|u| self.role_filter.map_or(true, |r| u.role() == Some(r)))
            .filter(|u| self.active_filter.map_or(true, |a| u.active == a))
            .cloned()
            .collect()
    }

    pub fn open_form(&mut self, mode: UserFormMode) {
        self.form = Some(mode);
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Id of the user being edited, if any
    pub fn editing_id(&self) -> Option<&str> {
        match &self.form {
            Some(UserFormMode::Edit(user)) => Some(user.id.as_str()),
            _ => None,
        }
    }
}

/// Row buttons with the reason a button is disabled. Admins cannot
/// deactivate or delete their own account.
pub fn row_actions(user: &User, current_user_id: Option<&str>) -> Vec<(ActionId, Option<&'static str>)> {
    let is_self = current_user_id == Some(user.id.as_str());
    let toggle = if user.active {
        (
            ActionId::Deactivate,
            is_self.then_some("No puedes desactivar tu propio usuario"),
        )
    } else {
        (ActionId::Activate, None)
    };
    vec![
        (ActionId::Edit, None),
        toggle,
        (
            ActionId::Delete,
            is_self.then_some("No puedes eliminar tu propio usuario"),
        ),
    ]
}

/// User writes have no detail view; the page on screen is refetched
pub fn page_plan(
    fetch: impl Future<Output = Result<UserPage, String>> + 'static,
    state: RwSignal<UsersListState>,
) -> RefetchPlan<'static> {
    RefetchPlan::default().list(Refetch::new(fetch, move |page| state.update(|s| s.set_page(page))))
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::workflow::{after_mutate, MutationFailure, RefetchOutcome, TransitionKey, ViewScope};
    use futures::executor::block_on;
    use futures::future::ready;
    use leptos::reactive::owner::Owner;

    fn page(users: serde_json::Value, total: u64, pages: u32) -> UserPage {
        serde_json::from_value(serde_json::json!({
            "content": users,
            "totalElements": total,
            "totalPages": pages,
        }))
        .unwrap()
    }

    fn users() -> serde_json::Value {
        serde_json::json!([
            {"id": "2", "name": "Luis", "email": "luis@punto.sv", "userType": "EMPLOYEE", "active": true},
            {"id": "1", "name": "ana", "email": "ana@punto.sv", "userType": "ADMIN", "active": true},
            {"id": "3", "name": "Marta", "email": "marta@punto.sv", "userType": "CLIENT", "active": false}
        ])
    }

    #[test]
    fn test_set_page_sorts_and_clamps() {
        let mut state = UsersListState {
            page: 4,
            ..Default::default()
        };
        state.set_page(page(users(), 3, 1));
        assert_eq!(state.items[0].name, "ana");
        assert_eq!(state.page, 0);
        assert_eq!(state.total_count, 3);
        assert!(state.is_loaded);

        state.set_page(page(serde_json::json!([]), 0, 0));
        assert_eq!(state.total_pages, 1);
    }

    #[test]
    fn test_filters_combine() {
        let mut state = UsersListState::default();
        state.set_page(page(users(), 3, 1));

        state.active_filter = Some(true);
        assert_eq!(state.visible().len(), 2);

        state.role_filter = Some(Role::Employee);
        assert_eq!(state.visible()[0].id, "2");

        state.role_filter = None;
        state.active_filter = Some(false);
        state.search_query = "MARTA".into();
        assert_eq!(state.visible().len(), 1);
        state.search_query = "luis".into();
        assert!(state.visible().is_empty());
    }

    #[test]
    fn test_own_account_cannot_be_removed() {
        let mut state = UsersListState::default();
        state.set_page(page(users(), 3, 1));
        let ana = &state.items[0];

        let own = row_actions(ana, Some("1"));
        assert_eq!(own[0], (ActionId::Edit, None));
        assert_eq!(own[1].0, ActionId::Deactivate);
        assert!(own[1].1.is_some());
        assert!(own[2].1.is_some());

        let other = row_actions(ana, Some("9"));
        assert!(other.iter().all(|(_, reason)| reason.is_none()));

        let marta = &state.items[2];
        assert_eq!(row_actions(marta, None)[1], (ActionId::Activate, None));
    }

    #[test]
    fn test_form_mode() {
        let mut state = UsersListState::default();
        state.set_page(page(users(), 3, 1));
        assert_eq!(state.editing_id(), None);

        let luis = state.items[1].clone();
        state.open_form(UserFormMode::Edit(luis));
        assert_eq!(state.editing_id(), Some("2"));

        state.open_form(UserFormMode::Create);
        assert_eq!(state.editing_id(), None);
        state.close_form();
        assert!(state.form.is_none());
    }

    #[test]
    fn test_delete_refreshes_page() {
        let owner = Owner::new();
        owner.with(|| {
            let state = create_state();
            state.update(|s| s.set_page(page(users(), 3, 1)));
            let scope = ViewScope::new();
            let key = TransitionKey::user("3", ActionId::Delete);

            let remaining = serde_json::json!([
                {"id": "2", "name": "Luis", "email": "luis@punto.sv", "userType": "EMPLOYEE", "active": true},
                {"id": "1", "name": "ana", "email": "ana@punto.sv", "userType": "ADMIN", "active": true}
            ]);
            let plan = page_plan(ready(Ok(page(remaining, 2, 1))), state);
            let outcome = block_on(after_mutate(&scope, key.clone(), ready(Ok::<_, MutationFailure>(())), plan))
                .unwrap();

            let report = outcome.report().unwrap();
            assert_eq!(report.detail, RefetchOutcome::Skipped);
            assert_eq!(report.list, RefetchOutcome::Applied);
            assert_eq!(state.with_untracked(|s| s.total_count), 2);
            assert!(state.with_untracked(|s| s.items.iter().all(|u| u.id != "3")));

            // a second delete of the same account is dropped
            let again = block_on(after_mutate(
                &scope,
                key,
                ready(Ok::<_, MutationFailure>(())),
                page_plan(ready(Err("no llamado".to_string())), state),
            ))
            .unwrap();
            assert!(again.is_duplicate());
        });
    }
}
