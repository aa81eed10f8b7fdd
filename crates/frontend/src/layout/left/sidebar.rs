//! Sidebar menu, filtered by the viewer's role

use contracts::enums::Role;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::current_role;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (tab key, label, icon)
    roles: &'static [Role],
}

fn menu_item(key: &'static str, icon: &'static str) -> (&'static str, &'static str, &'static str) {
    (key, tab_label_for_key(key), icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "events",
            label: "Eventos",
            icon: "calendar",
            items: vec![
                menu_item("a001_request", "requests"),
                menu_item("a002_quote", "quotes"),
                menu_item("a003_reservation", "calendar"),
            ],
            roles: &[Role::Admin, Role::Client],
        },
        MenuGroup {
            id: "work",
            label: "Trabajo",
            icon: "clipboard",
            items: vec![menu_item("a004_task", "clipboard")],
            roles: &[Role::Employee],
        },
        MenuGroup {
            id: "settings",
            label: "Administración",
            icon: "users",
            items: vec![menu_item("sys_users", "users")],
            roles: &[Role::Admin],
        },
    ]
}

/// Groups visible to `role`; nothing for an unknown role
fn groups_for(role: Option<Role>) -> Vec<MenuGroup> {
    let Some(role) = role else {
        return Vec::new();
    };
    get_menu_groups()
        .into_iter()
        .filter(|g| g.roles.contains(&role))
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let role = current_role();
    let collapsed_groups = RwSignal::new(Vec::<&'static str>::new());

    move || {
        groups_for(role.get())
            .into_iter()
            .map(|group| {
                let gid = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            on:click=move |_| {
                                collapsed_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || !collapsed_groups.get().contains(&gid)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=move || !collapsed_groups.get().contains(&gid)>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|(key, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            })
            .collect_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(role: Option<Role>) -> Vec<&'static str> {
        groups_for(role)
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(k, _, _)| k))
            .collect()
    }

    #[test]
    fn test_menu_per_role() {
        assert_eq!(
            keys(Some(Role::Admin)),
            vec!["a001_request", "a002_quote", "a003_reservation", "sys_users"]
        );
        assert_eq!(keys(Some(Role::Employee)), vec!["a004_task"]);
        assert!(!keys(Some(Role::Client)).contains(&"sys_users"));
        assert!(keys(None).is_empty());
    }

    #[test]
    fn test_landing_tab_is_in_menu() {
        for role in Role::all() {
            assert!(keys(Some(role)).contains(&role.landing_tab()));
        }
    }
}
