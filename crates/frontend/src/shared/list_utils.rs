//! Client-side search and sorting helpers for list pages
use gloo_timers::callback::Timeout;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Minimum filter length before a search applies
pub const MIN_FILTER_LEN: usize = 2;

pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

fn filter_is_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_FILTER_LEN
}

/// Case-insensitive containment used by `Searchable` impls
pub fn contains_ci(haystack: &str, filter: &str) -> bool {
    haystack.to_lowercase().contains(&filter.trim().to_lowercase())
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !filter_is_active(filter) {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Search box with a 300ms debounce and a clear button
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(String::new());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // dropping the previous timeout cancels it
        pending.set_value(Some(Timeout::new(300, move || on_change.run(new_value))));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class:search-input__field--active=move || filter_is_active(&value.get())
                class="search-input__field"
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Header click handler: same field flips direction, new field sorts ascending
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: Signal<String>,
    set_sort_field: WriteSignal<String>,
    set_sort_ascending: WriteSignal<bool>,
) -> impl Fn(MouseEvent) + 'static {
    move |_| {
        if sort_field.get() == field {
            set_sort_ascending.update(|v| *v = !*v);
        } else {
            set_sort_field.set(field.to_string());
            set_sort_ascending.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, u32);

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.0.cmp(other.0),
                _ => self.1.cmp(&other.1),
            }
        }
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.0, filter)
        }
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut rows = vec![Row("b", 1), Row("a", 3), Row("c", 2)];
        sort_list(&mut rows, "name", true);
        assert_eq!(rows[0], Row("a", 3));
        sort_list(&mut rows, "amount", false);
        assert_eq!(rows[0], Row("a", 3));
        assert_eq!(rows[2], Row("b", 1));
    }

    #[test]
    fn test_filter_ignores_short_input() {
        let rows = vec![Row("Boda", 1), Row("Graduación", 2)];
        assert_eq!(filter_list(rows.clone(), "b").len(), 2);
        assert_eq!(filter_list(rows, "BOD"), vec![Row("Boda", 1)]);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("date", "name", true), " ⇅");
    }
}
