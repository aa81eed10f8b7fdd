//! Root wrapper for every page rendered inside a tab.

use super::page_standard::*;
use leptos::prelude::*;

/// Sets `id` and `data-page-category` on the page root and picks the
/// BEM modifier for the category.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a001_request--list"`
    #[prop(into)]
    page_id: String,
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(&page_id), "bad page id {page_id}");
    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_FORM => "page page--form",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
