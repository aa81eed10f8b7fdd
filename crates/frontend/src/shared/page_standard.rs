//! Page categories for tab pages.
//!
//! Every page rendered inside a tab carries an HTML `id` of the form
//! `{entity}--{category}` (e.g. `"a002_quote--list"`) and a
//! `data-page-category` attribute with one of the constants below.

/// Table of records with filters or pagination
pub const PAGE_CAT_LIST: &str = "list";

/// Detail view of a single record
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Creation form
pub const PAGE_CAT_FORM: &str = "form";

/// Administration page
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_FORM,
    PAGE_CAT_SYSTEM,
];

/// True for ids of the form `{entity}--{category}`
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a003_reservation--detail"));
        assert!(!is_valid_page_id("a003_reservation"));
        assert!(!is_valid_page_id("--list"));
        assert!(is_known_category(PAGE_CAT_FORM));
        assert!(!is_known_category("dashboard"));
    }
}
