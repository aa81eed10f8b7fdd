use contracts::domain::common::{CanonicalStatus, ColorTag};
use contracts::enums::EntityKind;
use leptos::prelude::*;
use thaw::*;

fn badge_color(tag: ColorTag) -> BadgeColor {
    match tag {
        ColorTag::Green => BadgeColor::Success,
        ColorTag::Red => BadgeColor::Danger,
        ColorTag::Orange => BadgeColor::Warning,
        ColorTag::Blue => BadgeColor::Brand,
        ColorTag::Cyan => BadgeColor::Informative,
    }
}

/// Label and color of a canonical status
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<CanonicalStatus>) -> impl IntoView {
    move || {
        let status = status.get();
        view! {
            <span class="status-badge" data-status=status.id() data-color=status.color_tag().as_str()>
                <Badge appearance=BadgeAppearance::Tint color=badge_color(status.color_tag())>
                    {status.label()}
                </Badge>
            </span>
        }
    }
}

/// Status select over every canonical status of `kind`; "Todos" clears it
#[component]
pub fn StatusFilter(kind: EntityKind, value: RwSignal<Option<CanonicalStatus>>) -> impl IntoView {
    let options = CanonicalStatus::all_of(kind);
    view! {
        <select
            class="status-filter"
            on:change=move |ev| {
                let id = event_target_value(&ev);
                value.set(CanonicalStatus::all_of(kind).into_iter().find(|s| s.id() == id));
            }
        >
            <option value="" selected=move || value.get().is_none()>"Todos los estados"</option>
            {options.into_iter().map(|status| view! {
                <option value=status.id() selected=move || value.get() == Some(status)>
                    {status.label()}
                </option>
            }).collect_view()}
        </select>
    }
}

/// Rows whose status matches the filter; everything when it is unset
pub fn matches_status(filter: Option<CanonicalStatus>, status: CanonicalStatus) -> bool {
    filter.map_or(true, |f| f == status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_quote::QuoteStatus;

    #[test]
    fn test_badge_colors() {
        assert!(matches!(badge_color(ColorTag::Green), BadgeColor::Success));
        assert!(matches!(badge_color(ColorTag::Red), BadgeColor::Danger));
    }

    #[test]
    fn test_status_filter_match() {
        let approved = CanonicalStatus::from(QuoteStatus::Approved);
        assert!(matches_status(None, approved));
        assert!(matches_status(Some(approved), approved));
        assert!(!matches_status(Some(QuoteStatus::Pending.into()), approved));
    }
}
