use leptos::prelude::*;

/// Labeled text input; `input_type` defaults to "text"
#[component]
pub fn TextField(
    #[prop(optional, into)] label: MaybeProp<String>,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] input_type: MaybeProp<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] id: MaybeProp<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>{l}</label>
            })}
            <input
                id=input_id
                class="form__input"
                type=input_t
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                required=required
                disabled=move || disabled.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Labeled multi-line input
#[component]
pub fn TextAreaField(
    #[prop(optional, into)] label: MaybeProp<String>,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional)] rows: Option<u32>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! { <label class="form__label">{l}</label> })}
            <textarea
                class="form__textarea"
                placeholder=move || placeholder.get().unwrap_or_default()
                rows=rows.unwrap_or(3)
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Labeled select over `(value, label)` pairs
#[component]
pub fn SelectField(
    #[prop(optional, into)] label: MaybeProp<String>,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! { <label class="form__label">{l}</label> })}
            <select
                class="form__select"
                disabled=move || disabled.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, text)| {
                        let current = val.clone();
                        view! {
                            <option value=val selected=move || value.get() == current>
                                {text}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
