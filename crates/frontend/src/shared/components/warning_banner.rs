use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

const AUTO_DISMISS_MS: u32 = 10_000;

/// Error lines of a failed mutation, one per field error
#[component]
pub fn ErrorList(#[prop(into)] errors: Signal<Vec<String>>) -> impl IntoView {
    move || {
        let errors = errors.get();
        (!errors.is_empty()).then(|| {
            view! {
                <div class="alert alert--error" role="alert">
                    <ul>
                        {errors.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                    </ul>
                </div>
            }
        })
    }
}

/// Non-blocking refetch warnings, cleared after a while or on click
#[component]
pub fn WarningBanner(warnings: RwSignal<Vec<String>>) -> impl IntoView {
    Effect::new(move |_| {
        if warnings.with(|w| !w.is_empty()) {
            spawn_local(async move {
                TimeoutFuture::new(AUTO_DISMISS_MS).await;
                let _ = warnings.try_set(Vec::new());
            });
        }
    });

    move || {
        let lines = warnings.get();
        (!lines.is_empty()).then(|| {
            view! {
                <div class="alert alert--warning" role="status">
                    {icon("alert-triangle")}
                    <div>
                        {lines.into_iter().map(|w| view! { <div>{w}</div> }).collect_view()}
                    </div>
                    <button class="alert__close" on:click=move |_| warnings.set(Vec::new())>
                        {icon("x")}
                    </button>
                </div>
            }
        })
    }
}
