//! Neutral waiting indicator.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="spinner" aria-busy="true">
            <div class="spinner__ring"></div>
            <p class="spinner__label">{label.unwrap_or("Loading...")}</p>
        </div>
    }
}
