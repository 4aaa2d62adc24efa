use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

#[component]
pub fn LoadingView(
    #[prop(optional, into)] message: Option<String>,
    /// Small inline spinner for use inside cards and modals.
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let size = if compact {
        SpinnerSize::Tiny
    } else {
        SpinnerSize::Large
    };
    view! {
        <div class="loading-container" class:compact=compact>
            <Spinner size=size />
            <p class="loading-message">
                {message.unwrap_or_else(|| "Loading, please wait...".to_string())}
            </p>
        </div>
    }
}
