use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <p>"This page doesn't exist."</p>
            <A href="/">"Back to home"</A>
        </div>
    }
}
