use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="homepage-container">
            <h1>"Salon Booking"</h1>
            <p class="homepage-tagline">"Book, move or cancel your next appointment."</p>
            <nav class="homepage-links">
                <A href="/appointments">"My appointments"</A>
                <A href="/vendor/appointments">"Booking requests"</A>
            </nav>
        </div>
    }
}
