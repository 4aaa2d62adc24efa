use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::session;

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    let location = use_location();
    let active = move || location.pathname.with(|path| path.starts_with(href));
    view! {
        <A href=href attr:class="navbar__link">
            <span class:active=active>{label}</span>
        </A>
    }
}

/// Top bar. The salon-requests link only shows for vendor accounts; the
/// session is read after mount so server and browser render the same markup.
#[component]
pub fn Navbar() -> impl IntoView {
    let is_vendor = RwSignal::new(false);
    Effect::new(move |_| {
        is_vendor.set(session::default_store().get().is_vendor());
    });

    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <A href="/" attr:class="navbar__brand navbar__logo">
                    "Salon Booking"
                </A>
                <div class="navbar__links">
                    <NavLink href="/appointments" label="My appointments" />
                    <Show when=move || is_vendor.get()>
                        <NavLink href="/vendor/appointments" label="Salon requests" />
                    </Show>
                </div>
            </div>
        </nav>
    }
}
