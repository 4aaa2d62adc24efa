use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::api::BookingClient;
use crate::components::navbar::Navbar;
use crate::config::ApiConfig;
use crate::session;
use crate::views::appointments::AppointmentsPage;
use crate::views::home::HomePage;
use crate::views::not_found::NotFoundPage;
use crate::views::salon_booking::SalonBookingPage;
use crate::views::vendor_appointments::VendorAppointmentsPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <link rel="icon" href="/favicon.svg"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

/// Makes a [`BookingClient`] available to every component below the caller.
pub fn provide_booking_client(config: ApiConfig) {
    tracing::debug!(base_url = %config.base_url, "booking client configured");
    provide_context(BookingClient::new(config, session::default_store()));
}

pub fn use_booking_client() -> StoredValue<BookingClient> {
    StoredValue::new(expect_context::<BookingClient>())
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    if use_context::<BookingClient>().is_none() {
        provide_booking_client(ApiConfig::default());
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/salon-web.css"/>
        <Title text="Salon Booking"/>

        <ConfigProvider>
            <Router>
                <Navbar/>
                <main>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("appointments") view=AppointmentsPage/>
                        <Route
                            path=(StaticSegment("vendor"), StaticSegment("appointments"))
                            view=VendorAppointmentsPage
                        />
                        <Route path=(StaticSegment("salons"), ParamSegment("id")) view=SalonBookingPage/>
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
