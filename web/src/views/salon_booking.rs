use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use shared_types::{Appointment, CalendarDate, SalonDetail};
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::BookingWizardModal;
use crate::error::BookingError;
use crate::utils::format::{format_local_date, format_local_time};

#[component]
pub fn SalonBookingPage() -> impl IntoView {
    let params = use_params_map();
    let salon_id = Memo::new(move |_| params.with(|p| p.get("id")).unwrap_or_default());
    let client = use_booking_client();
    let today = CalendarDate::today();

    let salon = RwSignal::new(None::<SalonDetail>);
    let load_error = RwSignal::new(None::<BookingError>);
    let wizard_open = RwSignal::new(false);
    let booked = RwSignal::new(None::<Appointment>);

    Effect::new(move |_| {
        let id = salon_id.get();
        salon.set(None);
        load_error.set(None);
        if id.is_empty() {
            load_error.set(Some(BookingError::validation("No salon selected.")));
            return;
        }
        let client = client.get_value();
        spawn_local(async move {
            match client.fetch_salon(&id).await {
                Ok(detail) => {
                    let _ = salon.try_set(Some(detail));
                }
                Err(err) => {
                    leptos::logging::error!("Failed to load salon {}: {}", id, err);
                    let _ = load_error.try_set(Some(err));
                }
            }
        });
    });

    let header = move |detail: &SalonDetail| {
        let services = detail
            .services
            .iter()
            .map(|service| {
                view! {
                    <li class="salon-service">
                        <span class="salon-service-name">{service.name.clone()}</span>
                        <span class="salon-service-meta">
                            {service.duration_label()} " · " {service.price_label()}
                        </span>
                    </li>
                }
            })
            .collect::<Vec<_>>();
        view! {
            <header class="salon-header">
                <h1>{detail.name.clone()}</h1>
                {detail.address.clone().map(|address| view! { <p class="salon-address">{address}</p> })}
                {detail.hours.clone().map(|hours| view! { <p class="salon-hours">{hours}</p> })}
            </header>
            <section class="salon-services">
                <h2>"Services"</h2>
                <ul>{services}</ul>
            </section>
        }
    };

    view! {
        <div class="salon-booking-page">
            {move || booked.get().map(|appointment| {
                let when = format!(
                    "{} at {}",
                    format_local_date(appointment.start_at),
                    format_local_time(appointment.start_at),
                );
                view! {
                    <MessageBar intent=MessageBarIntent::Success>
                        "Request sent for " {when} ". "
                        <A href="/appointments">"View my appointments"</A>
                    </MessageBar>
                }
            })}

            {move || {
                if let Some(error) = load_error.get() {
                    return view! { <ErrorView error=error /> }.into_any();
                }
                match salon.get() {
                    None => view! { <LoadingView message="Loading salon..." /> }.into_any(),
                    Some(detail) => {
                        let bookable = !detail.services.is_empty();
                        view! {
                            {header(&detail)}
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled={!bookable}
                                on_click=move |_| wizard_open.set(true)
                            >
                                "Book an appointment"
                            </Button>
                        }
                        .into_any()
                    }
                }
            }}

            {move || {
                if !wizard_open.get() {
                    return None;
                }
                salon.get().map(|detail| view! {
                    <BookingWizardModal
                        salon=detail
                        today=today
                        on_close=move || wizard_open.set(false)
                        on_booked=move |created: Appointment| booked.set(Some(created))
                    />
                })
            }}
        </div>
    }
}
