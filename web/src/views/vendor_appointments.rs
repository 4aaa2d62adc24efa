use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::Appointment;
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::booking::{confirmed, load_vendor_board, ReasonKind, VendorBoard};
use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::{AppointmentCard, ReasonModal};
use crate::error::BookingError;

const CONFIRM_MESSAGE: &str = "Confirmed by vendor";

#[component]
fn Bucket(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="vendor-bucket">
            <h2>{title}</h2>
            <div class="appointments-list">
                {children()}
            </div>
        </section>
    }
}

fn empty_or<V: IntoView + 'static>(items: Vec<V>, empty: &'static str) -> AnyView {
    if items.is_empty() {
        view! { <p class="appointments-empty">{empty}</p> }.into_any()
    } else {
        items.into_any()
    }
}

/// Salon-side queue: pending requests to confirm or deny, plus what was
/// already decided.
#[component]
pub fn VendorAppointmentsPage() -> impl IntoView {
    let client = use_booking_client();
    let board = RwSignal::new(VendorBoard::default());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<BookingError>);
    let notice = RwSignal::new(None::<BookingError>);
    let confirming = RwSignal::new(None::<String>);
    let denying = RwSignal::new(None::<Appointment>);

    Effect::new(move |_| {
        let client = client.get_value();
        spawn_local(async move {
            match load_vendor_board(&client).await {
                Ok(loaded) => {
                    let _ = board.try_set(loaded);
                }
                Err(err) => {
                    leptos::logging::error!("Failed to load booking requests: {}", err);
                    let _ = load_error.try_set(Some(err));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let confirm = move |appointment: Appointment| {
        if confirming.get_untracked().is_some() {
            return;
        }
        confirming.set(Some(appointment.id.clone()));
        notice.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match client.vendor_confirm(&appointment.id, CONFIRM_MESSAGE).await {
                Ok(change) => {
                    let accepted = confirmed(&appointment, &change);
                    let _ = board.try_update(|b| *b = b.with_confirmed(&accepted));
                }
                Err(err) => {
                    leptos::logging::warn!("Confirm failed for {}: {}", appointment.id, err);
                    let _ = notice.try_set(Some(err));
                }
            }
            let _ = confirming.try_set(None);
        });
    };

    let pending_view = move || {
        let cards = board
            .with(|b| b.pending.clone())
            .into_iter()
            .map(|appointment| {
                let id = appointment.id.clone();
                let is_confirming =
                    Signal::derive(move || confirming.get().as_deref() == Some(id.as_str()));
                let busy = Signal::derive(move || confirming.get().is_some());
                let for_confirm = appointment.clone();
                let for_deny = appointment.clone();
                view! {
                    <AppointmentCard appointment=appointment>
                        <Button
                            appearance=ButtonAppearance::Primary
                            loading=is_confirming
                            disabled=busy
                            on_click=move |_| confirm(for_confirm.clone())
                        >
                            "Confirm"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            disabled=busy
                            on_click=move |_| denying.set(Some(for_deny.clone()))
                        >
                            "Deny"
                        </Button>
                    </AppointmentCard>
                }
            })
            .collect::<Vec<_>>();
        empty_or(cards, "No requests waiting.")
    };

    let decided_view = move |denied: bool| {
        let list = board.with(|b| if denied { b.denied.clone() } else { b.upcoming.clone() });
        let cards = list
            .into_iter()
            .map(|appointment| view! { <AppointmentCard appointment=appointment /> })
            .collect::<Vec<_>>();
        empty_or(
            cards,
            if denied { "Nothing denied." } else { "No confirmed appointments coming up." },
        )
    };

    view! {
        <div class="vendor-appointments-page">
            <header class="page-header">
                <h1>"Booking requests"</h1>
            </header>

            {move || notice.get().map(|error| view! { <ErrorView error=error /> })}

            {move || {
                if loading.get() {
                    return view! { <LoadingView message="Loading requests..." /> }.into_any();
                }
                if let Some(error) = load_error.get() {
                    return view! { <ErrorView error=error /> }.into_any();
                }
                view! {
                    <Bucket title="Pending confirmation">
                        {pending_view}
                    </Bucket>
                    <Bucket title="Upcoming (confirmed)">
                        {move || decided_view(false)}
                    </Bucket>
                    <Bucket title="Denied">
                        {move || decided_view(true)}
                    </Bucket>
                }
                .into_any()
            }}

            {move || denying.get().map(|appointment| view! {
                <ReasonModal
                    kind=ReasonKind::Deny
                    appointment=appointment
                    on_close=move || denying.set(None)
                    on_success=move |denied: Appointment| {
                        board.update(|b| *b = b.with_denied(&denied))
                    }
                />
            })}
        </div>
    }
}
