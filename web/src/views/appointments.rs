use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use shared_types::{Appointment, AppointmentChange, CalendarDate, Review, SalonDetail};
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::booking::{load_appointment_book, AppointmentBook, ReasonKind};
use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::{
    track_appointment, AppointmentCard, BookingWizardModal, NoteEditor, ReasonModal,
    RescheduleModal, ReviewPanel,
};
use crate::error::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Upcoming,
    Past,
}

/// The customer's upcoming and past appointments. Loaded once; every change
/// made from this page is patched into the local book without a refetch.
#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let client = use_booking_client();
    let today = CalendarDate::today();

    let book = RwSignal::new(AppointmentBook::default());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<BookingError>);
    let notice = RwSignal::new(None::<BookingError>);
    let tab = RwSignal::new(Tab::Upcoming);

    let rescheduling = RwSignal::new(None::<Appointment>);
    let cancelling = RwSignal::new(None::<Appointment>);
    let rebooking = RwSignal::new(None::<SalonDetail>);
    let rebook_loading = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = client.get_value();
        spawn_local(async move {
            match load_appointment_book(&client).await {
                Ok(loaded) => {
                    let _ = book.try_set(loaded);
                }
                Err(err) => {
                    leptos::logging::error!("Failed to load appointments: {}", err);
                    let _ = load_error.try_set(Some(err));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let book_again = move |salon_id: String| {
        if rebook_loading.get_untracked().is_some() {
            return;
        }
        rebook_loading.set(Some(salon_id.clone()));
        notice.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match client.fetch_salon(&salon_id).await {
                Ok(salon) => {
                    let _ = rebooking.try_set(Some(salon));
                }
                Err(err) => {
                    let _ = notice.try_set(Some(err));
                }
            }
            let _ = rebook_loading.try_set(None);
        });
    };

    let upcoming_row = move |appointment: Appointment| {
        let can_modify = appointment.can_modify();
        let note = appointment.note.clone();
        let id = appointment.id.clone();
        let current = track_appointment(book, appointment);
        view! {
            <AppointmentCard appointment=current>
                {can_modify.then(move || view! {
                    <NoteEditor
                        appointment_id=id
                        note=note
                        on_saved=move |change: AppointmentChange| {
                            book.update(|b| *b = b.with_note(&change))
                        }
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| rescheduling.set(Some(current.get_untracked()))
                    >
                        "Reschedule"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| cancelling.set(Some(current.get_untracked()))
                    >
                        "Cancel"
                    </Button>
                })}
            </AppointmentCard>
        }
    };

    let past_row = move |appointment: Appointment| {
        let salon_id = appointment.salon.id.clone();
        let loading_salon = salon_id.clone();
        let is_rebooking = Signal::derive(move || {
            rebook_loading.get().as_deref() == Some(loading_salon.as_str())
        });
        let review_panel = appointment.can_review().then(|| {
            view! {
                <ReviewPanel
                    appointment_id=appointment.id.clone()
                    existing=appointment.review.clone()
                    on_saved=move |id: String, review: Review| {
                        book.update(|b| *b = b.with_review(&id, &review))
                    }
                />
            }
        });
        let current = track_appointment(book, appointment);
        view! {
            <AppointmentCard appointment=current>
                {review_panel}
                <Button
                    appearance=ButtonAppearance::Secondary
                    loading=is_rebooking
                    on_click=move |_| book_again(salon_id.clone())
                >
                    "Book again"
                </Button>
            </AppointmentCard>
        }
    };

    // Rows are keyed by id so open editors and review forms outlive patches.
    let upcoming_view = move || {
        view! {
            <Show
                when=move || book.with(|b| !b.upcoming.is_empty())
                fallback=|| view! {
                    <div class="appointments-empty">
                        <p>"No upcoming appointments."</p>
                        <A href="/">"Find a salon"</A>
                    </div>
                }
            >
                <For
                    each=move || book.with(|b| b.upcoming.clone())
                    key=|appointment| appointment.id.clone()
                    children=upcoming_row
                />
            </Show>
        }
        .into_any()
    };

    let past_view = move || {
        view! {
            <Show
                when=move || book.with(|b| !b.past.is_empty())
                fallback=|| view! {
                    <div class="appointments-empty">
                        <p>"No past appointments yet."</p>
                    </div>
                }
            >
                <For
                    each=move || book.with(|b| b.past.clone())
                    key=|appointment| appointment.id.clone()
                    children=past_row
                />
            </Show>
        }
        .into_any()
    };

    view! {
        <div class="appointments-page">
            <header class="page-header">
                <h1>"My appointments"</h1>
            </header>

            <div class="tabs" role="tablist">
                <button
                    type="button"
                    class="tab"
                    class:active=move || tab.get() == Tab::Upcoming
                    on:click=move |_| tab.set(Tab::Upcoming)
                >
                    {move || format!("Upcoming ({})", book.with(|b| b.upcoming.len()))}
                </button>
                <button
                    type="button"
                    class="tab"
                    class:active=move || tab.get() == Tab::Past
                    on:click=move |_| tab.set(Tab::Past)
                >
                    {move || format!("Past ({})", book.with(|b| b.past.len()))}
                </button>
            </div>

            {move || notice.get().map(|error| view! { <ErrorView error=error /> })}

            <div class="appointments-list">
                {move || {
                    if loading.get() {
                        return view! { <LoadingView message="Loading your appointments..." /> }.into_any();
                    }
                    if let Some(error) = load_error.get() {
                        return view! { <ErrorView error=error /> }.into_any();
                    }
                    match tab.get() {
                        Tab::Upcoming => upcoming_view(),
                        Tab::Past => past_view(),
                    }
                }}
            </div>

            {move || rescheduling.get().map(|appointment| view! {
                <RescheduleModal
                    appointment=appointment
                    today=today
                    on_close=move || rescheduling.set(None)
                    on_success=move |updated: Appointment| {
                        book.update(|b| *b = b.with_rescheduled(&updated))
                    }
                />
            })}

            {move || cancelling.get().map(|appointment| view! {
                <ReasonModal
                    kind=ReasonKind::Cancel
                    appointment=appointment
                    on_close=move || cancelling.set(None)
                    on_success=move |cancelled: Appointment| {
                        book.update(|b| *b = b.with_cancelled(&cancelled))
                    }
                />
            })}

            {move || rebooking.get().map(|salon| view! {
                <BookingWizardModal
                    salon=salon
                    today=today
                    on_close=move || rebooking.set(None)
                    on_booked=move |created: Appointment| {
                        book.update(|b| *b = b.with_created(created));
                        tab.set(Tab::Upcoming);
                    }
                />
            })}
        </div>
    }
}
