use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::{Appointment, CalendarDate, SalonDetail};
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::booking::{BookingWizard, ProvidersState, WizardAction, WizardStep};
use crate::components::calendar_picker::CalendarPicker;
use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::time_slot_picker::{spawn_slot_fetch, TimeSlotPicker};
use crate::utils::format::format_calendar_date;

/// Five-step booking modal. Mount it to open; unmounting drops every
/// selection along with any request still in flight.
#[component]
pub fn BookingWizardModal(
    salon: SalonDetail,
    today: CalendarDate,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_booked: impl Fn(Appointment) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let client = use_booking_client();
    let wizard = RwSignal::new(BookingWizard::new(&salon, today));
    let note = RwSignal::new(String::new());
    let salon_name = salon.name.clone();

    if wizard.with_untracked(|w| w.needs_providers()) {
        let salon_id = salon.id.clone();
        let client = client.get_value();
        spawn_local(async move {
            match client.list_providers(&salon_id).await {
                Ok(providers) => {
                    let _ = wizard.try_update(|w| w.set_providers(providers));
                }
                Err(err) => {
                    leptos::logging::error!("Failed to load team for salon {}: {}", salon_id, err);
                    let _ = wizard.try_update(|w| w.providers_failed(err));
                }
            }
        });
    }

    // Refetch whenever the (provider, service, date) key changes inside step 3.
    let availability_key = Memo::new(move |_| wizard.with(|w| w.availability_key()));
    Effect::new(move |_| {
        let Some(key) = availability_key.get() else {
            return;
        };
        if let Some(query) = wizard.try_update(|w| w.begin_availability(key)) {
            spawn_slot_fetch(
                client.get_value(),
                wizard,
                query,
                BookingWizard::apply_availability,
            );
        }
    });

    Effect::new(move |_| {
        let text = note.get();
        wizard.update(|w| w.set_note(text));
    });

    let is_submitting = Signal::derive(move || wizard.with(|w| w.is_submitting()));
    let continue_disabled = Memo::new(move |_| !wizard.with(|w| w.can_continue()));
    let back_disabled = Memo::new(move |_| !wizard.with(|w| w.can_go_back()));

    let on_continue = move |_| {
        let Some(action) = wizard.try_update(|w| w.advance()) else {
            return;
        };
        let WizardAction::Submit(payload) = action else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            match client.create_appointment(&payload).await {
                Ok(change) => {
                    if let Some(Some(appointment)) = wizard.try_update(|w| w.complete(change)) {
                        on_booked(appointment);
                        on_close();
                    }
                }
                Err(err) => {
                    leptos::logging::warn!("Booking failed: {}", err);
                    let _ = wizard.try_update(|w| w.submission_failed(err));
                }
            }
        });
    };

    view! {
        <div class="booking-modal-overlay show">
            <div class="booking-modal booking-wizard">
                <div class="modal-header">
                    <div>
                        <h2>{format!("Book at {}", salon_name)}</h2>
                        <p class="wizard-step-label">
                            {move || {
                                let step = wizard.with(|w| w.step());
                                format!("Step {} of {} · {}", step.number(), WizardStep::COUNT, step.title())
                            }}
                        </p>
                    </div>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_close()
                        disabled=is_submitting
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>

                <div class="wizard-progress">
                    <div
                        class="wizard-progress-bar"
                        style=move || format!("width: {}%", wizard.with(|w| w.progress_percent()))
                    ></div>
                </div>

                <div class="modal-content">
                    {move || match wizard.with(|w| w.step()) {
                        WizardStep::SelectProvider => view! { <ProviderStep wizard=wizard /> }.into_any(),
                        WizardStep::SelectService => view! { <ServiceStep wizard=wizard /> }.into_any(),
                        WizardStep::SelectDateTime => view! { <DateTimeStep wizard=wizard today=today /> }.into_any(),
                        WizardStep::Notes => view! {
                            <div class="wizard-step">
                                <label for="booking-note">"Notes for your stylist (optional)"</label>
                                <Textarea
                                    id="booking-note"
                                    placeholder="Hair length, allergies, anything helpful..."
                                    value=note
                                />
                            </div>
                        }
                        .into_any(),
                        WizardStep::PaymentStub => view! { <PaymentStep wizard=wizard /> }.into_any(),
                    }}

                    {move || wizard.with(|w| w.error().cloned()).map(|error| view! { <ErrorView error=error /> })}
                </div>

                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::from(back_disabled)
                        on_click=move |_| {
                            wizard.update(|w| {
                                w.back();
                            });
                        }
                    >
                        "Back"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::from(continue_disabled)
                        loading=is_submitting
                        on_click=on_continue
                    >
                        {move || match (wizard.with(|w| w.step()), is_submitting.get()) {
                            (WizardStep::PaymentStub, true) => "Booking...",
                            (WizardStep::PaymentStub, false) => "Confirm booking",
                            _ => "Continue",
                        }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProviderStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    view! {
        <div class="wizard-step">
            {move || match wizard.with(|w| w.providers_state().clone()) {
                ProvidersState::Loading => view! {
                    <LoadingView message="Loading the team..." compact=true />
                }
                .into_any(),
                ProvidersState::Failed(error) => view! { <ErrorView error=error /> }.into_any(),
                ProvidersState::Ready => {
                    let providers = wizard.with(|w| w.providers().to_vec());
                    if providers.is_empty() {
                        return view! {
                            <p class="wizard-empty">"This salon hasn't listed its team yet."</p>
                        }
                        .into_any();
                    }
                    let chosen = wizard.with(|w| w.provider().map(|p| p.id.clone()));
                    view! {
                        <div class="option-grid">
                            {providers
                                .into_iter()
                                .map(|provider| {
                                    let is_chosen = chosen.as_deref() == Some(provider.id.as_str());
                                    let name = provider.name.clone();
                                    let specialties = provider.specialty_summary();
                                    view! {
                                        <button
                                            type="button"
                                            class="option-card"
                                            class:chosen=is_chosen
                                            on:click=move |_| wizard.update(|w| w.select_provider(provider.clone()))
                                        >
                                            <span class="option-card-title">{name}</span>
                                            <span class="option-card-meta">{specialties}</span>
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ServiceStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    view! {
        <div class="wizard-step">
            {move || {
                let services = wizard.with(|w| w.services().to_vec());
                if services.is_empty() {
                    return view! {
                        <p class="wizard-empty">"No services are bookable online right now."</p>
                    }
                    .into_any();
                }
                let chosen = wizard.with(|w| w.service().map(|s| s.id.clone()));
                view! {
                    <div class="option-grid">
                        {services
                            .into_iter()
                            .map(|service| {
                                let is_chosen = chosen.as_deref() == Some(service.id.as_str());
                                let name = service.name.clone();
                                let meta = format!("{} · {}", service.duration_label(), service.price_label());
                                view! {
                                    <button
                                        type="button"
                                        class="option-card"
                                        class:chosen=is_chosen
                                        on:click=move |_| wizard.update(|w| w.select_service(service.clone()))
                                    >
                                        <span class="option-card-title">{name}</span>
                                        <span class="option-card-meta">{meta}</span>
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn DateTimeStep(wizard: RwSignal<BookingWizard>, today: CalendarDate) -> impl IntoView {
    let selected_date = Signal::derive(move || wizard.with(|w| w.date()));
    let slot_state = Signal::derive(move || wizard.with(|w| w.slots().state().clone()));
    let selected_slot = Signal::derive(move || wizard.with(|w| w.slot()));

    view! {
        <div class="wizard-step date-time-step">
            <CalendarPicker
                selected=selected_date
                today=today
                on_select=move |date| wizard.update(|w| w.select_date(date))
            />
            <div class="date-time-slots">
                <h4>{move || format_calendar_date(selected_date.get())}</h4>
                <TimeSlotPicker
                    state=slot_state
                    selected=selected_slot
                    on_select=move |time| {
                        wizard.update(|w| {
                            w.select_slot(time);
                        });
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn PaymentStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let summary = move || {
        wizard.with(|w| {
            (
                w.salon().name.clone(),
                w.provider().map(|p| p.name.clone()).unwrap_or_default(),
                w.service().map(|s| s.name.clone()).unwrap_or_default(),
                w.service().map(|s| s.price_label()).unwrap_or_default(),
                format_calendar_date(w.date()),
                w.slot().map(|t| t.twelve_hour()).unwrap_or_default(),
                w.note().trim().to_string(),
            )
        })
    };

    view! {
        <div class="wizard-step booking-summary">
            {move || {
                let (salon, provider, service, price, date, time, note) = summary();
                view! {
                    <dl>
                        <dt>"Salon"</dt>
                        <dd>{salon}</dd>
                        <dt>"Stylist"</dt>
                        <dd>{provider}</dd>
                        <dt>"Service"</dt>
                        <dd>{service}</dd>
                        <dt>"When"</dt>
                        <dd>{format!("{date} at {time}")}</dd>
                        <dt>"Total"</dt>
                        <dd>{price}</dd>
                    </dl>
                    {(!note.is_empty()).then(|| view! { <p class="booking-summary-note">{note}</p> })}
                }
            }}
            <p class="payment-stub-notice">
                "Payment is taken at the salon. Nothing is charged now."
            </p>
        </div>
    }
}
