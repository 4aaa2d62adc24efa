use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::Appointment;
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::booking::{ReasonForm, ReasonKind};
use crate::components::error::ErrorView;
use crate::utils::format::{format_local_date, format_local_time};

/// Cancel (customer) or deny (salon) with a preset or free-text reason.
#[component]
pub fn ReasonModal(
    kind: ReasonKind,
    appointment: Appointment,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_success: impl Fn(Appointment) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let summary = format!(
        "{} with {} on {} at {}",
        appointment.service.name,
        appointment.provider.name,
        format_local_date(appointment.start_at),
        format_local_time(appointment.start_at)
    );

    let form = match ReasonForm::open(kind, appointment) {
        Ok(form) => RwSignal::new(form),
        Err(error) => {
            return view! {
                <div class="booking-modal-overlay show">
                    <div class="booking-modal">
                        <ErrorView error=error />
                        <div class="form-actions">
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                                "Close"
                            </Button>
                        </div>
                    </div>
                </div>
            }
            .into_any();
        }
    };
    let client = use_booking_client();
    let other_text = RwSignal::new(String::new());

    Effect::new(move |_| {
        let text = other_text.get();
        form.update(|f| f.set_other_text(text));
    });

    let is_saving = Signal::derive(move || form.with(|f| f.is_saving()));
    let confirm_disabled = Memo::new(move |_| !form.with(|f| f.can_confirm()));

    let on_confirm = move |_| {
        let Some(reason) = form.try_update(|f| f.confirm()).flatten() else {
            return;
        };
        let appointment_id = form.with_untracked(|f| f.appointment().id.clone());
        let client = client.get_value();
        spawn_local(async move {
            let result = match kind {
                ReasonKind::Cancel => client.cancel_appointment(&appointment_id, &reason).await,
                ReasonKind::Deny => client.vendor_deny(&appointment_id, &reason).await,
            };
            if let Err(err) = &result {
                leptos::logging::warn!("{} failed for {}: {}", kind.title(), appointment_id, err);
            }
            if let Some(Some(patched)) = form.try_update(|f| f.finish(result)) {
                on_success(patched);
                on_close();
            }
        });
    };

    view! {
        <div class="booking-modal-overlay show">
            <div class="booking-modal reason-modal">
                <div class="modal-header">
                    <div>
                        <h2>{kind.title()}</h2>
                        <p class="modal-subtitle">{summary}</p>
                    </div>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_close()
                        disabled=is_saving
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>

                <div class="modal-content">
                    <p>{kind.prompt()}</p>
                    <div class="reason-options" role="radiogroup">
                        {kind
                            .presets()
                            .iter()
                            .enumerate()
                            .map(|(index, label)| {
                                view! {
                                    <label class="reason-option">
                                        <input
                                            type="radio"
                                            name="reason"
                                            prop:checked=move || form.with(|f| f.choice() == index)
                                            disabled=move || is_saving.get()
                                            on:change=move |_| form.update(|f| f.choose(index))
                                        />
                                        <span>{*label}</span>
                                    </label>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>

                    <Show when=move || form.with(|f| f.is_other())>
                        <div class="form-group">
                            <label for="reason-other">"Tell us more"</label>
                            <Input
                                id="reason-other"
                                placeholder="Add a short reason"
                                value=other_text
                                disabled=is_saving
                            />
                        </div>
                    </Show>

                    {move || form.with(|f| f.error().cloned()).map(|error| view! { <ErrorView error=error /> })}
                </div>

                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_saving
                        on_click=move |_| on_close()
                    >
                        {kind.dismiss_label()}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::from(confirm_disabled)
                        loading=is_saving
                        on_click=on_confirm
                    >
                        {move || if is_saving.get() { kind.busy_label() } else { kind.confirm_label() }}
                    </Button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
