use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::{Appointment, CalendarDate};
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::booking::{RescheduleFlow, RescheduleOutcome};
use crate::components::calendar_picker::CalendarPicker;
use crate::components::error::ErrorView;
use crate::components::time_slot_picker::{spawn_slot_fetch, TimeSlotPicker};
use crate::utils::format::{
    format_calendar_date, format_local_date, format_local_time, local_calendar_date,
    local_offset_label,
};

#[component]
pub fn RescheduleModal(
    appointment: Appointment,
    today: CalendarDate,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_success: impl Fn(Appointment) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let starts_on = local_calendar_date(appointment.start_at).max(today);
    let current = format!(
        "{} at {} ({})",
        format_local_date(appointment.start_at),
        format_local_time(appointment.start_at),
        local_offset_label(appointment.start_at)
    );

    let flow = match RescheduleFlow::open(appointment, starts_on) {
        Ok(flow) => RwSignal::new(flow),
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

    let date = Memo::new(move |_| flow.with(|f| f.date()));
    Effect::new(move |_| {
        date.track();
        if let Some(query) = flow.try_update(|f| f.begin_availability()) {
            spawn_slot_fetch(
                client.get_value(),
                flow,
                query,
                RescheduleFlow::apply_availability,
            );
        }
    });

    let is_saving = Signal::derive(move || flow.with(|f| f.is_saving()));
    let confirm_disabled = Memo::new(move |_| !flow.with(|f| f.can_confirm()));

    let on_confirm = move |_| {
        let Some(request) = flow.try_update(|f| f.confirm()).flatten() else {
            return;
        };
        let appointment_id = flow.with_untracked(|f| f.appointment().id.clone());
        let client = client.get_value();
        spawn_local(async move {
            let result = client.reschedule_appointment(&appointment_id, &request).await;
            match flow.try_update(|f| f.finish(result)) {
                Some(RescheduleOutcome::Rescheduled(appointment)) => {
                    on_success(appointment);
                    on_close();
                }
                Some(RescheduleOutcome::Refetch(query)) => {
                    spawn_slot_fetch(client, flow, query, RescheduleFlow::apply_availability);
                }
                Some(RescheduleOutcome::Failed) | None => {}
            }
        });
    };

    view! {
        <div class="booking-modal-overlay show">
            <div class="booking-modal reschedule-modal">
                <div class="modal-header">
                    <div>
                        <h2>"Reschedule appointment"</h2>
                        <p class="modal-subtitle">{format!("Currently {}", current)}</p>
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

                <div class="modal-content date-time-step">
                    <CalendarPicker
                        selected=Signal::from(date)
                        today=today
                        disabled=is_saving
                        on_select=move |picked| flow.update(|f| f.select_date(picked))
                    />
                    <div class="date-time-slots">
                        <h4>{move || format_calendar_date(date.get())}</h4>
                        <TimeSlotPicker
                            state=Signal::derive(move || flow.with(|f| f.slots().state().clone()))
                            selected=Signal::derive(move || flow.with(|f| f.selected()))
                            disabled=is_saving
                            on_select=move |time| {
                                flow.update(|f| {
                                    f.select_time(time);
                                });
                            }
                        />
                    </div>
                </div>

                {move || flow.with(|f| f.error().cloned()).map(|error| view! { <ErrorView error=error /> })}

                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_saving
                        on_click=move |_| on_close()
                    >
                        "Keep current time"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::from(confirm_disabled)
                        loading=is_saving
                        on_click=on_confirm
                    >
                        {move || if is_saving.get() { "Saving..." } else { "Confirm new time" }}
                    </Button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
