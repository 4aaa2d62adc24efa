use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::{Slot, SlotTime};

use crate::api::{BookingBackend, BookingClient};
use crate::booking::{AvailabilityQuery, SlotsState};
use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::error::BookingError;

/// Loads slots for `query` and hands the result to `apply`. If the owning
/// modal has closed by then, the result is dropped.
pub fn spawn_slot_fetch<T>(
    client: BookingClient,
    target: RwSignal<T>,
    query: AvailabilityQuery,
    apply: fn(&mut T, &AvailabilityQuery, Result<Vec<Slot>, BookingError>) -> bool,
) where
    T: Send + Sync + 'static,
{
    spawn_local(async move {
        let result = client.fetch_availability(&query.key).await;
        if let Err(err) = &result {
            leptos::logging::warn!("Failed to load availability for {}: {}", query.key.date, err);
        }
        let _ = target.try_update(|state| apply(state, &query, result));
    });
}

#[component]
pub fn TimeSlotPicker(
    #[prop(into)] state: Signal<SlotsState>,
    #[prop(into)] selected: Signal<Option<SlotTime>>,
    on_select: impl Fn(SlotTime) + 'static + Copy + Send + Sync,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="time-slot-picker">
            {move || match state.get() {
                SlotsState::Idle => view! {
                    <p class="time-slot-picker-hint">"Pick a date to see open times."</p>
                }
                .into_any(),
                SlotsState::Loading => view! {
                    <LoadingView message="Loading available time slots..." compact=true />
                }
                .into_any(),
                SlotsState::Failed(err) => view! {
                    <div class="time-slot-picker-error">
                        <p>"Unable to load availability for that day."</p>
                        <ErrorView error=err />
                    </div>
                }
                .into_any(),
                SlotsState::Ready(slots) if slots.is_empty() => view! {
                    <div class="time-slot-picker-empty">
                        <p>"No open slots for this day."</p>
                        <p class="time-slot-picker-suggestion">"Try another date."</p>
                    </div>
                }
                .into_any(),
                SlotsState::Ready(slots) => view! {
                    <div class="time-slot-grid">
                        {slots
                            .into_iter()
                            .map(|slot| {
                                let time = slot.time;
                                let free = slot.is_free();
                                let label = slot.display_label();
                                let status = (!free).then(|| slot.status.label());
                                view! {
                                    <button
                                        type="button"
                                        class="time-slot"
                                        class:selected=move || selected.get() == Some(time)
                                        class:unavailable={!free}
                                        disabled=move || !free || disabled.get()
                                        on:click=move |_| {
                                            if free {
                                                on_select(time);
                                            }
                                        }
                                    >
                                        <span class="time-slot-label">{label}</span>
                                        {status.map(|text| view! { <span class="time-slot-status">{text}</span> })}
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
