use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::{AppointmentChange, AppointmentUpdate};
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::components::error::ErrorView;
use crate::error::BookingError;

/// Inline editor for the note on an upcoming appointment.
#[component]
pub fn NoteEditor(
    appointment_id: String,
    note: Option<String>,
    on_saved: impl Fn(AppointmentChange) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let client = use_booking_client();
    let editing = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<BookingError>);
    let original = RwSignal::new(note.unwrap_or_default());
    let draft = RwSignal::new(original.get_untracked());
    let appointment_id = StoredValue::new(appointment_id);

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let text = draft.get_untracked().trim().to_string();
        let update = AppointmentUpdate {
            id: appointment_id.get_value(),
            notes: Some(text.clone()),
        };
        saving.set(true);
        error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match client.update_appointment(&update).await {
                Ok(mut change) => {
                    if change.note.is_none() {
                        change.note = Some(text);
                    }
                    let _ = original.try_set(change.note.clone().unwrap_or_default());
                    if change.id.is_empty() {
                        change.id = update.id.clone();
                    }
                    on_saved(change);
                    let _ = editing.try_set(false);
                }
                Err(err) => {
                    leptos::logging::warn!("Note update failed for {}: {}", update.id, err);
                    let _ = error.try_set(Some(err));
                }
            }
            let _ = saving.try_set(false);
        });
    };

    view! {
        {move || {
            if !editing.get() {
                return view! {
                    <Button
                        appearance=ButtonAppearance::Transparent
                        size=ButtonSize::Small
                        on_click=move |_| {
                            draft.set(original.get_untracked());
                            editing.set(true);
                        }
                    >
                        "Edit note"
                    </Button>
                }
                .into_any();
            }
            view! {
                <div class="form-group note-editor">
                    <Textarea value=draft placeholder="Anything the salon should know?" />
                    {move || error.get().map(|error| view! { <ErrorView error=error /> })}
                    <div class="form-actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=saving
                            on_click=move |_| editing.set(false)
                        >
                            "Discard"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            loading=saving
                            on_click=save
                        >
                            "Save note"
                        </Button>
                    </div>
                </div>
            }
            .into_any()
        }}
    }
}
