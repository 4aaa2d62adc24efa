use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

use crate::error::BookingError;

/// Inline error banner. Problems the user can fix themselves render as
/// warnings; everything else as errors.
#[component]
pub fn ErrorView(error: BookingError) -> impl IntoView {
    let intent = match &error {
        BookingError::Validation(_)
        | BookingError::Conflict(_)
        | BookingError::PartialFailure { .. } => MessageBarIntent::Warning,
        BookingError::Network(_) | BookingError::Rejected { .. } | BookingError::Decode(_) => {
            MessageBarIntent::Error
        }
    };

    view! {
        <MessageBar intent=intent>
            {error.to_string()}
        </MessageBar>
    }
}
