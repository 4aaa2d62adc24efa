use leptos::prelude::*;
use shared_types::{format_price, Appointment, AppointmentStatus, PaymentStatus};

use crate::booking::AppointmentBook;
use crate::utils::format::{format_local_date, format_local_time};

fn status_class(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Confirmed => "status-badge status-badge--confirmed",
        AppointmentStatus::Pending
        | AppointmentStatus::AwaitingVendor
        | AppointmentStatus::RescheduleRequested => "status-badge status-badge--pending",
        AppointmentStatus::Completed => "status-badge status-badge--completed",
        AppointmentStatus::Cancelled | AppointmentStatus::Denied | AppointmentStatus::NoShow => {
            "status-badge status-badge--closed"
        }
    }
}

#[component]
pub fn StatusBadge(status: AppointmentStatus) -> impl IntoView {
    view! { <span class=status_class(status)>{status.label()}</span> }
}

/// Follows one appointment through later patches to the book. Once the id
/// leaves the book the memo keeps the last version it saw.
pub fn track_appointment(book: RwSignal<AppointmentBook>, appointment: Appointment) -> Memo<Appointment> {
    Memo::new(move |previous: Option<&Appointment>| {
        book.with(|b| b.find(&appointment.id).cloned())
            .or_else(|| previous.cloned())
            .unwrap_or_else(|| appointment.clone())
    })
}

fn payment_class(payment: PaymentStatus) -> &'static str {
    match payment {
        PaymentStatus::Paid => "payment-pill payment-pill--paid",
        PaymentStatus::Refunded => "payment-pill payment-pill--refunded",
    }
}

fn shown_reason(appointment: &Appointment) -> Option<String> {
    matches!(
        appointment.status,
        AppointmentStatus::Cancelled | AppointmentStatus::Denied
    )
    .then(|| appointment.cancellation_reason.clone())
    .flatten()
}

/// Read-only summary of one appointment. Actions are passed in as children
/// and stay mounted while the appointment itself changes.
#[component]
pub fn AppointmentCard(
    #[prop(into)] appointment: Signal<Appointment>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let field = move |read: fn(&Appointment) -> String| move || appointment.with(read);

    view! {
        <article class="appointment-card" data-appointment-id=field(|a| a.id.clone())>
            <header class="appointment-card-header">
                <h3 class="appointment-card-salon">{field(|a| a.salon.name.clone())}</h3>
                {move || view! { <StatusBadge status=appointment.with(|a| a.status) /> }}
            </header>

            <div class="appointment-card-when">
                <span class="appointment-card-date">{field(|a| format_local_date(a.start_at))}</span>
                <span class="appointment-card-time">{field(|a| format_local_time(a.start_at))}</span>
            </div>

            {move || {
                appointment
                    .with(|a| a.salon.address.clone())
                    .map(|address| view! { <p class="appointment-card-address">{address}</p> })
            }}

            <dl class="appointment-card-details">
                <dt>"Service"</dt>
                <dd>{field(|a| a.service.name.clone())}</dd>
                <dt>"With"</dt>
                <dd>{field(|a| a.provider.name.clone())}</dd>
                <dt>"Price"</dt>
                <dd>{field(|a| format_price(a.service.price))}</dd>
                {move || appointment.with(|a| a.customer.clone()).map(|customer| view! {
                    <dt>"Customer"</dt>
                    <dd>{customer.display_name()}</dd>
                })}
            </dl>

            {move || {
                let payment = appointment.with(|a| a.payment());
                view! { <span class=payment_class(payment)>{payment.label()}</span> }
            }}

            {move || appointment.with(shown_reason).map(|reason| view! {
                <p class="appointment-card-reason">
                    <strong>"Reason: "</strong>
                    {reason}
                </p>
            })}

            {move || appointment.with(|a| a.note.clone()).map(|note| view! {
                <p class="appointment-card-note">
                    <strong>"Note: "</strong>
                    {note}
                </p>
            })}

            {children.map(|children| view! { <footer class="appointment-card-actions">{children()}</footer> })}
        </article>
    }
}
