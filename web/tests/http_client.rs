mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{MockBackend, Reply};
use salon_web::api::BookingBackend;
use salon_web::error::BookingError;
use salon_web::session::MemorySession;
use serde_json::json;
use shared_types::{
    AppointmentQuery, AppointmentStatus, AppointmentWindow, AvailabilityKey, CalendarDate,
    ImageLabel, RescheduleRequest, ReviewImageUpload, ReviewRequest, SlotTime,
};

fn key() -> AvailabilityKey {
    AvailabilityKey {
        salon_id: "s1".into(),
        provider_id: "b1".into(),
        service_id: "cut".into(),
        date: CalendarDate::from_ymd(2025, 11, 3).unwrap(),
    }
}

#[tokio::test]
async fn lists_appointments_with_bearer_token_and_unwraps_envelope() {
    let mock = MockBackend::start(|_| {
        Reply::ok(json!({
            "appointments": [{
                "id": 41,
                "whenISO": "2025-11-01T14:00:00Z",
                "status": "scheduled",
                "salon": {"id": 1, "name": "Fade Factory"},
                "barber": {"id": 7, "name": "Marco"}
            }]
        }))
    })
    .await;

    let list = mock
        .client()
        .list_appointments(&AppointmentQuery::window(AppointmentWindow::Upcoming))
        .await
        .unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "41");
    assert_eq!(list[0].status, AppointmentStatus::Confirmed);
    assert_eq!(list[0].provider.name, "Marco");

    let hit = mock.only_hit();
    assert_eq!(hit.method, Method::GET);
    assert_eq!(hit.path, "/api/appointments");
    assert!(hit.has_param("when", "upcoming"));
    assert_eq!(hit.authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn anonymous_session_sends_no_authorization() {
    let mock = MockBackend::start(|_| Reply::ok(json!([]))).await;
    let client = mock.client_with(Arc::new(MemorySession::default()), Duration::from_secs(5));

    let list = client
        .list_appointments(&AppointmentQuery::status(AppointmentStatus::Denied))
        .await
        .unwrap();

    assert!(list.is_empty());
    let hit = mock.only_hit();
    assert!(hit.has_param("status", "denied"));
    assert_eq!(hit.authorization, None);
}

#[tokio::test]
async fn availability_sends_the_full_key_and_sorts_slots() {
    let mock = MockBackend::start(|_| {
        Reply::ok(json!({
            "date": "2025-11-03",
            "slots": [
                {"time": "14:00", "status": "available"},
                {"time": "09:30", "status": "booked"},
                {"time": "10:00"}
            ]
        }))
    })
    .await;

    let slots = mock.client().fetch_availability(&key()).await.unwrap();

    let times: Vec<String> = slots.iter().map(|slot| slot.time.to_string()).collect();
    assert_eq!(times, ["09:30", "10:00", "14:00"]);
    assert!(!slots[0].is_free());
    assert!(slots[1].is_free());

    let hit = mock.only_hit();
    assert_eq!(hit.path, "/api/appointments/availability");
    assert!(hit.has_param("salon_id", "s1"));
    assert!(hit.has_param("barber_id", "b1"));
    assert!(hit.has_param("service_id", "cut"));
    assert!(hit.has_param("date", "2025-11-03"));
}

#[tokio::test]
async fn taken_slot_is_a_conflict_with_server_text() {
    let mock = MockBackend::start(|_| {
        Reply::status(
            StatusCode::CONFLICT,
            json!({"message": "That time was just booked."}),
        )
    })
    .await;

    let request = RescheduleRequest {
        date: CalendarDate::from_ymd(2025, 11, 3).unwrap(),
        time: SlotTime::from_hm(10, 0).unwrap(),
    };
    let err = mock
        .client()
        .reschedule_appointment("A1", &request)
        .await
        .unwrap_err();

    assert_eq!(err, BookingError::Conflict("That time was just booked.".into()));
    let hit = mock.only_hit();
    assert_eq!(hit.method, Method::PATCH);
    assert_eq!(hit.path, "/api/appointments/A1/reschedule");
    assert_eq!(hit.body, json!({"date": "2025-11-03", "time": "10:00"}));
}

#[tokio::test]
async fn cancel_sends_reason_verbatim() {
    let mock = MockBackend::start(|hit| {
        Reply::ok(json!({
            "appointment": {"id": "A1", "status": "cancelled", "reason": hit.body["reason"]}
        }))
    })
    .await;

    let change = mock
        .client()
        .cancel_appointment("A1", "  Running late, sorry ")
        .await
        .unwrap();

    assert_eq!(change.status, Some(AppointmentStatus::Cancelled));
    assert_eq!(change.cancellation_reason.as_deref(), Some("  Running late, sorry "));
    let hit = mock.only_hit();
    assert_eq!(hit.path, "/api/appointments/A1/cancel");
    assert_eq!(hit.body, json!({"reason": "  Running late, sorry "}));
}

#[tokio::test]
async fn vendor_actions_share_one_endpoint() {
    let mock = MockBackend::start(|_| Reply::ok(json!({"id": "A2"}))).await;
    let client = mock.client();

    client.vendor_confirm("A2", "Confirmed by vendor").await.unwrap();
    client.vendor_deny("A2", "Fully booked").await.unwrap();

    let hits = mock.hits();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| hit.path == "/api/appointments/A2/action"));
    assert_eq!(
        hits[0].body,
        json!({"action": "confirm", "message": "Confirmed by vendor"})
    );
    assert_eq!(hits[1].body, json!({"action": "deny", "reason": "Fully booked"}));
}

#[tokio::test]
async fn server_errors_surface_as_rejections() {
    let mock = MockBackend::start(|_| {
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"}))
    })
    .await;

    let err = mock.client().fetch_salon("s1").await.unwrap_err();

    assert_eq!(
        err,
        BookingError::Rejected {
            status: 500,
            message: "boom".into()
        }
    );
    assert_eq!(mock.only_hit().path, "/api/salons/s1");
}

#[tokio::test]
async fn slow_backend_times_out_as_network_error() {
    let mock =
        MockBackend::start(|_| Reply::ok(json!({"slots": []})).after(Duration::from_secs(3))).await;
    let client = mock.client_with(
        Arc::new(MemorySession::with_token(common::TOKEN)),
        Duration::from_millis(200),
    );

    let err = client.fetch_availability(&key()).await.unwrap_err();

    assert!(matches!(err, BookingError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn editing_a_review_sends_its_id_then_uploads_photos() {
    let mock = MockBackend::start(|hit| {
        if hit.path.starts_with("/api/reviews/") {
            Reply::ok(json!({"images": [{"id": 1, "label": "after", "url": "https://img/1.jpg"}]}))
        } else {
            Reply::ok(json!({"review": {"id": 9, "rating": 4, "comment": "Sharp"}}))
        }
    })
    .await;
    let client = mock.client();

    let request = ReviewRequest {
        rating: 4,
        comment: "Sharp".into(),
        review_id: Some("9".into()),
    };
    let review = client.submit_review("A3", &request).await.unwrap();
    assert_eq!(review.id.as_deref(), Some("9"));

    let upload = ReviewImageUpload {
        label: ImageLabel::After,
        file_name: "after.jpg".into(),
        data_url: "data:image/jpeg;base64,AAAA".into(),
    };
    let images = client.upload_review_images("9", &[upload]).await.unwrap();
    assert_eq!(images.len(), 1);

    let hits = mock.hits();
    assert_eq!(hits[0].path, "/api/appointments/A3/review");
    assert_eq!(hits[0].body["review_id"], json!("9"));
    assert_eq!(hits[1].path, "/api/reviews/9/images");
    assert_eq!(hits[1].body["images"][0]["label"], json!("after"));
}
