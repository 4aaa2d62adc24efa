use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::review::{MAX_COMMENT_CHARS, MAX_RATING};
use shared_types::{ImageLabel, Review};
use thaw::*;

use crate::api::BookingBackend;
use crate::app::use_booking_client;
use crate::booking::{submit_review_with_images, ReviewForm, ReviewStage};
use crate::components::error::ErrorView;

fn stars(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|n| if n <= rating { '★' } else { '☆' })
        .collect()
}

/// Reads the picked file into a data URL and attaches it to the form.
fn attach_picked_file(form: RwSignal<ReviewForm>, label: ImageLabel, ev: leptos::ev::Event) {
    #[cfg(target_arch = "wasm32")]
    {
        use shared_types::ReviewImageUpload;
        use wasm_bindgen::JsCast;

        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let file = gloo::file::File::from(file);
        spawn_local(async move {
            match gloo::file::futures::read_as_data_url(&file).await {
                Ok(data_url) => {
                    let upload = ReviewImageUpload {
                        label,
                        file_name: file.name(),
                        data_url,
                    };
                    let _ = form.try_update(|f| f.attach_image(upload));
                }
                Err(err) => leptos::logging::warn!("Could not read {}: {:?}", file.name(), err),
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (form, label, ev);
    }
}

/// Star rating, comment and before/after photos for a completed visit.
#[component]
pub fn ReviewPanel(
    appointment_id: String,
    existing: Option<Review>,
    on_saved: impl Fn(String, Review) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let client = use_booking_client();
    let form = RwSignal::new(ReviewForm::open(appointment_id, existing));

    let is_submitting = Signal::derive(move || form.with(|f| f.is_busy()));

    let on_submit = move |_| {
        let Some((request, images)) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };
        let appointment_id = form.with_untracked(|f| f.appointment_id().to_string());
        let client = client.get_value();
        spawn_local(async move {
            let result = submit_review_with_images(&client, &appointment_id, &request, images).await;
            if let Some(Some(review)) = form.try_update(|f| f.finish(result)) {
                on_saved(appointment_id, review);
            }
        });
    };

    let on_retry_images = move |_| {
        let Some((review_id, images)) = form.try_update(|f| f.retry_images()).flatten() else {
            return;
        };
        let appointment_id = form.with_untracked(|f| f.appointment_id().to_string());
        let client = client.get_value();
        spawn_local(async move {
            let result = client.upload_review_images(&review_id, &images).await;
            if let Some(Some(review)) = form.try_update(|f| f.finish_images(result)) {
                on_saved(appointment_id, review);
            }
        });
    };

    let saved_view = move || {
        let review = form.with(|f| f.saved().cloned())?;
        let retry = form.with(|f| !f.images().is_empty());
        Some(view! {
            <div class="review-saved">
                <span class="review-stars" aria-label=format!("{} out of {}", review.rating, MAX_RATING)>
                    {stars(review.rating)}
                </span>
                {(!review.comment.is_empty()).then(|| view! { <p class="review-comment">{review.comment.clone()}</p> })}
                <div class="review-images">
                    {review
                        .images
                        .iter()
                        .map(|image| view! {
                            <figure>
                                <img src=image.url.clone() alt=image.label.title() />
                                <figcaption>{image.label.title()}</figcaption>
                            </figure>
                        })
                        .collect::<Vec<_>>()}
                </div>
                <div class="form-actions">
                    {retry.then(|| view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=on_retry_images loading=is_submitting>
                            "Retry photo upload"
                        </Button>
                    })}
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=is_submitting
                        on_click=move |_| form.update(|f| f.edit())
                    >
                        "Edit review"
                    </Button>
                </div>
            </div>
        })
    };

    let editor_view = move || {
        let rating = form.with(|f| f.rating());
        view! {
            <div class="review-editor">
                <div class="review-star-picker" role="radiogroup">
                    {(1..=MAX_RATING)
                        .map(|n| view! {
                            <button
                                type="button"
                                class="review-star"
                                class:filled={n <= rating}
                                aria-label=format!("{n} star")
                                disabled=move || is_submitting.get()
                                on:click=move |_| form.update(|f| f.set_rating(n))
                            >
                                {if n <= rating { "★" } else { "☆" }}
                            </button>
                        })
                        .collect::<Vec<_>>()}
                </div>

                <textarea
                    class="review-comment-input"
                    rows="4"
                    maxlength={MAX_COMMENT_CHARS.to_string()}
                    placeholder="How was your visit?"
                    prop:value=move || form.with(|f| f.comment().to_string())
                    on:input=move |ev| form.update(|f| f.set_comment(&event_target_value(&ev)))
                ></textarea>
                <p class="review-comment-count">
                    {move || format!("{}/{}", form.with(|f| f.comment().chars().count()), MAX_COMMENT_CHARS)}
                </p>

                <div class="review-photo-inputs">
                    {[ImageLabel::Before, ImageLabel::After]
                        .into_iter()
                        .map(|label| view! {
                            <label class="review-photo-input">
                                <span>{format!("{} photo", label.title())}</span>
                                <input
                                    type="file"
                                    accept="image/*"
                                    on:change=move |ev| attach_picked_file(form, label, ev)
                                />
                                {move || form.with(|f| f.image(label).map(|image| image.file_name.clone())).map(|name| view! {
                                    <span class="review-photo-name">
                                        {name}
                                        <button type="button" on:click=move |_| form.update(|f| f.remove_image(label))>
                                            "Remove"
                                        </button>
                                    </span>
                                })}
                            </label>
                        })
                        .collect::<Vec<_>>()}
                </div>

                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        loading=is_submitting
                        disabled=is_submitting
                        on_click=on_submit
                    >
                        {move || if is_submitting.get() { "Saving..." } else { "Submit review" }}
                    </Button>
                </div>
            </div>
        }
    };

    view! {
        <section class="review-panel">
            <h4>"Your review"</h4>
            {move || match form.with(|f| f.stage()) {
                ReviewStage::Saved => saved_view().into_any(),
                ReviewStage::Editing | ReviewStage::Submitting => editor_view().into_any(),
            }}
            {move || form.with(|f| f.error().cloned()).map(|error| view! { <ErrorView error=error /> })}
        </section>
    }
}
