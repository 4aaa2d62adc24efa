use shared_types::review::{MAX_COMMENT_CHARS, MAX_RATING};
use shared_types::{ImageLabel, Review, ReviewImageUpload, ReviewRequest};

use crate::api::BookingBackend;
use crate::error::BookingError;

pub const MISSING_RATING: &str = "Please select a star rating.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStage {
    Editing,
    Submitting,
    Saved,
}

/// Result of saving a review and then attaching its photos.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub review: Review,
    /// Set when the review saved but the photos did not.
    pub image_error: Option<BookingError>,
}

/// Saves the review first; photos can only be attached once it has an id.
pub async fn submit_review_with_images<B>(
    backend: &B,
    appointment_id: &str,
    request: &ReviewRequest,
    images: Vec<ReviewImageUpload>,
) -> Result<ReviewOutcome, BookingError>
where
    B: BookingBackend + ?Sized,
{
    let mut review = backend.submit_review(appointment_id, request).await?;
    if images.is_empty() {
        return Ok(ReviewOutcome {
            review,
            image_error: None,
        });
    }

    let Some(review_id) = review.id.clone() else {
        return Ok(ReviewOutcome {
            review,
            image_error: Some(photos_failed("the server did not return a review id")),
        });
    };

    match backend.upload_review_images(&review_id, &images).await {
        Ok(uploaded) => {
            review.images.extend(uploaded);
            Ok(ReviewOutcome {
                review,
                image_error: None,
            })
        }
        Err(err) => {
            tracing::warn!(%review_id, %err, "review saved without its photos");
            Ok(ReviewOutcome {
                review,
                image_error: Some(photos_failed(&err.to_string())),
            })
        }
    }
}

fn photos_failed(detail: &str) -> BookingError {
    BookingError::PartialFailure {
        completed: "Your review was saved".to_string(),
        failed: format!("the photos could not be uploaded ({detail})"),
    }
}

/// Post-visit review form for one completed appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    appointment_id: String,
    saved: Option<Review>,
    stage: ReviewStage,
    rating: u8,
    comment: String,
    images: Vec<ReviewImageUpload>,
    uploading_images: bool,
    error: Option<BookingError>,
}

impl ReviewForm {
    /// An existing review opens read-only; call [`ReviewForm::edit`] to change it.
    pub fn open(appointment_id: impl Into<String>, existing: Option<Review>) -> Self {
        let mut form = Self {
            appointment_id: appointment_id.into(),
            saved: None,
            stage: ReviewStage::Editing,
            rating: 0,
            comment: String::new(),
            images: Vec::new(),
            uploading_images: false,
            error: None,
        };
        if let Some(review) = existing {
            form.prefill(&review);
            form.saved = Some(review);
            form.stage = ReviewStage::Saved;
        }
        form
    }

    fn prefill(&mut self, review: &Review) {
        self.rating = review.rating.min(MAX_RATING);
        self.comment = review.comment.chars().take(MAX_COMMENT_CHARS).collect();
    }

    pub fn appointment_id(&self) -> &str {
        &self.appointment_id
    }

    pub fn stage(&self) -> ReviewStage {
        self.stage
    }

    pub fn saved(&self) -> Option<&Review> {
        self.saved.as_ref()
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn images(&self) -> &[ReviewImageUpload] {
        &self.images
    }

    pub fn error(&self) -> Option<&BookingError> {
        self.error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.stage == ReviewStage::Submitting || self.uploading_images
    }

    pub fn edit(&mut self) {
        if self.uploading_images {
            return;
        }
        if let Some(review) = self.saved.clone() {
            self.prefill(&review);
        }
        self.stage = ReviewStage::Editing;
        self.error = None;
    }

    pub fn set_rating(&mut self, rating: u8) {
        if (1..=MAX_RATING).contains(&rating) {
            self.rating = rating;
            if matches!(&self.error, Some(BookingError::Validation(_))) {
                self.error = None;
            }
        }
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.chars().take(MAX_COMMENT_CHARS).collect();
    }

    /// One image per label; a new pick replaces the old one.
    pub fn attach_image(&mut self, upload: ReviewImageUpload) {
        self.images.retain(|image| image.label != upload.label);
        self.images.push(upload);
    }

    pub fn remove_image(&mut self, label: ImageLabel) {
        self.images.retain(|image| image.label != label);
    }

    pub fn image(&self, label: ImageLabel) -> Option<&ReviewImageUpload> {
        self.images.iter().find(|image| image.label == label)
    }

    pub fn draft(&self) -> Result<ReviewRequest, BookingError> {
        if self.rating == 0 {
            return Err(BookingError::validation(MISSING_RATING));
        }
        Ok(ReviewRequest {
            rating: self.rating,
            comment: self.comment.trim().to_string(),
            review_id: self.saved.as_ref().and_then(|review| review.id.clone()),
        })
    }

    /// A missing rating is reported here and nothing is sent.
    pub fn begin_submit(&mut self) -> Option<(ReviewRequest, Vec<ReviewImageUpload>)> {
        if self.stage != ReviewStage::Editing {
            return None;
        }
        match self.draft() {
            Ok(request) => {
                self.stage = ReviewStage::Submitting;
                self.error = None;
                Some((request, self.images.clone()))
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    /// Returns the saved review when the server accepted it, even if its
    /// photos were rejected.
    pub fn finish(&mut self, result: Result<ReviewOutcome, BookingError>) -> Option<Review> {
        match result {
            Ok(outcome) => {
                if outcome.image_error.is_none() {
                    self.images.clear();
                }
                self.error = outcome.image_error;
                self.saved = Some(outcome.review.clone());
                self.stage = ReviewStage::Saved;
                Some(outcome.review)
            }
            Err(err) => {
                self.stage = ReviewStage::Editing;
                self.error = Some(err);
                None
            }
        }
    }

    /// Photos left over from a partial failure, ready for another upload.
    pub fn retry_images(&mut self) -> Option<(String, Vec<ReviewImageUpload>)> {
        if self.stage != ReviewStage::Saved || self.uploading_images || self.images.is_empty() {
            return None;
        }
        let review_id = self.saved.as_ref()?.id.clone()?;
        self.uploading_images = true;
        self.error = None;
        Some((review_id, self.images.clone()))
    }

    pub fn finish_images(
        &mut self,
        result: Result<Vec<shared_types::ReviewImage>, BookingError>,
    ) -> Option<Review> {
        self.uploading_images = false;
        match result {
            Ok(uploaded) => {
                self.images.clear();
                let review = self.saved.as_mut()?;
                review.images.extend(uploaded);
                Some(review.clone())
            }
            Err(err) => {
                self.error = Some(photos_failed(&err.to_string()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(label: ImageLabel, name: &str) -> ReviewImageUpload {
        ReviewImageUpload {
            label,
            file_name: name.into(),
            data_url: "data:image/png;base64,AAAA".into(),
        }
    }

    #[test]
    fn missing_rating_is_caught_before_sending() {
        let mut form = ReviewForm::open("A1", None);
        form.set_comment("Nice");
        assert_eq!(form.begin_submit(), None);
        assert_eq!(
            form.error(),
            Some(&BookingError::Validation(MISSING_RATING.into()))
        );
        assert_eq!(form.stage(), ReviewStage::Editing);

        form.set_rating(4);
        assert_eq!(form.error(), None);
        let (request, images) = form.begin_submit().unwrap();
        assert_eq!(request.rating, 4);
        assert_eq!(request.review_id, None);
        assert!(images.is_empty());
    }

    #[test]
    fn out_of_range_ratings_are_ignored() {
        let mut form = ReviewForm::open("A1", None);
        form.set_rating(6);
        assert_eq!(form.rating(), 0);
        form.set_rating(5);
        form.set_rating(0);
        assert_eq!(form.rating(), 5);
    }

    #[test]
    fn comment_is_capped() {
        let mut form = ReviewForm::open("A1", None);
        form.set_comment(&"x".repeat(MAX_COMMENT_CHARS + 50));
        assert_eq!(form.comment().chars().count(), MAX_COMMENT_CHARS);
    }

    #[test]
    fn editing_an_existing_review_sends_its_id() {
        let existing = Review {
            id: Some("r1".into()),
            rating: 3,
            comment: "Okay".into(),
            images: vec![],
        };
        let mut form = ReviewForm::open("A1", Some(existing));
        assert_eq!(form.stage(), ReviewStage::Saved);
        assert_eq!(form.begin_submit(), None);

        form.edit();
        assert_eq!(form.rating(), 3);
        assert_eq!(form.comment(), "Okay");
        form.set_rating(5);
        let (request, _) = form.begin_submit().unwrap();
        assert_eq!(request.review_id.as_deref(), Some("r1"));
    }

    #[test]
    fn one_image_per_label() {
        let mut form = ReviewForm::open("A1", None);
        form.attach_image(upload(ImageLabel::Before, "a.png"));
        form.attach_image(upload(ImageLabel::Before, "b.png"));
        form.attach_image(upload(ImageLabel::After, "c.png"));
        assert_eq!(form.images().len(), 2);
        assert_eq!(
            form.image(ImageLabel::Before).map(|i| i.file_name.as_str()),
            Some("b.png")
        );
        form.remove_image(ImageLabel::Before);
        assert!(form.image(ImageLabel::Before).is_none());
    }

    #[test]
    fn partial_failure_keeps_photos_for_retry() {
        let mut form = ReviewForm::open("A1", None);
        form.set_rating(5);
        form.attach_image(upload(ImageLabel::After, "c.png"));
        form.begin_submit().unwrap();

        let review = Review {
            id: Some("r9".into()),
            rating: 5,
            comment: String::new(),
            images: vec![],
        };
        let saved = form.finish(Ok(ReviewOutcome {
            review: review.clone(),
            image_error: Some(photos_failed("offline")),
        }));
        assert_eq!(saved, Some(review));
        assert_eq!(form.stage(), ReviewStage::Saved);
        assert!(matches!(form.error(), Some(BookingError::PartialFailure { .. })));

        let (review_id, images) = form.retry_images().unwrap();
        assert_eq!(review_id, "r9");
        assert_eq!(images.len(), 1);
        assert!(form.is_busy());
        assert_eq!(form.retry_images(), None);

        let uploaded = shared_types::ReviewImage {
            id: None,
            label: ImageLabel::After,
            url: "https://img/after.jpg".into(),
        };
        let review = form.finish_images(Ok(vec![uploaded])).unwrap();
        assert_eq!(review.images.len(), 1);
        assert!(form.images().is_empty());
        assert!(!form.is_busy());
    }
}
