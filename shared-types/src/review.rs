use serde::{Deserialize, Serialize};

use crate::ids;

pub const MAX_RATING: u8 = 5;
pub const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        deserialize_with = "ids::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(alias = "stars")]
    pub rating: u8,
    #[serde(default, alias = "text")]
    pub comment: String,
    #[serde(default)]
    pub images: Vec<ReviewImage>,
}

impl Review {
    pub fn images_labeled(&self, label: ImageLabel) -> impl Iterator<Item = &ReviewImage> {
        self.images.iter().filter(move |image| image.label == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageLabel {
    Before,
    After,
}

impl ImageLabel {
    pub fn title(self) -> &'static str {
        match self {
            ImageLabel::Before => "Before",
            ImageLabel::After => "After",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewImage {
    #[serde(
        default,
        deserialize_with = "ids::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub label: ImageLabel,
    pub url: String,
}

/// An image picked in the browser, inlined as a data URL until the review
/// exists server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewImageUpload {
    pub label: ImageLabel,
    pub file_name: String,
    pub data_url: String,
}
