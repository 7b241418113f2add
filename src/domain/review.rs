use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer review embedded in its product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(payload: ReviewCreate, created_at: DateTime<Utc>) -> Result<Self, String> {
        if !(1..=5).contains(&payload.rating) {
            return Err(format!("Rating must be between 1 and 5, got {}", payload.rating));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: payload.user_id,
            user_name: payload.user_name,
            rating: payload.rating,
            comment: payload.comment,
            created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

/// Aggregate of a product's review ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    /// Arithmetic mean of the ratings, or zero for an empty list.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let count = reviews.len() as u32;
        Self {
            average: f64::from(sum) / f64::from(count),
            count,
        }
    }
}
