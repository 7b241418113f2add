use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pagination::{paginate, PageInfo, PageParams};
use crate::domain::Product;

/// One review lifted out of its product, annotated with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewEntry>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// Flattens every product's reviews into one feed, newest first across all products.
///
/// Equal timestamps fall back to product id, then review id, so the order only
/// depends on the data and not on the order products were listed in.
pub fn flatten_reviews(products: &[Product]) -> Vec<ReviewEntry> {
    let mut entries: Vec<ReviewEntry> = products
        .iter()
        .filter(|product| !product.reviews.is_empty())
        .flat_map(|product| {
            product.reviews.iter().map(move |review| ReviewEntry {
                id: review.id.clone(),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                user_id: review.user_id.clone(),
                user_name: review.user_name.clone(),
                rating: review.rating,
                comment: review.comment.clone(),
                created_at: review.created_at,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.product_id.cmp(&b.product_id))
            .then_with(|| a.id.cmp(&b.id))
    });
    entries
}

pub fn review_feed(products: &[Product], params: PageParams) -> ReviewPage {
    let (reviews, page) = paginate(flatten_reviews(products), params);
    ReviewPage { reviews, page }
}
