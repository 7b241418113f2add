use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::review::{RatingSummary, Review};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Category {
    #[default]
    #[serde(rename = "Reusable Products")]
    #[strum(serialize = "Reusable Products")]
    ReusableProducts,
    #[serde(rename = "Organic Foods")]
    #[strum(serialize = "Organic Foods")]
    OrganicFoods,
    #[serde(rename = "Eco-Friendly Home")]
    #[strum(serialize = "Eco-Friendly Home")]
    EcoFriendlyHome,
    #[serde(rename = "Sustainable Fashion")]
    #[strum(serialize = "Sustainable Fashion")]
    SustainableFashion,
    #[serde(rename = "Zero Waste")]
    #[strum(serialize = "Zero Waste")]
    ZeroWaste,
    #[serde(rename = "Natural Beauty")]
    #[strum(serialize = "Natural Beauty")]
    NaturalBeauty,
    #[serde(rename = "Green Tech")]
    #[strum(serialize = "Green Tech")]
    GreenTech,
    Other,
}

/// A stored product image. `public_id` is the object-store path, when the image
/// was uploaded through us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub public_id: Option<String>,
}

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: Category,
    pub stock: u32,
    pub images: Vec<ProductImage>,
    pub tags: BTreeSet<String>,
    pub eco_score: u8,
    pub featured: bool,
    pub reviews: Vec<Review>,
    pub ratings: RatingSummary,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: impl Into<String>, payload: ProductCreate, created_at: DateTime<Utc>) -> Result<Self, String> {
        let product = Self {
            id: id.into(),
            name: payload.name.trim().to_string(),
            description: payload.description,
            price: payload.price,
            original_price: payload.original_price,
            category: payload.category,
            stock: payload.stock,
            images: payload.images,
            tags: payload.tags,
            eco_score: payload.eco_score,
            featured: payload.featured,
            reviews: Vec::new(),
            ratings: RatingSummary::default(),
            created_at,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Product name is required".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("Invalid price: {}", self.price));
        }
        if let Some(original) = self.original_price {
            if !original.is_finite() || original < 0.0 {
                return Err(format!("Invalid original price: {}", original));
            }
        }
        if self.eco_score > 100 {
            return Err(format!("Eco score must be between 0 and 100, got {}", self.eco_score));
        }
        Ok(())
    }

    pub fn apply_patch(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = original_price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(eco_score) = patch.eco_score {
            self.eco_score = eco_score;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        self.validate()
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.recalculate_rating();
    }

    /// Removes the review with the given id. Returns whether anything was removed;
    /// the rating is recomputed either way.
    pub fn remove_review(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|review| review.id != review_id);
        self.recalculate_rating();
        self.reviews.len() != before
    }

    pub fn recalculate_rating(&mut self) {
        self.ratings = RatingSummary::from_reviews(&self.reviews);
    }

    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.description.to_lowercase().contains(&needle)
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: Category,
    pub stock: u32,
    pub images: Vec<ProductImage>,
    pub tags: BTreeSet<String>,
    pub eco_score: u8,
    pub featured: bool,
}

/// Partial product update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<Option<f64>>,
    pub category: Option<Category>,
    pub stock: Option<u32>,
    pub images: Option<Vec<ProductImage>>,
    pub tags: Option<BTreeSet<String>>,
    pub eco_score: Option<u8>,
    pub featured: Option<bool>,
}
