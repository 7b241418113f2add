use chrono::Utc;

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch, Review};

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        Product::new(id, payload, Utc::now())
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        self.apply_patch(patch)
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// Only `AddReview` can fail, when the rating is outside 1..=5.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(amount) => {
                if self.stock >= amount {
                    self.stock -= amount;
                    Ok(ProductActionResult::Reserved { remaining: self.stock })
                } else {
                    Ok(ProductActionResult::Shortfall { available: self.stock })
                }
            }
            ProductAction::ReleaseStock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                Ok(ProductActionResult::Released { stock: self.stock })
            }
            ProductAction::AddReview(payload) => {
                let review = Review::new(payload, Utc::now())?;
                self.add_review(review.clone());
                Ok(ProductActionResult::ReviewAdded(review))
            }
            ProductAction::RemoveReview(review_id) => {
                let removed = self.remove_review(&review_id);
                Ok(ProductActionResult::ReviewRemoved {
                    removed,
                    ratings: self.ratings,
                })
            }
        }
    }
}
