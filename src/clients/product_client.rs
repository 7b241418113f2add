use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch, RatingSummary, Review, ReviewCreate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl ProductClient {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(product).await?)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock, returning what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::Reserved { remaining } => Ok(remaining),
            ProductActionResult::Shortfall { available } => {
                warn!(available, requested = quantity, "Insufficient stock");
                Err(ProductError::InsufficientStock {
                    requested: quantity,
                    available,
                })
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReleaseStock(quantity)).await? {
            ProductActionResult::Released { stock } => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, review), fields(rating = review.rating))]
    pub async fn add_review(&self, id: String, review: ReviewCreate) -> Result<Review, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::AddReview(review)).await? {
            ProductActionResult::ReviewAdded(review) => {
                info!(review_id = %review.id, "Review added");
                Ok(review)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Removes a review; answers whether it existed and the recomputed rating.
    #[instrument(skip(self))]
    pub async fn remove_review(&self, id: String, review_id: String) -> Result<(bool, RatingSummary), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::RemoveReview(review_id)).await? {
            ProductActionResult::ReviewRemoved { removed, ratings } => Ok((removed, ratings)),
            other => Err(unexpected(other)),
        }
    }
}
