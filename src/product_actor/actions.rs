use crate::domain::{RatingSummary, Review, ReviewCreate};

/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Reserves a specified amount of stock.
    ///
    /// Answers with [`ProductActionResult::Shortfall`] instead of failing when
    /// there is not enough stock, so callers can report the available amount.
    ReserveStock(u32),
    /// Returns previously reserved stock.
    ReleaseStock(u32),
    /// Embeds a new review and recomputes the rating.
    AddReview(ReviewCreate),
    /// Removes a review by id and recomputes the rating. Unknown ids are a no-op.
    RemoveReview(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reserved { remaining: u32 },
    Shortfall { available: u32 },
    Released { stock: u32 },
    ReviewAdded(Review),
    ReviewRemoved { removed: bool, ratings: RatingSummary },
}
