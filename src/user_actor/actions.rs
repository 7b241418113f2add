use std::collections::BTreeSet;

/// Custom actions for User entities.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Adds a product id to the wishlist.
    AddToWishlist(String),
    /// Removes a product id from the wishlist. Absent ids are ignored.
    RemoveFromWishlist(String),
}

/// Results from UserActions. Both wishlist actions answer with the resulting wishlist.
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    Wishlist(BTreeSet<String>),
}
