use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderDraft, OrderStatusPatch};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderDraft;
    type Patch = OrderStatusPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from validated, price-snapshotted contents.
    ///
    /// The order starts as Processing / Pending and its total is fixed here.
    fn from_create(id: String, draft: OrderDraft) -> Result<Self, String> {
        if draft.items.is_empty() {
            return Err("Order must contain at least one item".to_string());
        }
        if let Some(item) = draft.items.iter().find(|item| item.quantity == 0) {
            return Err(format!("Invalid quantity 0 for product {}", item.product_id));
        }
        Ok(Order::place(id, draft, Utc::now()))
    }

    /// Status update: a single write applied inside the actor, last write wins.
    fn on_update(&mut self, patch: OrderStatusPatch) -> Result<(), String> {
        self.apply_status(patch, Utc::now());
        Ok(())
    }

    /// Handles order-specific actions.
    ///
    /// Currently, no custom actions are defined for orders.
    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
