use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{Display, EnumString};

use super::Address;

/// Fulfilment stage of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Payment capture stage of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// A purchased line. `price` is the unit price captured when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Represents a customer order.
///
/// Paid/delivered flags are derived from the status enums and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub shipping_address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a freshly placed order; the total is fixed from the item snapshots.
    pub fn place(id: impl Into<String>, draft: OrderDraft, created_at: DateTime<Utc>) -> Self {
        let total_price = draft.items.iter().map(OrderItem::subtotal).sum();
        Self {
            id: id.into(),
            user_id: draft.user_id,
            items: draft.items,
            total_price,
            order_status: OrderStatus::default(),
            payment_status: PaymentStatus::default(),
            paid_at: None,
            delivered_at: None,
            shipping_address: draft.shipping_address,
            created_at,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn is_delivered(&self) -> bool {
        self.order_status == OrderStatus::Delivered
    }

    /// Applies a status patch. Supplying `Paid` or `Delivered` (re)stamps the
    /// matching timestamp with `now`; omitted fields are left untouched.
    pub fn apply_status(&mut self, patch: OrderStatusPatch, now: DateTime<Utc>) {
        if let Some(status) = patch.order_status {
            self.order_status = status;
            if status == OrderStatus::Delivered {
                self.delivered_at = Some(now);
            }
        }
        if let Some(status) = patch.payment_status {
            self.payment_status = status;
            if status == PaymentStatus::Paid {
                self.paid_at = Some(now);
            }
        }
    }
}

/// Wire shape of an order, with the derived flags spelled out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderJson<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    user_id: &'a str,
    items: &'a [OrderItem],
    total_price: f64,
    order_status: OrderStatus,
    payment_status: PaymentStatus,
    is_paid: bool,
    paid_at: Option<DateTime<Utc>>,
    is_delivered: bool,
    delivered_at: Option<DateTime<Utc>>,
    shipping_address: Option<&'a Address>,
    created_at: DateTime<Utc>,
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OrderJson {
            id: &self.id,
            user_id: &self.user_id,
            items: &self.items,
            total_price: self.total_price,
            order_status: self.order_status,
            payment_status: self.payment_status,
            is_paid: self.is_paid(),
            paid_at: self.paid_at,
            is_delivered: self.is_delivered(),
            delivered_at: self.delivered_at,
            shipping_address: self.shipping_address.as_ref(),
            created_at: self.created_at,
        }
        .serialize(serializer)
    }
}

/// Requested line before the product price is snapshotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Checkout request as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub shipping_address: Option<Address>,
}

/// Validated order contents with price snapshots, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: Option<Address>,
}

/// Partial status update; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusPatch {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}
