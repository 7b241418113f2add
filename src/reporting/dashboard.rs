use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::domain::{Order, OrderStatus, PaymentStatus, Product, User, UserContact};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: usize,
    pub total_users: usize,
    pub total_revenue: f64,
    pub pending_orders: usize,
    pub delivered_orders: usize,
    pub recent_orders: Vec<OrderWithUser>,
    pub low_stock_products: Vec<Product>,
    pub sales_data: Vec<DailySales>,
}

/// An order together with whoever placed it, if that user still exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderWithUser {
    #[serde(flatten)]
    pub order: Order,
    pub user: Option<UserContact>,
}

/// Paid sales bucketed by UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySales {
    #[serde(rename = "_id")]
    pub day: NaiveDate,
    pub sales: f64,
    pub orders: u64,
}

/// Sum of `total_price` over paid orders.
pub fn total_revenue(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|order| order.payment_status == PaymentStatus::Paid)
        .map(|order| order.total_price)
        .sum()
}

/// Orders sorted newest first, each resolved against the user snapshot.
pub fn resolve_owners(mut orders: Vec<Order>, users: &[User]) -> Vec<OrderWithUser> {
    let by_id: HashMap<&str, &User> = users.iter().map(|user| (user.id.as_str(), user)).collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    orders
        .into_iter()
        .map(|order| {
            let user = by_id.get(order.user_id.as_str()).map(|user| user.contact());
            OrderWithUser { order, user }
        })
        .collect()
}

pub fn low_stock(products: &[Product], threshold: u32, limit: usize) -> Vec<Product> {
    let mut low: Vec<Product> = products.iter().filter(|p| p.stock < threshold).cloned().collect();
    low.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.id.cmp(&b.id)));
    low.truncate(limit);
    low
}

/// Paid orders created within `window_days` before `now`, grouped by day, oldest day first.
/// Days without sales are omitted.
pub fn daily_sales(orders: &[Order], now: DateTime<Utc>, window_days: i64) -> Vec<DailySales> {
    let since = now - Duration::days(window_days);
    let mut buckets: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|order| order.payment_status == PaymentStatus::Paid && order.created_at >= since)
    {
        let bucket = buckets.entry(order.created_at.date_naive()).or_default();
        bucket.0 += order.total_price;
        bucket.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(day, (sales, orders))| DailySales { day, sales, orders })
        .collect()
}

/// Builds the admin dashboard from independent snapshots of the three collections.
pub fn compute_dashboard_stats(
    users: &[User],
    products: &[Product],
    orders: Vec<Order>,
    now: DateTime<Utc>,
    settings: &DashboardConfig,
) -> DashboardStats {
    let count_status = |status: OrderStatus| orders.iter().filter(|o| o.order_status == status).count();

    let total_revenue = total_revenue(&orders);
    let pending_orders = count_status(OrderStatus::Processing);
    let delivered_orders = count_status(OrderStatus::Delivered);
    let sales_data = daily_sales(&orders, now, settings.sales_window_days);
    let total_orders = orders.len();

    let mut recent_orders = resolve_owners(orders, users);
    recent_orders.truncate(settings.recent_orders);

    DashboardStats {
        total_products: products.len(),
        total_orders,
        total_users: users.len(),
        total_revenue,
        pending_orders,
        delivered_orders,
        recent_orders,
        low_stock_products: low_stock(products, settings.low_stock_threshold, settings.low_stock_limit),
        sales_data,
    }
}
