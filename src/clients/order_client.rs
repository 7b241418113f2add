use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::{ProductClient, UserClient};
use crate::domain::{Order, OrderDraft, OrderItem, OrderRequest, OrderStatusPatch};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;

/// Client for interacting with the Order actor.
///
/// This client handles complex orchestration, validating users and products
/// before creating an order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, user_client: UserClient, product_client: ProductClient) -> Self {
        Self {
            inner,
            user_client,
            product_client,
        }
    }

    /// Places an order.
    ///
    /// 1. **Validate user** via the user actor
    /// 2. **Validate products** and snapshot their current name and price
    /// 3. **Reserve stock** line by line, releasing earlier reservations if one fails
    /// 4. **Create order** in the order actor
    #[instrument(skip(self, request), fields(user_id = %request.user_id, lines = request.lines.len()))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        info!("Processing create_order request");

        if request.lines.is_empty() {
            return Err(OrderError::ValidationError("Order must contain at least one item".to_string()));
        }

        // Step 1: Validate user
        match self.user_client.get_user(request.user_id.clone()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(request.user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {}", e)));
            }
        }

        // Step 2: Validate products and snapshot prices
        let mut items = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            if line.quantity == 0 {
                return Err(OrderError::ValidationError(format!(
                    "Invalid quantity 0 for product {}",
                    line.product_id
                )));
            }
            match self.product_client.get_product(line.product_id.clone()).await {
                Ok(Some(product)) => {
                    info!(product_name = %product.name, price = %product.price, "Product validation successful");
                    items.push(OrderItem {
                        product_id: product.id,
                        name: product.name,
                        quantity: line.quantity,
                        price: product.price,
                    });
                }
                Ok(None) => {
                    error!(product_id = %line.product_id, "Product not found");
                    return Err(OrderError::InvalidProduct(line.product_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Product validation failed");
                    return Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)));
                }
            }
        }

        // Step 3: Reserve stock
        let mut reserved: Vec<&OrderItem> = Vec::with_capacity(items.len());
        for item in &items {
            if let Err(e) = self.product_client.reserve_stock(item.product_id.clone(), item.quantity).await {
                error!(error = %e, product_id = %item.product_id, "Stock reservation failed");
                self.release(&reserved).await;
                return Err(match e {
                    ProductError::InsufficientStock { .. } => OrderError::InsufficientStock(e.to_string()),
                    other => OrderError::InvalidProduct(other.to_string()),
                });
            }
            reserved.push(item);
        }

        info!("Stock reserved successfully");

        // Step 4: Create order
        let draft = OrderDraft {
            user_id: request.user_id,
            items: items.clone(),
            shipping_address: request.shipping_address,
        };
        match self.inner.create(draft).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total_price, "Order created successfully");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed");
                let all: Vec<&OrderItem> = items.iter().collect();
                self.release(&all).await;
                Err(e.into())
            }
        }
    }

    // Compensation: best effort, failures are logged.
    async fn release(&self, items: &[&OrderItem]) {
        for item in items {
            if let Err(e) = self.product_client.release_stock(item.product_id.clone(), item.quantity).await {
                warn!(error = %e, product_id = %item.product_id, "Failed to release reserved stock");
            }
        }
    }

    /// Applies a partial status update as one write. NotFound leaves nothing mutated.
    #[instrument(skip(self, patch), fields(order_status = ?patch.order_status, payment_status = ?patch.payment_status))]
    pub async fn update_order_status(&self, id: String, patch: OrderStatusPatch) -> Result<Order, OrderError> {
        info!("Processing update_order_status request");
        let order = self.inner.update(id, patch).await?;
        info!(
            order_status = %order.order_status,
            payment_status = %order.payment_status,
            "Order status updated"
        );
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list_orders()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderLine, OrderStatus, PaymentStatus, Product, ProductCreate, User};
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get, expect_update};
    use crate::product_actor::{ProductAction, ProductActionResult};
    use chrono::Utc;

    fn clients() -> (
        OrderClient,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<User>>,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Product>>,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Order>>,
    ) {
        let (user_inner, user_rx) = create_mock_client::<User>(10);
        let (product_inner, product_rx) = create_mock_client::<Product>(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);
        let client = OrderClient::new(order_inner, UserClient::new(user_inner), ProductClient::new(product_inner));
        (client, user_rx, product_rx, order_rx)
    }

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            role: Default::default(),
            phone: String::new(),
            address: None,
            wishlist: Default::default(),
            created_at: Utc::now(),
        }
    }

    fn product(id: &str, price: f64) -> Product {
        let payload = ProductCreate { name: format!("Item {}", id), price, stock: 100, ..Default::default() };
        Product::new(id, payload, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_order_creation_flow() {
        let (order_client, mut user_rx, mut product_rx, mut order_rx) = clients();

        let order_task = tokio::spawn(async move {
            let request = OrderRequest {
                user_id: "user_1".into(),
                lines: vec![OrderLine { product_id: "product_1".into(), quantity: 5 }],
                shipping_address: None,
            };
            order_client.create_order(request).await
        });

        // Expect User Get
        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "user_1");
        responder.send(Ok(Some(user("user_1")))).unwrap();

        // Expect Product Get
        let (product_id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        assert_eq!(product_id, "product_1");
        responder.send(Ok(Some(product("product_1", 20.0)))).unwrap();

        // Expect Stock Reservation (Action)
        let (product_id, action, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
        assert_eq!(product_id, "product_1");
        match action {
            ProductAction::ReserveStock(qty) => assert_eq!(qty, 5),
            _ => panic!("Unexpected action: {:?}", action),
        }
        responder.send(Ok(ProductActionResult::Reserved { remaining: 95 })).unwrap();

        // Expect Order Create carrying the price snapshot
        let (draft, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(draft.user_id, "user_1");
        assert_eq!(draft.items[0].price, 20.0);
        assert_eq!(draft.items[0].quantity, 5);
        let stored = Order::place("order_1", draft, Utc::now());
        responder.send(Ok(stored.clone())).unwrap();

        let result = order_task.await.unwrap().unwrap();
        assert_eq!(result.id, "order_1");
        assert_eq!(result.total_price, 100.0);
    }

    #[tokio::test]
    async fn test_failed_reservation_releases_earlier_lines() {
        let (order_client, mut user_rx, mut product_rx, _order_rx) = clients();

        let order_task = tokio::spawn(async move {
            let request = OrderRequest {
                user_id: "user_1".into(),
                lines: vec![
                    OrderLine { product_id: "product_1".into(), quantity: 2 },
                    OrderLine { product_id: "product_2".into(), quantity: 9 },
                ],
                shipping_address: None,
            };
            order_client.create_order(request).await
        });

        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        responder.send(Ok(Some(user("user_1")))).unwrap();
        for id in ["product_1", "product_2"] {
            let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
            responder.send(Ok(Some(product(id, 1.0)))).unwrap();
        }

        let (_, _, responder) = expect_action(&mut product_rx).await.expect("Expected first reservation");
        responder.send(Ok(ProductActionResult::Reserved { remaining: 98 })).unwrap();
        let (_, _, responder) = expect_action(&mut product_rx).await.expect("Expected second reservation");
        responder.send(Ok(ProductActionResult::Shortfall { available: 3 })).unwrap();

        let (id, action, responder) = expect_action(&mut product_rx).await.expect("Expected release");
        assert_eq!(id, "product_1");
        assert!(matches!(action, ProductAction::ReleaseStock(2)));
        responder.send(Ok(ProductActionResult::Released { stock: 100 })).unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::InsufficientStock(_))));
    }

    #[tokio::test]
    async fn test_unknown_user_rejects_order() {
        let (order_client, mut user_rx, _product_rx, _order_rx) = clients();
        let order_task = tokio::spawn(async move {
            let request = OrderRequest {
                user_id: "ghost".into(),
                lines: vec![OrderLine { product_id: "product_1".into(), quantity: 1 }],
                shipping_address: None,
            };
            order_client.create_order(request).await
        });

        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(order_task.await.unwrap(), Err(OrderError::InvalidUser("ghost".into())));
    }

    #[tokio::test]
    async fn test_status_update_sends_single_patch() {
        let (order_client, _user_rx, _product_rx, mut order_rx) = clients();
        let task = tokio::spawn(async move {
            let patch = OrderStatusPatch {
                order_status: Some(OrderStatus::Shipped),
                payment_status: Some(PaymentStatus::Paid),
            };
            order_client.update_order_status("order_7".into(), patch).await
        });

        let (id, patch, responder) = expect_update(&mut order_rx).await.expect("Expected Order Update");
        assert_eq!(id, "order_7");
        assert_eq!(patch.order_status, Some(OrderStatus::Shipped));
        assert_eq!(patch.payment_status, Some(PaymentStatus::Paid));
        responder
            .send(Err(crate::actor_framework::FrameworkError::NotFound("order_7".into())))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(OrderError::NotFound("order_7".into())));
    }
}
