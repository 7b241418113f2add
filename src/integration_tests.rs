#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use crate::app_system::StoreSystem;
    use crate::config::AppConfig;
    use crate::domain::{
        Category, Order, OrderLine, OrderRequest, OrderStatus, OrderStatusPatch, PaymentStatus, Product, ProductCreate,
        User, UserCreate,
    };
    use crate::error::AdminError;
    use crate::order_actor::OrderError;
    use crate::reporting::PageRequest;
    use crate::user_actor::UserError;

    async fn customer(system: &StoreSystem, email: &str) -> User {
        system
            .user_client
            .create_user(UserCreate {
                name: "Alice".into(),
                email: email.into(),
                password: "hunter22".into(),
                phone: String::new(),
                address: None,
            })
            .await
            .unwrap()
    }

    async fn product(system: &StoreSystem, name: &str, price: f64, stock: u32) -> Product {
        system
            .admin_client
            .create_product(ProductCreate {
                name: name.into(),
                price,
                stock,
                category: Category::ZeroWaste,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    async fn place(system: &StoreSystem, user: &User, product: &Product, quantity: u32) -> Order {
        system
            .order_client
            .create_order(OrderRequest {
                user_id: user.id.clone(),
                lines: vec![OrderLine {
                    product_id: product.id.clone(),
                    quantity,
                }],
                shipping_address: None,
            })
            .await
            .unwrap()
    }

    fn status(order_status: Option<OrderStatus>, payment_status: Option<PaymentStatus>) -> OrderStatusPatch {
        OrderStatusPatch {
            order_status,
            payment_status,
        }
    }

    #[tokio::test]
    async fn test_paid_and_delivered_are_stamped() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;
        let jar = product(&system, "Jar", 5.0, 10).await;
        let order = place(&system, &alice, &jar, 2).await;
        assert!(!order.is_paid());
        assert!(order.paid_at.is_none());

        let before = Utc::now();
        let paid = system
            .admin_client
            .update_order_status(order.id.clone(), status(None, Some(PaymentStatus::Paid)))
            .await
            .unwrap();
        assert!(paid.is_paid());
        assert!(paid.paid_at.unwrap() >= before);
        assert_eq!(paid.order_status, OrderStatus::Processing);
        assert!(paid.delivered_at.is_none());

        let shipped = system
            .admin_client
            .update_order_status(order.id.clone(), status(Some(OrderStatus::Shipped), None))
            .await
            .unwrap();
        assert_eq!(shipped.paid_at, paid.paid_at);
        assert!(shipped.delivered_at.is_none());

        let delivered = system
            .admin_client
            .update_order_status(order.id.clone(), status(Some(OrderStatus::Delivered), None))
            .await
            .unwrap();
        assert!(delivered.is_delivered());
        assert!(delivered.delivered_at.unwrap() >= before);
        assert_eq!(delivered.payment_status, PaymentStatus::Paid);

        let json = serde_json::to_value(&delivered).unwrap();
        assert_eq!(json["isPaid"], true);
        assert_eq!(json["isDelivered"], true);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_updating_missing_order_changes_nothing() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;
        let jar = product(&system, "Jar", 5.0, 10).await;
        let order = place(&system, &alice, &jar, 1).await;

        let result = system
            .admin_client
            .update_order_status("order_999".into(), status(Some(OrderStatus::Delivered), Some(PaymentStatus::Paid)))
            .await;
        assert_eq!(result.as_ref().map_err(AdminError::status_code), Err(404));

        let orders = system.order_client.list_orders().await.unwrap();
        assert_eq!(orders, vec![order]);
    }

    #[tokio::test]
    async fn test_revenue_sums_paid_orders() {
        let system = StoreSystem::new(&AppConfig::default());
        assert_eq!(system.admin_client.dashboard_stats().await.unwrap().total_revenue, 0.0);

        let alice = customer(&system, "alice@example.com").await;
        let jar = product(&system, "Jar", 5.0, 100).await;
        let first = place(&system, &alice, &jar, 2).await;
        let _unpaid = place(&system, &alice, &jar, 7).await;
        let third = place(&system, &alice, &jar, 1).await;
        for id in [first.id, third.id] {
            system
                .admin_client
                .update_order_status(id, status(None, Some(PaymentStatus::Paid)))
                .await
                .unwrap();
        }

        let stats = system.admin_client.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_revenue, 15.0);
        assert_eq!(stats.pending_orders, 3);
        assert_eq!(stats.sales_data.iter().map(|d| d.orders).sum::<u64>(), 2);
    }

    #[tokio::test]
    async fn test_review_feed_is_chronological_and_repeatable() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;
        let p1 = product(&system, "P1", 1.0, 1).await;
        let p2 = product(&system, "P2", 1.0, 1).await;

        let mut added = Vec::new();
        for (product_id, rating) in [(&p2.id, 3), (&p1.id, 4), (&p2.id, 5)] {
            let review = system
                .admin_client
                .add_review(product_id.clone(), alice.id.clone(), rating, String::new())
                .await
                .unwrap();
            added.push((review.id, product_id.clone()));
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let feed = system.admin_client.list_reviews(PageRequest::default()).await.unwrap();
        let seen: Vec<(String, String)> = feed.reviews.iter().map(|r| (r.id.clone(), r.product_id.clone())).collect();
        added.reverse();
        assert_eq!(seen, added);
        assert_eq!(feed.page.total, 3);

        let again = system.admin_client.list_reviews(PageRequest::default()).await.unwrap();
        assert_eq!(feed, again);
    }

    #[tokio::test]
    async fn test_review_deletion_recomputes_rating() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;
        let jar = product(&system, "Jar", 1.0, 1).await;

        let mut ids = Vec::new();
        for rating in [4, 5, 3] {
            let review = system
                .admin_client
                .add_review(jar.id.clone(), alice.id.clone(), rating, String::new())
                .await
                .unwrap();
            ids.push(review.id);
        }
        let stored = system.product_client.require_product(jar.id.clone()).await.unwrap();
        assert_eq!(stored.ratings.average, 4.0);

        system.admin_client.delete_review(jar.id.clone(), ids[1].clone()).await.unwrap();
        let stored = system.product_client.require_product(jar.id.clone()).await.unwrap();
        assert_eq!(stored.reviews.len(), 2);
        assert_eq!(stored.ratings.average, 3.5);

        let noop = system.admin_client.delete_review(jar.id.clone(), "no-such-review".into()).await.unwrap();
        assert!(!noop.removed);
        let unchanged = system.product_client.require_product(jar.id.clone()).await.unwrap();
        assert_eq!(unchanged, stored);
    }

    #[tokio::test]
    async fn test_failed_order_leaves_stock_untouched() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;
        let plenty = product(&system, "Plenty", 1.0, 50).await;
        let scarce = product(&system, "Scarce", 1.0, 1).await;

        let result = system
            .order_client
            .create_order(OrderRequest {
                user_id: alice.id.clone(),
                lines: vec![
                    OrderLine {
                        product_id: plenty.id.clone(),
                        quantity: 10,
                    },
                    OrderLine {
                        product_id: scarce.id.clone(),
                        quantity: 2,
                    },
                ],
                shipping_address: None,
            })
            .await;
        assert!(matches!(result, Err(OrderError::InsufficientStock(_))));

        assert_eq!(system.product_client.check_stock(plenty.id.clone()).await.unwrap(), 50);
        assert_eq!(system.product_client.check_stock(scarce.id.clone()).await.unwrap(), 1);
        assert!(system.order_client.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_accounts_are_unique_and_authenticate() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;

        let duplicate = system
            .user_client
            .create_user(UserCreate {
                name: "Other".into(),
                email: " ALICE@example.com ".into(),
                password: "whatever1".into(),
                phone: String::new(),
                address: None,
            })
            .await;
        assert!(matches!(duplicate, Err(UserError::AlreadyExists(_))));

        let signed_in = system.user_client.authenticate("Alice@Example.com", "hunter22").await.unwrap();
        assert_eq!(signed_in.id, alice.id);
        assert_eq!(
            system.user_client.authenticate("alice@example.com", "wrong").await,
            Err(UserError::InvalidCredentials)
        );

        let jar = product(&system, "Jar", 1.0, 1).await;
        let wishlist = system.user_client.add_to_wishlist(alice.id.clone(), jar.id.clone()).await.unwrap();
        assert!(wishlist.contains(&jar.id));
    }

    #[tokio::test]
    async fn test_orders_for_user_are_newest_first() {
        let system = StoreSystem::new(&AppConfig::default());
        let alice = customer(&system, "alice@example.com").await;
        let bob = customer(&system, "bob@example.com").await;
        let jar = product(&system, "Jar", 1.0, 10).await;

        let older = place(&system, &alice, &jar, 1).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        let newer = place(&system, &alice, &jar, 1).await;
        place(&system, &bob, &jar, 1).await;

        let ids: Vec<String> = system
            .order_client
            .list_orders_for_user(alice.id.clone())
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }
}
