use tracing::{error, info, Instrument};

use storefront::clients::ProductQuery;
use storefront::domain::{
    Category, OrderLine, OrderRequest, OrderStatus, OrderStatusPatch, PaymentStatus, ProductCreate, UserCreate,
};
use storefront::reporting::PageRequest;
use storefront::{setup_tracing, AppConfig, StoreSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.log)?;

    info!(service = %config.service_name, "Starting storefront back office");

    let system = StoreSystem::new(&config);

    let span = tracing::info_span!("seed");
    let (customer, products) = async {
        let customer = system
            .user_client
            .create_user(UserCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "correct horse".to_string(),
                phone: "555-0100".to_string(),
                address: None,
            })
            .await
            .map_err(|e| e.to_string())?;

        let mut products = Vec::new();
        for (name, category, price, stock) in [
            ("Bamboo Toothbrush", Category::ZeroWaste, 4.5, 120),
            ("Beeswax Wraps", Category::ReusableProducts, 12.0, 8),
            ("Solar Power Bank", Category::GreenTech, 39.9, 3),
        ] {
            let product = system
                .admin_client
                .create_product(ProductCreate {
                    name: name.to_string(),
                    category,
                    price,
                    stock,
                    eco_score: 80,
                    ..Default::default()
                })
                .await
                .map_err(|e| e.to_string())?;
            products.push(product);
        }
        Ok::<_, String>((customer, products))
    }
    .instrument(span)
    .await?;

    info!(user_id = %customer.id, products = products.len(), "Seed data created");

    let span = tracing::info_span!("order_processing");
    let order_result = async {
        let order = system
            .order_client
            .create_order(OrderRequest {
                user_id: customer.id.clone(),
                lines: vec![
                    OrderLine {
                        product_id: products[0].id.clone(),
                        quantity: 3,
                    },
                    OrderLine {
                        product_id: products[1].id.clone(),
                        quantity: 1,
                    },
                ],
                shipping_address: None,
            })
            .await
            .map_err(|e| e.to_string())?;

        let patch = OrderStatusPatch {
            order_status: Some(OrderStatus::Delivered),
            payment_status: Some(PaymentStatus::Paid),
        };
        system
            .admin_client
            .update_order_status(order.id, patch)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order) => info!(
            order_id = %order.id,
            paid = order.is_paid(),
            delivered = order.is_delivered(),
            "Order processed successfully"
        ),
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    if let Err(e) = system
        .admin_client
        .add_review(products[0].id.clone(), customer.id.clone(), 5, "Lasts for months".to_string())
        .await
    {
        error!(error = %e, "Review rejected");
    }

    let stats = system.admin_client.dashboard_stats().await.map_err(|e| e.to_string())?;
    let reviews = system
        .admin_client
        .list_reviews(PageRequest::default())
        .await
        .map_err(|e| e.to_string())?;
    let catalog = system
        .admin_client
        .list_products(ProductQuery {
            search: Some("bamboo".to_string()),
            ..Default::default()
        })
        .await
        .map_err(|e| e.to_string())?;

    let report = serde_json::json!({ "stats": stats, "reviews": reviews, "catalog": catalog });
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "Could not render report"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
