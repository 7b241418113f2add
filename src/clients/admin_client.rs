use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::config::{DashboardConfig, PaginationConfig};
use crate::domain::{
    Category, Order, OrderStatus, OrderStatusPatch, Product, ProductCreate, ProductPatch, RatingSummary, Review,
    ReviewCreate, Role, User,
};
use crate::error::AdminError;
use crate::reporting::{
    compute_dashboard_stats, paginate, resolve_owners, review_feed, DashboardStats, OrderWithUser, PageInfo,
    PageRequest, ReviewPage,
};
use crate::storage::{cleanup_images, plan_upload, ImageCleanup, ObjectStore, UploadedImage};

/// Filters for the admin product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub page: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPage {
    pub orders: Vec<OrderWithUser>,
    #[serde(flatten)]
    pub page: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    #[serde(flatten)]
    pub page: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDeletion {
    pub product_id: String,
    pub image_cleanup: Vec<ImageCleanup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewRemoval {
    pub removed: bool,
    pub ratings: RatingSummary,
}

/// Back-office operations spanning the user, product and order collections.
///
/// Reads across collections take each snapshot concurrently; there is no
/// isolation between them.
#[derive(Clone)]
pub struct AdminClient {
    users: UserClient,
    products: ProductClient,
    orders: OrderClient,
    store: Arc<dyn ObjectStore>,
    pagination: PaginationConfig,
    dashboard: DashboardConfig,
    max_upload_bytes: usize,
}

impl AdminClient {
    pub fn new(
        users: UserClient,
        products: ProductClient,
        orders: OrderClient,
        store: Arc<dyn ObjectStore>,
        pagination: PaginationConfig,
        dashboard: DashboardConfig,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            users,
            products,
            orders,
            store,
            pagination,
            dashboard,
            max_upload_bytes,
        }
    }

    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AdminError> {
        debug!("Collecting snapshots");
        let (users, products, orders) = tokio::try_join!(
            async { self.users.list_users().await.map_err(AdminError::from) },
            async { self.products.list_products().await.map_err(AdminError::from) },
            async { self.orders.list_orders().await.map_err(AdminError::from) },
        )?;
        let stats = compute_dashboard_stats(&users, &products, orders, Utc::now(), &self.dashboard);
        info!(
            total_orders = stats.total_orders,
            total_revenue = stats.total_revenue,
            "Dashboard stats computed"
        );
        Ok(stats)
    }

    /// Orders newest first, optionally only those in `status`, with the buyer's contact details.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, status: Option<OrderStatus>, page: PageRequest) -> Result<OrderPage, AdminError> {
        let (users, orders) = tokio::try_join!(
            async { self.users.list_users().await.map_err(AdminError::from) },
            async { self.orders.list_orders().await.map_err(AdminError::from) },
        )?;
        let orders: Vec<Order> = orders
            .into_iter()
            .filter(|order| status.is_none_or(|s| order.order_status == s))
            .collect();
        let (orders, page) = paginate(resolve_owners(orders, &users), self.pagination.resolve(page));
        Ok(OrderPage { orders, page })
    }

    pub async fn update_order_status(&self, id: String, patch: OrderStatusPatch) -> Result<Order, AdminError> {
        Ok(self.orders.update_order_status(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_reviews(&self, page: PageRequest) -> Result<ReviewPage, AdminError> {
        let products = self.products.list_products().await?;
        Ok(review_feed(&products, self.pagination.resolve(page)))
    }

    /// Removes one review and recomputes the product rating. A review id the
    /// product does not have is not an error.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, product_id: String, review_id: String) -> Result<ReviewRemoval, AdminError> {
        let (removed, ratings) = self.products.remove_review(product_id, review_id).await?;
        if !removed {
            debug!("Review was already absent");
        }
        Ok(ReviewRemoval { removed, ratings })
    }

    #[instrument(skip(self, review_comment))]
    pub async fn add_review(
        &self,
        product_id: String,
        user_id: String,
        rating: u8,
        review_comment: String,
    ) -> Result<Review, AdminError> {
        if !(1..=5).contains(&rating) {
            return Err(AdminError::Validation("Rating must be between 1 and 5".to_string()));
        }
        let user = self.users.require_user(user_id).await?;
        let review = ReviewCreate {
            user_id: user.id,
            user_name: user.name,
            rating,
            comment: review_comment,
        };
        Ok(self.products.add_review(product_id, review).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, AdminError> {
        let needle = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let mut products: Vec<Product> = self
            .products
            .list_products()
            .await?
            .into_iter()
            .filter(|p| query.category.is_none_or(|c| p.category == c))
            .filter(|p| needle.is_none_or(|n| p.matches_search(n)))
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        let (products, page) = paginate(products, self.pagination.resolve(query.page));
        Ok(ProductPage { products, page })
    }

    pub async fn create_product(&self, product: ProductCreate) -> Result<Product, AdminError> {
        Ok(self.products.create_product(product).await?)
    }

    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, AdminError> {
        Ok(self.products.update_product(id, patch).await?)
    }

    /// Deletes a product after trying to remove each of its stored images.
    /// Image failures are reported, never fatal.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: String) -> Result<ProductDeletion, AdminError> {
        let product = self.products.require_product(id.clone()).await?;
        let image_cleanup = cleanup_images(self.store.as_ref(), &product.images).await;
        let failed = image_cleanup.iter().filter(|c| !c.succeeded()).count();
        if failed > 0 {
            warn!(failed, "Some product images could not be deleted");
        }
        self.products.delete_product(id.clone()).await?;
        info!("Product deleted");
        Ok(ProductDeletion {
            product_id: id,
            image_cleanup,
        })
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_product_image(&self, bytes: Vec<u8>, file_name: Option<&str>) -> Result<UploadedImage, AdminError> {
        let target = plan_upload(&bytes, file_name, self.max_upload_bytes, Utc::now())?;
        let url = self.store.upload(&target.path, bytes, &target.content_type).await?;
        info!(public_id = %target.path, "Image uploaded");
        Ok(UploadedImage {
            url,
            public_id: target.path,
        })
    }

    /// Users newest first. Password hashes are never serialized.
    #[instrument(skip(self))]
    pub async fn list_users(&self, page: PageRequest) -> Result<UserPage, AdminError> {
        let mut users = self.users.list_users().await?;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        let (users, page) = paginate(users, self.pagination.resolve(page));
        Ok(UserPage { users, page })
    }

    #[instrument(skip(self))]
    pub async fn update_user_role(&self, id: String, role: &str) -> Result<User, AdminError> {
        let role = Role::from_str(role).map_err(|_| AdminError::Validation("Invalid role".to_string()))?;
        Ok(self.users.set_role(id, role).await?)
    }
}
