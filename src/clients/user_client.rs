use std::collections::BTreeSet;

use tracing::{debug, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{normalize_email, NewUser, Role, User, UserCreate, UserPatch, UserUpdate};
use crate::user_actor::password::{hash_password_blocking, verify_password};
use crate::user_actor::{UserAction, UserActionResult, UserError};

/// Client for interacting with the User actor.
///
/// Plaintext passwords stop here: they are hashed before any request reaches the store.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, user), fields(user_email = %user.email))]
    pub async fn create_user(&self, user: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let password_hash = hash_password_blocking(user.password).await?;
        let payload = NewUser {
            name: user.name,
            email: user.email,
            password_hash,
            phone: user.phone,
            address: user.address,
        };
        Ok(self.inner.create(payload).await?)
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: String, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        let password_hash = match update.password {
            Some(password) => Some(hash_password_blocking(password).await?),
            None => None,
        };
        let patch = UserPatch {
            name: update.name,
            email: update.email,
            password_hash,
            role: None,
            phone: update.phone,
            address: update.address,
        };
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn set_role(&self, id: String, role: Role) -> Result<User, UserError> {
        debug!("Sending request");
        let patch = UserPatch {
            role: Some(role),
            ..Default::default()
        };
        Ok(self.inner.update(id, patch).await?)
    }

    /// Looks a user up by email and checks the password.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        debug!("Sending request");
        let email = normalize_email(email).map_err(|_| UserError::InvalidCredentials)?;
        let Some(user) = self.list_users().await?.into_iter().find(|u| u.email == email) else {
            warn!("Unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| UserError::HashingError(e.to_string()))?;
        if verified {
            Ok(user)
        } else {
            warn!(user_id = %user.id, "Password mismatch");
            Err(UserError::InvalidCredentials)
        }
    }

    #[instrument(skip(self))]
    pub async fn add_to_wishlist(&self, id: String, product_id: String) -> Result<BTreeSet<String>, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(id, UserAction::AddToWishlist(product_id)).await? {
            UserActionResult::Wishlist(wishlist) => Ok(wishlist),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_from_wishlist(&self, id: String, product_id: String) -> Result<BTreeSet<String>, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(id, UserAction::RemoveFromWishlist(product_id)).await? {
            UserActionResult::Wishlist(wishlist) => Ok(wishlist),
        }
    }
}
