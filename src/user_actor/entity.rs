use chrono::Utc;

use super::actions::{UserAction, UserActionResult};
use crate::actor_framework::Entity;
use crate::domain::{normalize_email, normalize_name, NewUser, User, UserPatch};

impl Entity for User {
    type Id = String;
    type CreatePayload = NewUser;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = UserActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new User from a registration whose password is already hashed.
    ///
    /// The email is normalized to lowercase so uniqueness is case-insensitive.
    fn from_create(id: String, payload: NewUser) -> Result<Self, String> {
        Ok(Self {
            id,
            name: normalize_name(&payload.name)?,
            email: normalize_email(&payload.email)?,
            password_hash: payload.password_hash,
            role: Default::default(),
            phone: payload.phone,
            address: payload.address,
            wishlist: Default::default(),
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = normalize_name(&name)?;
        }
        if let Some(email) = patch.email {
            self.email = normalize_email(&email)?;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<UserActionResult, String> {
        match action {
            UserAction::AddToWishlist(product_id) => {
                self.wishlist.insert(product_id);
            }
            UserAction::RemoveFromWishlist(product_id) => {
                self.wishlist.remove(&product_id);
            }
        }
        Ok(UserActionResult::Wishlist(self.wishlist.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn registration(email: &str) -> NewUser {
        NewUser {
            name: " Alice ".into(),
            email: email.into(),
            password_hash: "hash".into(),
            phone: String::new(),
            address: None,
        }
    }

    #[test]
    fn test_create_normalizes_name_and_email() {
        let user = User::from_create("user_1".into(), registration("Alice@Example.com")).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.unique_key().as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(User::from_create("user_1".into(), registration("not-an-email")).is_err());
    }

    #[test]
    fn test_wishlist_actions_are_set_semantics() {
        let mut user = User::from_create("user_1".into(), registration("a@b.co")).unwrap();
        user.handle_action(UserAction::AddToWishlist("product_1".into())).unwrap();
        let result = user.handle_action(UserAction::AddToWishlist("product_1".into())).unwrap();
        assert_eq!(result, UserActionResult::Wishlist(["product_1".to_string()].into()));

        let result = user.handle_action(UserAction::RemoveFromWishlist("product_9".into())).unwrap();
        assert_eq!(result, UserActionResult::Wishlist(["product_1".to_string()].into()));
    }
}
