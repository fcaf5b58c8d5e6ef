use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Authenticated principal, built from verified token claims or loaded from `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Creator as seen from a product: lookup only, it may be gone.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Creator {
    pub id: String,
    pub name: String,
}
