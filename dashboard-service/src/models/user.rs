//! Dashboard user model.

use sqlx::FromRow;
use uuid::Uuid;

/// A dashboard login. `password` holds an Argon2 PHC string, never plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}
