//! Monthly revenue model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Revenue for one month, in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}
