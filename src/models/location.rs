//! Location model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A (state, city) reference pair. The pair is unique in the table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: i64,
    pub state: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocationRequest {
    pub state: String,
    pub city: String,
}
