use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone, sqlx::FromRow)]
pub struct Dato {
    pub id: i32,
    pub nombre: String,
    pub descripcion: String,
    pub timestamp: String,
    pub client_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
