use chrono::NaiveDateTime;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub register_time: Option<NaiveDateTime>,
    pub order_count: Option<i64>,
    pub total_spent: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRole {
    pub role: String,
}
