use serde::Serialize;

// 主题实体
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
