use serde::Serialize;

// 模块实体（author 为作者用户名，查询时联表带出）
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: i64,
    pub title: String,
    pub short_description: String,
    pub image_url: String,
    pub author_id: i64,
    pub author: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
