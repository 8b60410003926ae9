use serde::Serialize;

// 材料实体
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub content: String,
    pub youtube_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
