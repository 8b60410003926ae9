use serde::Serialize;

// 主题创建响应
#[derive(Debug, Serialize)]
pub struct TopicCreatedResponse {
    pub topic_id: i64,
}
