use serde::Deserialize;

// 主题创建请求
#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
}
