// 材料创建 / 更新数据（由 multipart 表单解析而来，不直接反序列化）

#[derive(Debug, Clone)]
pub struct CreateMaterialData {
    pub topic_id: i64,
    pub title: String,
    pub content: String,
    pub youtube_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateMaterialData {
    pub title: String,
    pub content: String,
    pub youtube_url: Option<String>,
    /// None 表示沿用旧图片
    pub image_url: Option<String>,
}
