// 模块创建 / 更新数据（由 multipart 表单解析而来，不直接反序列化）

#[derive(Debug, Clone)]
pub struct CreateModuleData {
    pub author_id: i64,
    pub title: String,
    pub short_description: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct UpdateModuleData {
    pub title: String,
    pub short_description: String,
    /// None 表示沿用旧图片
    pub image_url: Option<String>,
}
