use serde::Serialize;

// 材料创建响应
#[derive(Debug, Serialize)]
pub struct MaterialCreatedResponse {
    pub material_id: i64,
}
