use serde::Serialize;

// 模块内已完成材料的 ID 列表
#[derive(Debug, Serialize)]
pub struct ModuleProgressResponse {
    pub completed_material_ids: Vec<i64>,
}
