use serde::Serialize;

use super::entities::Module;
use crate::models::materials::entities::Material;

// 模块列表项，角色为 user 时附带学习进度
#[derive(Debug, Serialize)]
pub struct ModuleListItem {
    #[serde(flatten)]
    pub module: Module,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_materials: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_materials: Option<i64>,
}

// 模块列表响应
#[derive(Debug, Serialize)]
pub struct ModuleListResponse {
    pub items: Vec<ModuleListItem>,
}

// 模块创建响应
#[derive(Debug, Serialize)]
pub struct ModuleCreatedResponse {
    pub module_id: i64,
}

// 模块详情中的主题节点（含其全部材料）
#[derive(Debug, Serialize)]
pub struct TopicNode {
    pub id: i64,
    pub title: String,
    pub materials: Vec<Material>,
}

// 模块详情响应
#[derive(Debug, Serialize)]
pub struct ModuleDetailResponse {
    #[serde(flatten)]
    pub module: Module,
    pub topics: Vec<TopicNode>,
}
