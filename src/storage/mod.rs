use std::sync::Arc;

use crate::models::{
    materials::{
        entities::Material,
        requests::{CreateMaterialData, UpdateMaterialData},
    },
    modules::{
        entities::Module,
        requests::{CreateModuleData, UpdateModuleData},
        responses::{ModuleDetailResponse, ModuleListItem},
    },
    topics::entities::Topic,
    users::entities::{User, UserRole},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, username: String, password_hash: String, role: UserRole)
    -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出用户，可按用户名模糊过滤
    async fn list_users(&self, search: Option<String>) -> Result<Vec<User>>;
    // 更新用户角色
    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<bool>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 模块管理方法
    // 创建模块
    async fn create_module(&self, data: CreateModuleData) -> Result<Module>;
    // 通过ID获取模块
    async fn get_module_by_id(&self, id: i64) -> Result<Option<Module>>;
    // 列出模块
    async fn list_modules(&self) -> Result<Vec<ModuleListItem>>;
    // 列出模块并附带指定用户的完成进度
    async fn list_modules_with_progress(&self, user_id: i64) -> Result<Vec<ModuleListItem>>;
    // 获取模块详情（主题 + 材料树）
    async fn get_module_detail(&self, id: i64) -> Result<Option<ModuleDetailResponse>>;
    // 更新模块
    async fn update_module(&self, id: i64, data: UpdateModuleData) -> Result<Option<Module>>;
    // 删除模块（级联删除主题和材料）
    async fn delete_module(&self, id: i64) -> Result<bool>;

    /// 主题管理方法
    // 在模块下创建主题
    async fn create_topic(&self, module_id: i64, title: String) -> Result<Topic>;
    // 通过ID获取主题
    async fn get_topic_by_id(&self, id: i64) -> Result<Option<Topic>>;
    // 删除主题
    async fn delete_topic(&self, id: i64) -> Result<bool>;

    /// 材料管理方法
    // 创建材料
    async fn create_material(&self, data: CreateMaterialData) -> Result<Material>;
    // 获取模块内的指定材料（材料不属于该模块时返回 None）
    async fn get_material_in_module(&self, module_id: i64, material_id: i64)
    -> Result<Option<Material>>;
    // 更新材料
    async fn update_material(&self, id: i64, data: UpdateMaterialData) -> Result<Option<Material>>;
    // 删除材料
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 学习进度方法
    // 标记材料完成，重复标记返回 false（幂等）
    async fn mark_material_complete(&self, user_id: i64, material_id: i64) -> Result<bool>;
    // 列出用户在模块内已完成的材料 ID
    async fn list_completed_material_ids(&self, user_id: i64, module_id: i64) -> Result<Vec<i64>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
