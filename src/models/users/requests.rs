use serde::Deserialize;

use super::entities::UserRole;

// 用户注册 / 创建请求
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

// 用户列表查询参数
#[derive(Debug, Deserialize)]
pub struct UserQueryParams {
    // 按用户名模糊过滤
    pub search: Option<String>,
}

// 用户角色更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub role: UserRole,
}
