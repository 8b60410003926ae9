use serde::Serialize;

use super::entities::User;

// 注册响应
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<User>,
}
