pub mod delete;
pub mod list;
pub mod update_role;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{UpdateUserRoleRequest, UserQueryParams};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取用户列表，仅超级管理员可用
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    // 更新用户角色，仅超级管理员可用，只允许晋升为 teacher
    pub async fn update_user_role(
        &self,
        request: &HttpRequest,
        user_id: i64,
        update_data: UpdateUserRoleRequest,
    ) -> ActixResult<HttpResponse> {
        update_role::update_user_role(self, request, user_id, update_data).await
    }

    // 删除用户，仅超级管理员可用，不允许删除自己
    pub async fn delete_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{User, UserRole};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::HttpMessage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    fn request_as(user: &User) -> HttpRequest {
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(user.clone());
        request
    }

    async fn memory_storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::new_in_memory().await)
    }

    #[actix_web::test]
    async fn test_self_delete_blocked() {
        let storage = memory_storage().await;
        let admin = storage
            .create_user("admin".to_string(), "hash".to_string(), UserRole::SuperAdmin)
            .await
            .unwrap();
        let service = UserService {
            storage: Some(storage.clone()),
        };

        let response = service
            .delete_user(&request_as(&admin), admin.id)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // 账号没有被动过
        assert!(storage.get_user_by_id(admin.id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_delete_other_user() {
        let storage = memory_storage().await;
        let admin = storage
            .create_user("admin".to_string(), "hash".to_string(), UserRole::SuperAdmin)
            .await
            .unwrap();
        let student = storage
            .create_user("student".to_string(), "hash".to_string(), UserRole::User)
            .await
            .unwrap();
        let service = UserService {
            storage: Some(storage.clone()),
        };

        let response = service
            .delete_user(&request_as(&admin), student.id)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let repeat = service
            .delete_user(&request_as(&admin), student.id)
            .await
            .unwrap();
        assert_eq!(repeat.status(), StatusCode::NOT_FOUND);
    }
}
