pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::modules::entities::Module;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use actix_multipart::Multipart;

pub struct ModuleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ModuleService {
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

    // 获取模块列表，登录学员附带学习进度
    pub async fn list_modules(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_modules(self, request).await
    }

    // 获取模块详情（主题 + 材料树）
    pub async fn get_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_module(self, request, module_id).await
    }

    // 创建模块（multipart 表单，图片必填）
    pub async fn create_module(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_module(self, request, payload).await
    }

    // 更新模块，仅作者或超级管理员可用
    pub async fn update_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        update::update_module(self, request, module_id, payload).await
    }

    // 删除模块，仅作者或超级管理员可用
    pub async fn delete_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_module(self, request, module_id).await
    }
}

/// 模块归属校验：模块必须存在，且当前用户是作者或超级管理员
///
/// 主题和材料的写操作同样挂在模块作者名下，复用这份校验。
pub(crate) async fn ensure_module_author(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    module_id: i64,
) -> Result<Module, HttpResponse> {
    let module = match storage.get_module_by_id(module_id).await {
        Ok(Some(module)) => module,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ModuleNotFound,
                "Module not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get module by id: {}", e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching module",
                )),
            );
        }
    };

    let uid = RequireJWT::extract_user_id(request);
    let role = RequireJWT::extract_user_role(request);

    let is_author = uid == Some(module.author_id);
    let is_super_admin = role == Some(UserRole::SuperAdmin);

    if is_author || is_super_admin {
        Ok(module)
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the module author or a super admin can modify this module",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::modules::requests::CreateModuleData;
    use crate::models::users::entities::User;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::HttpMessage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    // 模拟 RequireJWT 放进请求扩展的用户
    fn request_as(user: &User) -> HttpRequest {
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(user.clone());
        request
    }

    async fn memory_storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::new_in_memory().await)
    }

    async fn seed_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
        storage
            .create_user(username.to_string(), "hash".to_string(), role)
            .await
            .unwrap()
    }

    async fn seed_module(storage: &Arc<dyn Storage>, author_id: i64) -> Module {
        storage
            .create_module(CreateModuleData {
                author_id,
                title: "Rust".to_string(),
                short_description: "intro".to_string(),
                image_url: "/uploads/cover.png".to_string(),
            })
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_author_passes_ownership_check() {
        let storage = memory_storage().await;
        let author = seed_user(&storage, "author", UserRole::Teacher).await;
        let module = seed_module(&storage, author.id).await;

        let result = ensure_module_author(&storage, &request_as(&author), module.id).await;
        assert_eq!(result.unwrap().id, module.id);
    }

    #[actix_web::test]
    async fn test_super_admin_passes_ownership_check() {
        let storage = memory_storage().await;
        let author = seed_user(&storage, "author", UserRole::Teacher).await;
        let admin = seed_user(&storage, "admin", UserRole::SuperAdmin).await;
        let module = seed_module(&storage, author.id).await;

        let result = ensure_module_author(&storage, &request_as(&admin), module.id).await;
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn test_other_teacher_is_forbidden() {
        let storage = memory_storage().await;
        let author = seed_user(&storage, "author", UserRole::Teacher).await;
        let other = seed_user(&storage, "other", UserRole::Teacher).await;
        let module = seed_module(&storage, author.id).await;

        let response = ensure_module_author(&storage, &request_as(&other), module.id)
            .await
            .err()
            .expect("non-author allowed");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_missing_module_is_not_found() {
        let storage = memory_storage().await;
        let admin = seed_user(&storage, "admin", UserRole::SuperAdmin).await;

        let response = ensure_module_author(&storage, &request_as(&admin), 9999)
            .await
            .err()
            .expect("missing module allowed");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
