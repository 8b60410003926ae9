pub mod login;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::LoginRequest;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
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

    pub(crate) fn get_config(&self) -> &'static AppConfig {
        AppConfig::get()
    }

    // 用户注册（角色固定为 user）
    pub async fn register(
        &self,
        request: &HttpRequest,
        create_request: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, create_request, request).await
    }

    // 用户登录
    pub async fn login(
        &self,
        request: &HttpRequest,
        login_request: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    async fn memory_service() -> AuthService {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);
        AuthService {
            storage: Some(storage),
        }
    }

    fn create_request(username: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_rejects_duplicate_username() {
        let service = memory_service().await;
        let request = TestRequest::default().to_http_request();

        let first = service
            .register(&request, create_request("alice", "secret-1"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = service
            .register(&request, create_request("alice", "secret-2"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_login_rejects_wrong_credentials() {
        let service = memory_service().await;
        let request = TestRequest::default().to_http_request();

        let created = service
            .register(&request, create_request("alice", "secret-1"))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        // 密码错误和用户不存在给同样的 401
        let wrong_password = service
            .login(&request, login_request("alice", "wrong-password"))
            .await
            .unwrap();
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

        let unknown_user = service
            .login(&request, login_request("nobody", "secret-1"))
            .await
            .unwrap();
        assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

        let correct = service
            .login(&request, login_request("alice", "secret-1"))
            .await
            .unwrap();
        assert_eq!(correct.status(), StatusCode::OK);
    }
}
