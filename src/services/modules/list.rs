use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::models::modules::responses::ModuleListResponse;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

pub async fn list_modules(
    service: &ModuleService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 此接口是公开的，但携带了有效令牌的学员可以看到自己的学习进度，
    // 所以这里手动解析 Authorization 头而不是走 RequireJWT 中间件。
    let viewer = resolve_viewer(service, request).await;

    let result = match viewer {
        Some(user) if user.role == UserRole::User => {
            storage.list_modules_with_progress(user.id).await
        }
        _ => storage.list_modules().await,
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleListResponse { items },
            "Modules retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to list modules: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve modules",
                )),
            )
        }
    }
}

/// 尝试从 Authorization 头解析当前用户，令牌缺失或无效时按匿名处理
async fn resolve_viewer(service: &ModuleService, request: &HttpRequest) -> Option<User> {
    let token = JwtUtils::extract_bearer_token(request)?;
    let claims = JwtUtils::verify_access_token(token).ok()?;
    let user_id = claims.sub.parse::<i64>().ok()?;

    let storage = service.get_storage(request);
    storage.get_user_by_id(user_id).await.ok().flatten()
}
