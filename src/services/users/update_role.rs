use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRoleRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_user_role(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    update_data: UpdateUserRoleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 只允许把普通用户晋升为 teacher，管理员角色不可通过接口授予
    if update_data.role != UserRole::Teacher {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoleNotAllowed,
            "Only the 'teacher' role can be assigned",
        )));
    }

    match storage.update_user_role(user_id, update_data.role).await {
        Ok(true) => {
            info!("User {} role updated to teacher", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User role updated successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            error!("User role update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserUpdateFailed,
                    format!("User role update failed: {e}"),
                )),
            )
        }
    }
}
