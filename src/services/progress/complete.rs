use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProgressService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn complete_material(
    service: &ProgressService,
    request: &HttpRequest,
    module_id: i64,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 材料必须存在且属于该模块
    match storage.get_material_in_module(module_id, material_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "Material not found",
            )));
        }
        Err(e) => {
            error!("Failed to get material: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching material",
                )),
            );
        }
    }

    // 重复标记是幂等操作，同样返回成功
    match storage.mark_material_complete(uid, material_id).await {
        Ok(true) => {
            info!("User {} completed material {}", uid, material_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success_empty("Material marked as completed")))
        }
        Ok(false) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Material already completed"))),
        Err(e) => {
            error!("Failed to mark material complete: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressUpdateFailed,
                    format!("Failed to mark material complete: {e}"),
                )),
            )
        }
    }
}
