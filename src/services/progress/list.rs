use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProgressService;
use crate::middlewares::RequireJWT;
use crate::models::progress::responses::ModuleProgressResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_module_progress(
    service: &ProgressService,
    request: &HttpRequest,
    module_id: i64,
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

    // 模块必须存在
    match storage.get_module_by_id(module_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ModuleNotFound,
                "Module not found",
            )));
        }
        Err(e) => {
            error!("Failed to get module by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching module",
                )),
            );
        }
    }

    match storage.list_completed_material_ids(uid, module_id).await {
        Ok(completed_material_ids) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleProgressResponse {
                completed_material_ids,
            },
            "Progress retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list progress: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve progress",
                )),
            )
        }
    }
}
