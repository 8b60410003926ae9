use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::modules::ensure_module_author;

pub async fn get_material(
    service: &MaterialService,
    request: &HttpRequest,
    module_id: i64,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 归属校验：作者或超级管理员
    if let Err(response) = ensure_module_author(&storage, request, module_id).await {
        return Ok(response);
    }

    match storage.get_material_in_module(module_id, material_id).await {
        Ok(Some(material)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            material,
            "Material retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => {
            error!("Failed to get material: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve material",
                )),
            )
        }
    }
}
