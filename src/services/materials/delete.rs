use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::modules::ensure_module_author;
use crate::utils::multipart::remove_stored_image;

pub async fn delete_material(
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

    // 材料必须存在且属于该模块
    let existing = match storage.get_material_in_module(module_id, material_id).await {
        Ok(Some(material)) => material,
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
    };

    match storage.delete_material(material_id).await {
        Ok(true) => {
            if let Some(image_url) = existing.image_url.as_ref() {
                remove_stored_image(image_url);
            }
            info!("Material {} deleted from module {}", material_id, module_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Material deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => {
            error!("Material delete failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialDeleteFailed,
                    format!("Material delete failed: {e}"),
                )),
            )
        }
    }
}
