use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ModuleService, ensure_module_author};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::multipart::remove_stored_image;

pub async fn delete_module(
    service: &ModuleService,
    request: &HttpRequest,
    module_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 归属校验：作者或超级管理员
    let module = match ensure_module_author(&storage, request, module_id).await {
        Ok(module) => module,
        Err(response) => return Ok(response),
    };

    // 先收集材料图片，删除后统一清理文件
    let material_images: Vec<String> = match storage.get_module_detail(module_id).await {
        Ok(Some(detail)) => detail
            .topics
            .into_iter()
            .flat_map(|topic| topic.materials)
            .filter_map(|material| material.image_url)
            .collect(),
        _ => Vec::new(),
    };

    match storage.delete_module(module_id).await {
        Ok(true) => {
            remove_stored_image(&module.image_url);
            for image_url in &material_images {
                remove_stored_image(image_url);
            }
            info!("Module {} deleted successfully", module_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Module deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ModuleNotFound,
            "Module not found",
        ))),
        Err(e) => {
            error!("Module delete failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ModuleDeleteFailed,
                    format!("Module delete failed: {e}"),
                )),
            )
        }
    }
}
