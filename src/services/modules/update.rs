use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ModuleService, ensure_module_author};
use crate::models::modules::requests::UpdateModuleData;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::multipart::{parse_image_form, remove_stored_image};

pub async fn update_module(
    service: &ModuleService,
    request: &HttpRequest,
    module_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 归属校验：作者或超级管理员
    let existing = match ensure_module_author(&storage, request, module_id).await {
        Ok(module) => module,
        Err(response) => return Ok(response),
    };

    let form = match parse_image_form(payload).await {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };

    let title = match form.require("title") {
        Ok(value) => value.to_string(),
        Err(response) => {
            form.discard_image();
            return Ok(response);
        }
    };
    let short_description = match form.require("short_description") {
        Ok(value) => value.to_string(),
        Err(response) => {
            form.discard_image();
            return Ok(response);
        }
    };

    // 没有上传新图时沿用旧图
    let new_image_url = form.image.as_ref().map(|image| image.url.clone());

    let data = UpdateModuleData {
        title,
        short_description,
        image_url: new_image_url.clone(),
    };

    match storage.update_module(module_id, data).await {
        Ok(Some(module)) => {
            // 新图片已生效，清理被替换的旧图
            if new_image_url.is_some() {
                remove_stored_image(&existing.image_url);
            }
            info!("Module {} updated successfully", module_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(module, "Module updated successfully")))
        }
        Ok(None) => {
            form.discard_image();
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ModuleNotFound,
                "Module not found",
            )))
        }
        Err(e) => {
            form.discard_image();
            error!("Module update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ModuleUpdateFailed,
                    format!("Module update failed: {e}"),
                )),
            )
        }
    }
}
