use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::materials::requests::UpdateMaterialData;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::modules::ensure_module_author;
use crate::utils::multipart::{parse_image_form, remove_stored_image};
use crate::utils::validate::validate_youtube_url;

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    module_id: i64,
    material_id: i64,
    payload: Multipart,
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
    let content = match form.require("content") {
        Ok(value) => value.to_string(),
        Err(response) => {
            form.discard_image();
            return Ok(response);
        }
    };

    let youtube_url = match form.optional("youtube_url") {
        Some(url) => {
            if let Err(msg) = validate_youtube_url(url) {
                form.discard_image();
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
            }
            Some(url.to_string())
        }
        None => None,
    };

    // 没有上传新图时沿用旧图
    let new_image_url = form.image.as_ref().map(|image| image.url.clone());

    let data = UpdateMaterialData {
        title,
        content,
        youtube_url,
        image_url: new_image_url.clone(),
    };

    match storage.update_material(material_id, data).await {
        Ok(Some(material)) => {
            // 新图片已生效，清理被替换的旧图
            if new_image_url.is_some()
                && let Some(old_image) = existing.image_url.as_ref()
            {
                remove_stored_image(old_image);
            }
            info!("Material {} updated successfully", material_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(material, "Material updated successfully")))
        }
        Ok(None) => {
            form.discard_image();
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "Material not found",
            )))
        }
        Err(e) => {
            form.discard_image();
            error!("Material update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialUpdateFailed,
                    format!("Material update failed: {e}"),
                )),
            )
        }
    }
}
