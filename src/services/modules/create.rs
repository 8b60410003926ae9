use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ModuleService;
use crate::middlewares::RequireJWT;
use crate::models::modules::requests::CreateModuleData;
use crate::models::modules::responses::ModuleCreatedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::multipart::parse_image_form;

pub async fn create_module(
    service: &ModuleService,
    request: &HttpRequest,
    payload: Multipart,
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

    // 模块封面图是必填的
    let Some(image) = form.image.as_ref() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Field 'image' is required",
        )));
    };

    let data = CreateModuleData {
        author_id: uid,
        title,
        short_description,
        image_url: image.url.clone(),
    };

    match storage.create_module(data).await {
        Ok(module) => {
            info!("Module {} created successfully by {}", module.id, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ModuleCreatedResponse {
                    module_id: module.id,
                },
                "Module created successfully",
            )))
        }
        Err(e) => {
            form.discard_image();
            error!("Module creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ModuleCreationFailed,
                    format!("Module creation failed: {e}"),
                )),
            )
        }
    }
}
