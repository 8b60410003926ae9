use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::materials::requests::CreateMaterialData;
use crate::models::materials::responses::MaterialCreatedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::modules::ensure_module_author;
use crate::utils::multipart::parse_image_form;
use crate::utils::validate::validate_youtube_url;

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    module_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 归属校验：作者或超级管理员
    if let Err(response) = ensure_module_author(&storage, request, module_id).await {
        return Ok(response);
    }

    let form = match parse_image_form(payload).await {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };

    let (topic_id, title, content, youtube_url) = match parse_material_fields(&form) {
        Ok(fields) => fields,
        Err(response) => {
            form.discard_image();
            return Ok(response);
        }
    };

    // 主题必须存在且属于该模块
    match storage.get_topic_by_id(topic_id).await {
        Ok(Some(topic)) if topic.module_id == module_id => {}
        Ok(_) => {
            form.discard_image();
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TopicNotFound,
                "Topic not found",
            )));
        }
        Err(e) => {
            form.discard_image();
            error!("Failed to get topic by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching topic",
                )),
            );
        }
    }

    let data = CreateMaterialData {
        topic_id,
        title,
        content,
        youtube_url,
        image_url: form.image.as_ref().map(|image| image.url.clone()),
    };

    match storage.create_material(data).await {
        Ok(material) => {
            info!("Material {} created in module {}", material.id, module_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MaterialCreatedResponse {
                    material_id: material.id,
                },
                "Material created successfully",
            )))
        }
        Err(e) => {
            form.discard_image();
            error!("Material creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialCreationFailed,
                    format!("Material creation failed: {e}"),
                )),
            )
        }
    }
}

// 提取并校验材料表单的文本字段
fn parse_material_fields(
    form: &crate::utils::multipart::ImageForm,
) -> Result<(i64, String, String, Option<String>), HttpResponse> {
    let topic_id = form
        .require("topic_id")?
        .parse::<i64>()
        .map_err(|_| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Field 'topic_id' must be a valid ID",
            ))
        })?;

    let title = form.require("title")?.to_string();
    let content = form.require("content")?.to_string();

    let youtube_url = match form.optional("youtube_url") {
        Some(url) => {
            validate_youtube_url(url).map_err(|msg| {
                HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
            })?;
            Some(url.to_string())
        }
        None => None,
    };

    Ok((topic_id, title, content, youtube_url))
}
