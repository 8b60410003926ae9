use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TopicService;
use crate::models::topics::requests::CreateTopicRequest;
use crate::models::topics::responses::TopicCreatedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::modules::ensure_module_author;

pub async fn create_topic(
    service: &TopicService,
    request: &HttpRequest,
    module_id: i64,
    topic_data: CreateTopicRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 归属校验：作者或超级管理员
    if let Err(response) = ensure_module_author(&storage, request, module_id).await {
        return Ok(response);
    }

    let title = topic_data.title.trim().to_string();
    if title.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Field 'title' is required",
        )));
    }

    match storage.create_topic(module_id, title).await {
        Ok(topic) => {
            info!("Topic {} created in module {}", topic.id, module_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                TopicCreatedResponse { topic_id: topic.id },
                "Topic created successfully",
            )))
        }
        Err(e) => {
            error!("Topic creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TopicCreationFailed,
                    format!("Topic creation failed: {e}"),
                )),
            )
        }
    }
}
