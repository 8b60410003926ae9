use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TopicService;
use crate::models::modules::responses::ModuleDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::modules::ensure_module_author;
use crate::utils::multipart::remove_stored_image;

pub async fn delete_topic(
    service: &TopicService,
    request: &HttpRequest,
    module_id: i64,
    topic_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 归属校验：作者或超级管理员
    if let Err(response) = ensure_module_author(&storage, request, module_id).await {
        return Ok(response);
    }

    // 主题必须存在且属于该模块
    match storage.get_topic_by_id(topic_id).await {
        Ok(Some(topic)) if topic.module_id == module_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TopicNotFound,
                "Topic not found",
            )));
        }
        Err(e) => {
            error!("Failed to get topic by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching topic",
                )),
            );
        }
    }

    // 先收集该主题下材料的图片，删除后统一清理文件
    let topic_images: Vec<String> = match storage.get_module_detail(module_id).await {
        Ok(Some(detail)) => collect_topic_images(detail, topic_id),
        _ => Vec::new(),
    };

    match storage.delete_topic(topic_id).await {
        Ok(true) => {
            for image_url in &topic_images {
                remove_stored_image(image_url);
            }
            info!("Topic {} deleted from module {}", topic_id, module_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Topic deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TopicNotFound,
            "Topic not found",
        ))),
        Err(e) => {
            error!("Topic delete failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TopicDeleteFailed,
                    format!("Topic delete failed: {e}"),
                )),
            )
        }
    }
}

// 被删主题下所有材料的图片 URL
fn collect_topic_images(detail: ModuleDetailResponse, topic_id: i64) -> Vec<String> {
    detail
        .topics
        .into_iter()
        .filter(|topic| topic.id == topic_id)
        .flat_map(|topic| topic.materials)
        .filter_map(|material| material.image_url)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::entities::Material;
    use crate::models::modules::entities::Module;
    use crate::models::modules::responses::TopicNode;

    fn material(id: i64, topic_id: i64, image_url: Option<&str>) -> Material {
        Material {
            id,
            topic_id,
            title: "m".to_string(),
            content: "c".to_string(),
            youtube_url: None,
            image_url: image_url.map(|s| s.to_string()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn detail_with_two_topics() -> ModuleDetailResponse {
        ModuleDetailResponse {
            module: Module {
                id: 1,
                title: "mod".to_string(),
                short_description: "d".to_string(),
                image_url: "/uploads/cover.png".to_string(),
                author_id: 1,
                author: "t".to_string(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            topics: vec![
                TopicNode {
                    id: 10,
                    title: "a".to_string(),
                    materials: vec![
                        material(100, 10, Some("/uploads/a1.png")),
                        material(101, 10, None),
                        material(102, 10, Some("/uploads/a2.jpg")),
                    ],
                },
                TopicNode {
                    id: 20,
                    title: "b".to_string(),
                    materials: vec![material(200, 20, Some("/uploads/b1.png"))],
                },
            ],
        }
    }

    #[test]
    fn test_collects_only_target_topic_images() {
        let images = collect_topic_images(detail_with_two_topics(), 10);
        assert_eq!(images, vec!["/uploads/a1.png", "/uploads/a2.jpg"]);
    }

    #[test]
    fn test_unknown_topic_collects_nothing() {
        let images = collect_topic_images(detail_with_two_topics(), 99);
        assert!(images.is_empty());
    }
}
