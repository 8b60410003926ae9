pub mod create;
pub mod delete;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::topics::requests::CreateTopicRequest;
use crate::storage::Storage;

pub struct TopicService {
    storage: Option<Arc<dyn Storage>>,
}

impl TopicService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 在模块下创建主题，仅模块作者或超级管理员可用
    pub async fn create_topic(
        &self,
        request: &HttpRequest,
        module_id: i64,
        topic_data: CreateTopicRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_topic(self, request, module_id, topic_data).await
    }

    // 删除主题及其材料，仅模块作者或超级管理员可用
    pub async fn delete_topic(
        &self,
        request: &HttpRequest,
        module_id: i64,
        topic_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_topic(self, request, module_id, topic_id).await
    }
}
