pub mod complete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ProgressService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProgressService {
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

    // 获取当前用户在模块内的学习进度
    pub async fn get_module_progress(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_module_progress(self, request, module_id).await
    }

    // 标记材料完成（幂等）
    pub async fn complete_material(
        &self,
        request: &HttpRequest,
        module_id: i64,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        complete::complete_material(self, request, module_id, material_id).await
    }
}
