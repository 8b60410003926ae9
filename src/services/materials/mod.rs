pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    // 在模块下创建材料（multipart 表单），仅模块作者或超级管理员可用
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        module_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, module_id, payload).await
    }

    // 获取模块内的指定材料
    pub async fn get_material(
        &self,
        request: &HttpRequest,
        module_id: i64,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_material(self, request, module_id, material_id).await
    }

    // 更新材料，仅模块作者或超级管理员可用
    pub async fn update_material(
        &self,
        request: &HttpRequest,
        module_id: i64,
        material_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, request, module_id, material_id, payload).await
    }

    // 删除材料，仅模块作者或超级管理员可用
    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        module_id: i64,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, module_id, material_id).await
    }
}
