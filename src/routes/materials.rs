use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::{SafeMaterialIdI64, SafeModuleIdI64};

// 懒加载的全局 MATERIAL_SERVICE 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// HTTP处理程序
pub async fn create_material(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, module_id.0, payload)
        .await
}

pub async fn get_material(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .get_material(&req, module_id.0, material_id.0)
        .await
}

pub async fn update_material(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    material_id: SafeMaterialIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, module_id.0, material_id.0, payload)
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, module_id.0, material_id.0)
        .await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/modules/{module_id}/materials").route(
            web::post()
                .to(create_material)
                // 教师和超级管理员可以创建材料，归属校验在服务层完成
                .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                .wrap(middlewares::RequireJWT),
        ),
    )
    .service(
        web::resource("/api/modules/{module_id}/materials/{material_id}")
            .route(
                // 编辑用途的单条材料查询，学员通过模块详情查看材料
                web::get()
                    .to(get_material)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RequireJWT),
            )
            .route(
                web::put()
                    .to(update_material)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RequireJWT),
            )
            .route(
                web::delete()
                    .to(delete_material)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RequireJWT),
            ),
    );
}
