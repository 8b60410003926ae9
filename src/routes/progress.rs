use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::ProgressService;
use crate::utils::{SafeMaterialIdI64, SafeModuleIdI64};

// 懒加载的全局 PROGRESS_SERVICE 实例
static PROGRESS_SERVICE: Lazy<ProgressService> = Lazy::new(ProgressService::new_lazy);

// HTTP处理程序
pub async fn get_module_progress(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.get_module_progress(&req, module_id.0).await
}

pub async fn complete_material(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .complete_material(&req, module_id.0, material_id.0)
        .await
}

// 配置路由
pub fn configure_progress_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/modules/{module_id}/progress").route(
            // 任意登录用户查询自己的学习进度
            web::get()
                .to(get_module_progress)
                .wrap(middlewares::RequireJWT),
        ),
    )
    .service(
        web::resource("/api/modules/{module_id}/materials/{material_id}/complete").route(
            web::post()
                .to(complete_material)
                .wrap(middlewares::RequireJWT),
        ),
    );
}
