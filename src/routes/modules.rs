use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::topics::requests::CreateTopicRequest;
use crate::models::users::entities::UserRole;
use crate::services::{ModuleService, TopicService};
use crate::utils::{SafeModuleIdI64, SafeTopicIdI64};

// 懒加载的全局服务实例
static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);
static TOPIC_SERVICE: Lazy<TopicService> = Lazy::new(TopicService::new_lazy);

// HTTP处理程序
pub async fn list_modules(req: HttpRequest) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.list_modules(&req).await
}

pub async fn create_module(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.create_module(&req, payload).await
}

pub async fn get_module(req: HttpRequest, module_id: SafeModuleIdI64) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.get_module(&req, module_id.0).await
}

pub async fn update_module(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.update_module(&req, module_id.0, payload).await
}

pub async fn delete_module(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.delete_module(&req, module_id.0).await
}

pub async fn create_topic(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    topic_data: web::Json<CreateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE
        .create_topic(&req, module_id.0, topic_data.into_inner())
        .await
}

pub async fn delete_topic(
    req: HttpRequest,
    module_id: SafeModuleIdI64,
    topic_id: SafeTopicIdI64,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE
        .delete_topic(&req, module_id.0, topic_id.0)
        .await
}

// 配置路由
//
// 列表和详情是公开接口，写操作要求教师或超级管理员登录，
// 所以中间件挂在具体路由而不是 scope 上。
pub fn configure_modules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/modules")
            // 公开接口，登录学员附带学习进度
            .route(web::get().to(list_modules))
            .route(
                web::post()
                    .to(create_module)
                    // 教师和超级管理员可以创建模块
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RequireJWT),
            ),
    )
    .service(
        web::resource("/api/modules/{module_id}")
            // 公开接口，返回完整的主题 + 材料树
            .route(web::get().to(get_module))
            .route(
                web::put()
                    .to(update_module)
                    // 归属校验（作者或超级管理员）在服务层完成
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RequireJWT),
            )
            .route(
                web::delete()
                    .to(delete_module)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RequireJWT),
            ),
    )
    .service(
        web::resource("/api/modules/{module_id}/topics").route(
            web::post()
                .to(create_topic)
                .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                .wrap(middlewares::RequireJWT),
        ),
    )
    .service(
        web::resource("/api/modules/{module_id}/topics/{topic_id}").route(
            web::delete()
                .to(delete_topic)
                .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                .wrap(middlewares::RequireJWT),
        ),
    );
}
