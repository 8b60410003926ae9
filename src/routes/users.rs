use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{UpdateUserRoleRequest, UserQueryParams};
use crate::services::UserService;
use crate::utils::SafeUserIdI64;

// 懒加载的全局 USER_SERVICE 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserQueryParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&req, query.into_inner()).await
}

pub async fn update_user_role(
    req: HttpRequest,
    user_id: SafeUserIdI64,
    update_data: web::Json<UpdateUserRoleRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user_role(&req, user_id.0, update_data.into_inner())
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeUserIdI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, user_id.0).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // 用户管理整组只对超级管理员开放
        web::scope("/api/users")
            .wrap(middlewares::RequireRole::new(&UserRole::SuperAdmin))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_users)))
            .service(web::resource("/{id}").route(web::delete().to(delete_user)))
            .service(web::resource("/{id}/role").route(web::put().to(update_user_role))),
    );
}
