use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::requests::UserQueryParams;
use crate::models::users::responses::UserListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    query: UserQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users(query.search).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserListResponse { items },
            "Users retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve users",
                )),
            )
        }
    }
}
