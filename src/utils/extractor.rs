//! 路径参数安全提取器
//!
//! 直接用 `web::Path<i64>` 提取失败时会返回 actix 默认的纯文本错误，
//! 这里统一换成 ApiResponse 格式的 400 响应。

/// 定义从路径中提取 i64 参数的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok());

                std::future::ready(match parsed {
                    Some(id) if id > 0 => Ok($name(id)),
                    _ => {
                        let response = actix_web::HttpResponse::BadRequest().json(
                            $crate::models::ApiResponse::<()>::error_empty(
                                $crate::models::ErrorCode::BadRequest,
                                concat!("Invalid ", $param, " in path"),
                            ),
                        );
                        Err(actix_web::error::InternalError::from_response(
                            concat!("Invalid ", $param, " in path"),
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeUserIdI64, "id");
define_safe_i64_extractor!(SafeModuleIdI64, "module_id");
define_safe_i64_extractor!(SafeTopicIdI64, "topic_id");
define_safe_i64_extractor!(SafeMaterialIdI64, "material_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::FromRequest;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_valid_id() {
        let req = TestRequest::default()
            .param("module_id", "42")
            .to_http_request();
        let extracted = SafeModuleIdI64::extract(&req).await.unwrap();
        assert_eq!(extracted.0, 42);
    }

    #[actix_web::test]
    async fn test_rejects_non_numeric_id() {
        let req = TestRequest::default()
            .param("module_id", "abc")
            .to_http_request();
        assert!(SafeModuleIdI64::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_rejects_non_positive_id() {
        let req = TestRequest::default().param("id", "0").to_http_request();
        assert!(SafeUserIdI64::extract(&req).await.is_err());
    }
}
