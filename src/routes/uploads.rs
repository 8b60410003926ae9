//! 上传图片的静态访问路由
//!
//! 模块封面和材料插图都以 /uploads/{filename} 的 URL 存库，
//! 这里直接从上传目录读文件返回，不经过数据库。

use actix_web::{HttpResponse, Result as ActixResult, http::header, web};
use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::errors::LmsError;
use crate::models::{ApiResponse, ErrorCode};

// HTTP处理程序
pub async fn serve_upload(filename: web::Path<String>) -> ActixResult<HttpResponse> {
    let filename = filename.into_inner();

    // 只允许纯文件名，防止路径穿越
    if filename.is_empty() || filename.contains('/') || filename.contains("..") {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File not found",
        )));
    }

    let config = AppConfig::get();
    let file_path = format!("{}/{}", config.upload.dir, filename);

    if !Path::new(&file_path).is_file() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File not found",
        )));
    }

    match fs::read(&file_path) {
        Ok(buf) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, content_type_for(&filename)))
            .body(buf)),
        Err(e) => {
            tracing::error!("{}", LmsError::file_operation(format!("{e}")));
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            )
        }
    }
}

// 根据扩展名推断 Content-Type，未知类型按二进制流处理
fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

// 配置路由
pub fn configure_uploads_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads/{filename}", web::get().to(serve_upload));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type_for("cover.png"), "image/png");
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("anim.gif"), "image/gif");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
