//! multipart/form-data 表单解析
//!
//! 模块和材料的创建/更新接口都是带图片的表单，这里统一做
//! 文本字段收集和图片落盘（扩展名 + 魔术字节 + 大小校验）。

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::LmsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_magic_bytes;

// 单个文本字段的最大长度
const MAX_TEXT_FIELD_SIZE: usize = 65536;

/// 已落盘的上传图片
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub stored_name: String,
    /// 对外可访问的 URL（/uploads/{stored_name}）
    pub url: String,
}

/// 解析后的表单：文本字段 + 可选图片
#[derive(Debug, Default)]
pub struct ImageForm {
    pub fields: HashMap<String, String>,
    pub image: Option<StoredImage>,
}

impl ImageForm {
    /// 取必填文本字段，缺失或为空时返回 400 响应
    pub fn require(&self, name: &str) -> Result<&str, HttpResponse> {
        match self.fields.get(name).map(|s| s.trim()) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::BadRequest,
                format!("Field '{name}' is required"),
            ))),
        }
    }

    /// 取可选文本字段，空字符串视为缺省
    pub fn optional(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// 表单校验或入库失败时清理已落盘的图片
    pub fn discard_image(&self) {
        if let Some(image) = self.image.as_ref() {
            remove_stored_image(&image.url);
        }
    }
}

/// 解析 multipart 表单，文本字段收集到 map，`image` 字段落盘
///
/// 出错时返回可以直接回给客户端的 HttpResponse。
pub async fn parse_image_form(mut payload: Multipart) -> Result<ImageForm, HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let mut form = ImageForm::default();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                form.discard_image();
                tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::BadRequest,
                    "Malformed multipart payload",
                )));
            }
        };
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "image" {
            if form.image.is_some() {
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one image can be uploaded at a time",
                )));
            }

            // 先获取原始文件名并校验扩展名
            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "Image type not allowed",
                )));
            }

            // 确保上传目录存在
            if !Path::new(upload_dir).exists()
                && let Err(e) = fs::create_dir_all(upload_dir)
            {
                tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                return Err(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(
                        ErrorCode::FileUploadFailed,
                        "创建上传目录失败",
                    ),
                ));
            }

            let stored_name = format!(
                "{}-{}{}",
                chrono::Utc::now().timestamp(),
                Uuid::new_v4(),
                extension
            );
            let file_path = format!("{upload_dir}/{stored_name}");
            let mut f = match fs::File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                    return Err(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件创建失败"),
                    ));
                }
            };

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = match chunk {
                    Ok(data) => data,
                    Err(e) => {
                        let _ = fs::remove_file(&file_path);
                        tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                        return Err(HttpResponse::InternalServerError().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileUploadFailed,
                                "读取上传内容失败",
                            ),
                        ));
                    }
                };

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        let _ = fs::remove_file(&file_path);
                        return Err(HttpResponse::BadRequest().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileTypeNotAllowed,
                                "文件内容与扩展名不匹配",
                            ),
                        ));
                    }
                }

                total_size += data.len();
                // 校验大小
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "Image size exceeds the limit",
                    )));
                }
                if let Err(e) = f.write_all(&data) {
                    let _ = fs::remove_file(&file_path);
                    tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                    return Err(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件写入失败"),
                    ));
                }
            }

            // 空文件不会产生任何 chunk，同样按魔术字节不匹配拒绝
            if first_chunk {
                let _ = fs::remove_file(&file_path);
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "文件内容与扩展名不匹配",
                )));
            }

            form.image = Some(StoredImage {
                url: format!("/uploads/{stored_name}"),
                stored_name,
            });
        } else if !name.is_empty() {
            // 普通文本字段
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = match chunk {
                    Ok(data) => data,
                    Err(e) => {
                        // 中途出错时残缺的值不能当作有效字段
                        form.discard_image();
                        tracing::error!("{}", LmsError::file_operation(format!("{e}")));
                        return Err(HttpResponse::BadRequest().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::BadRequest,
                                format!("Field '{name}' could not be read"),
                            ),
                        ));
                    }
                };
                if value.len() + data.len() > MAX_TEXT_FIELD_SIZE {
                    form.discard_image();
                    return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                        ErrorCode::BadRequest,
                        format!("Field '{name}' is too large"),
                    )));
                }
                value.extend_from_slice(&data);
            }
            match String::from_utf8(value) {
                Ok(text) => {
                    form.fields.insert(name, text);
                }
                Err(_) => {
                    form.discard_image();
                    return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                        ErrorCode::BadRequest,
                        format!("Field '{name}' is not valid UTF-8"),
                    )));
                }
            }
        }
    }

    Ok(form)
}

/// 删除已替换的旧图片，失败只记日志
///
/// 只接受 /uploads/{name} 形式的 URL，防止路径穿越。
pub fn remove_stored_image(image_url: &str) {
    let Some(stored_name) = image_url.strip_prefix("/uploads/") else {
        return;
    };
    if stored_name.is_empty() || stored_name.contains('/') || stored_name.contains("..") {
        return;
    }

    let config = AppConfig::get();
    let file_path = format!("{}/{}", config.upload.dir, stored_name);
    if let Err(e) = fs::remove_file(&file_path) {
        tracing::warn!("Failed to remove replaced image {}: {}", file_path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::FromRequest;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::web::Bytes;

    async fn parse_body(body: Bytes) -> Result<ImageForm, HttpResponse> {
        let (req, mut payload) = TestRequest::default()
            .insert_header(("content-type", "multipart/form-data; boundary=BOUND"))
            .set_payload(body)
            .to_http_parts();
        let multipart = Multipart::from_request(&req, &mut payload).await.unwrap();
        parse_image_form(multipart).await
    }

    #[actix_web::test]
    async fn test_empty_image_rejected() {
        let body = Bytes::from_static(
            b"--BOUND\r\n\
              content-disposition: form-data; name=\"image\"; filename=\"empty.png\"\r\n\
              \r\n\
              \r\n\
              --BOUND--\r\n",
        );
        let response = parse_body(body).await.err().expect("empty image accepted");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_wrong_magic_bytes_rejected() {
        let body = Bytes::from_static(
            b"--BOUND\r\n\
              content-disposition: form-data; name=\"image\"; filename=\"fake.png\"\r\n\
              \r\n\
              not a png at all\r\n\
              --BOUND--\r\n",
        );
        let response = parse_body(body).await.err().expect("fake png accepted");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_truncated_text_field_rejected() {
        // 流在字段结束边界前中断，残缺的值不能进 map
        let body = Bytes::from_static(
            b"--BOUND\r\n\
              content-disposition: form-data; name=\"title\"\r\n\
              \r\n\
              partial",
        );
        assert!(parse_body(body).await.is_err());
    }

    #[actix_web::test]
    async fn test_valid_png_stored_then_discarded() {
        let body = Bytes::from_static(
            b"--BOUND\r\n\
              content-disposition: form-data; name=\"image\"; filename=\"pixel.png\"\r\n\
              \r\n\
              \x89PNG\r\n\x1a\npayload-bytes\r\n\
              --BOUND--\r\n",
        );
        let form = parse_body(body).await.expect("valid png rejected");
        let image = form.image.as_ref().expect("image missing");

        let config = AppConfig::get();
        let file_path = format!("{}/{}", config.upload.dir, image.stored_name);
        assert!(Path::new(&file_path).exists());

        form.discard_image();
        assert!(!Path::new(&file_path).exists());
    }
}
