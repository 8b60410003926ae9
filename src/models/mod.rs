//! 数据模型定义
//!
//! 按资源拆分：requests 为入参模型，responses 为出参模型，entities 为业务实体。

pub mod auth;
pub mod common;
pub mod materials;
pub mod modules;
pub mod progress;
pub mod topics;
pub mod users;

pub use common::response::ApiResponse;

use serde::Serialize;

/// 业务错误码，随 ApiResponse 一起返回
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 400
    BadRequest = 40000,
    UserNameInvalid = 40001,
    UserPasswordInvalid = 40002,
    FileTypeNotAllowed = 40003,
    FileSizeExceeded = 40004,
    MultifileUploadNotAllowed = 40005,
    CanNotDeleteCurrentUser = 40006,
    RoleNotAllowed = 40007,

    // 401
    Unauthorized = 40100,
    AuthFailed = 40101,

    // 403
    Forbidden = 40300,

    // 404
    NotFound = 40400,
    UserNotFound = 40401,
    ModuleNotFound = 40402,
    TopicNotFound = 40403,
    MaterialNotFound = 40404,
    FileNotFound = 40405,

    // 409
    UserNameAlreadyExists = 40901,

    // 500
    InternalServerError = 50000,
    RegisterFailed = 50001,
    UserUpdateFailed = 50002,
    UserDeleteFailed = 50003,
    ModuleCreationFailed = 50004,
    ModuleUpdateFailed = 50005,
    ModuleDeleteFailed = 50006,
    TopicCreationFailed = 50007,
    TopicDeleteFailed = 50008,
    MaterialCreationFailed = 50009,
    MaterialUpdateFailed = 50010,
    MaterialDeleteFailed = 50011,
    ProgressUpdateFailed = 50012,
    FileUploadFailed = 50013,
}

/// 记录程序启动时间，供运行时信息使用
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
