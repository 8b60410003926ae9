//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod materials;
mod modules;
mod progress;
mod topics;
mod users;

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    materials::{
        entities::Material,
        requests::{CreateMaterialData, UpdateMaterialData},
    },
    modules::{
        entities::Module,
        requests::{CreateModuleData, UpdateModuleData},
        responses::{ModuleDetailResponse, ModuleListItem},
    },
    topics::entities::Topic,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(
        &self,
        username: String,
        password_hash: String,
        role: UserRole,
    ) -> Result<User> {
        self.create_user_impl(username, password_hash, role).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users(&self, search: Option<String>) -> Result<Vec<User>> {
        self.list_users_impl(search).await
    }

    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<bool> {
        self.update_user_role_impl(id, role).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 模块
    async fn create_module(&self, data: CreateModuleData) -> Result<Module> {
        self.create_module_impl(data).await
    }

    async fn get_module_by_id(&self, id: i64) -> Result<Option<Module>> {
        self.get_module_by_id_impl(id).await
    }

    async fn list_modules(&self) -> Result<Vec<ModuleListItem>> {
        self.list_modules_impl().await
    }

    async fn list_modules_with_progress(&self, user_id: i64) -> Result<Vec<ModuleListItem>> {
        self.list_modules_with_progress_impl(user_id).await
    }

    async fn get_module_detail(&self, id: i64) -> Result<Option<ModuleDetailResponse>> {
        self.get_module_detail_impl(id).await
    }

    async fn update_module(&self, id: i64, data: UpdateModuleData) -> Result<Option<Module>> {
        self.update_module_impl(id, data).await
    }

    async fn delete_module(&self, id: i64) -> Result<bool> {
        self.delete_module_impl(id).await
    }

    // 主题
    async fn create_topic(&self, module_id: i64, title: String) -> Result<Topic> {
        self.create_topic_impl(module_id, title).await
    }

    async fn get_topic_by_id(&self, id: i64) -> Result<Option<Topic>> {
        self.get_topic_by_id_impl(id).await
    }

    async fn delete_topic(&self, id: i64) -> Result<bool> {
        self.delete_topic_impl(id).await
    }

    // 材料
    async fn create_material(&self, data: CreateMaterialData) -> Result<Material> {
        self.create_material_impl(data).await
    }

    async fn get_material_in_module(
        &self,
        module_id: i64,
        material_id: i64,
    ) -> Result<Option<Material>> {
        self.get_material_in_module_impl(module_id, material_id)
            .await
    }

    async fn update_material(&self, id: i64, data: UpdateMaterialData) -> Result<Option<Material>> {
        self.update_material_impl(id, data).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 学习进度
    async fn mark_material_complete(&self, user_id: i64, material_id: i64) -> Result<bool> {
        self.mark_material_complete_impl(user_id, material_id).await
    }

    async fn list_completed_material_ids(&self, user_id: i64, module_id: i64) -> Result<Vec<i64>> {
        self.list_completed_material_ids_impl(user_id, module_id)
            .await
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 测试用的内存 SQLite 实例
    ///
    /// 固定单连接，内存库在池子里的每个连接各自为政。
    pub(crate) async fn new_in_memory() -> Self {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:").expect("sqlite url");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .expect("connect in-memory sqlite");
        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Migrator::up(&db, None).await.expect("run migrations");
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::requests::CreateMaterialData;
    use crate::models::modules::requests::CreateModuleData;

    async fn seed_module(storage: &SeaOrmStorage, author_id: i64) -> Module {
        storage
            .create_module(CreateModuleData {
                author_id,
                title: "Rust".to_string(),
                short_description: "intro".to_string(),
                image_url: "/uploads/cover.png".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_material(storage: &SeaOrmStorage, topic_id: i64) -> Material {
        storage
            .create_material(CreateMaterialData {
                topic_id,
                title: "ownership".to_string(),
                content: "text".to_string(),
                youtube_url: None,
                image_url: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        storage
            .create_user("alice".to_string(), "hash-a".to_string(), UserRole::User)
            .await
            .unwrap();
        let duplicate = storage
            .create_user("alice".to_string(), "hash-b".to_string(), UserRole::User)
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_progress_is_per_user_and_idempotent() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = storage
            .create_user("teacher".to_string(), "h".to_string(), UserRole::Teacher)
            .await
            .unwrap();
        let alice = storage
            .create_user("alice".to_string(), "h".to_string(), UserRole::User)
            .await
            .unwrap();
        let bob = storage
            .create_user("bob".to_string(), "h".to_string(), UserRole::User)
            .await
            .unwrap();
        let module = seed_module(&storage, teacher.id).await;
        let topic = storage
            .create_topic(module.id, "basics".to_string())
            .await
            .unwrap();
        let material = seed_material(&storage, topic.id).await;

        // 首次标记插入，重复标记是幂等的 no-op
        assert!(
            storage
                .mark_material_complete(alice.id, material.id)
                .await
                .unwrap()
        );
        assert!(
            !storage
                .mark_material_complete(alice.id, material.id)
                .await
                .unwrap()
        );

        let alice_done = storage
            .list_completed_material_ids(alice.id, module.id)
            .await
            .unwrap();
        assert_eq!(alice_done, vec![material.id]);

        let bob_done = storage
            .list_completed_material_ids(bob.id, module.id)
            .await
            .unwrap();
        assert!(bob_done.is_empty());
    }

    #[tokio::test]
    async fn test_material_lookup_scoped_to_module() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = storage
            .create_user("teacher".to_string(), "h".to_string(), UserRole::Teacher)
            .await
            .unwrap();
        let first = seed_module(&storage, teacher.id).await;
        let second = seed_module(&storage, teacher.id).await;
        let topic = storage
            .create_topic(first.id, "basics".to_string())
            .await
            .unwrap();
        let material = seed_material(&storage, topic.id).await;

        assert!(
            storage
                .get_material_in_module(first.id, material.id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            storage
                .get_material_in_module(second.id, material.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
