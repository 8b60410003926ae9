use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::topics::ActiveModel;
use crate::errors::{LmsError, Result};
use crate::models::topics::entities::Topic;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 在模块下创建主题
    pub async fn create_topic_impl(&self, module_id: i64, title: String) -> Result<Topic> {
        let model = ActiveModel {
            module_id: Set(module_id),
            title: Set(title),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建主题失败: {e}")))?;

        Ok(result.into_topic())
    }

    /// 通过 ID 获取主题
    pub async fn get_topic_by_id_impl(&self, id: i64) -> Result<Option<Topic>> {
        let result = Topics::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询主题失败: {e}")))?;

        Ok(result.map(|m| m.into_topic()))
    }

    /// 删除主题（外键级联删除其材料）
    pub async fn delete_topic_impl(&self, id: i64) -> Result<bool> {
        let result = Topics::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除主题失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
