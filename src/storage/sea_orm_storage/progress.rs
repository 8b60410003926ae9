use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{materials, progress, topics};
use crate::errors::{LmsError, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 标记材料完成，重复标记返回 false（幂等，依赖唯一索引）
    pub async fn mark_material_complete_impl(
        &self,
        user_id: i64,
        material_id: i64,
    ) -> Result<bool> {
        let model = progress::ActiveModel {
            user_id: Set(user_id),
            material_id: Set(material_id),
            completed_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = Progress::insert(model)
            .on_conflict(
                OnConflict::columns([progress::Column::UserId, progress::Column::MaterialId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(LmsError::database_operation(format!("标记材料完成失败: {e}"))),
        }
    }

    /// 列出用户在模块内已完成的材料 ID
    pub async fn list_completed_material_ids_impl(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Vec<i64>> {
        let ids = Progress::find()
            .select_only()
            .column(progress::Column::MaterialId)
            .filter(progress::Column::UserId.eq(user_id))
            .join(JoinType::InnerJoin, progress::Relation::Material.def())
            .join(JoinType::InnerJoin, materials::Relation::Topic.def())
            .filter(topics::Column::ModuleId.eq(module_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询学习进度失败: {e}")))?;

        Ok(ids)
    }
}
