use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{materials, topics};
use crate::errors::{LmsError, Result};
use crate::models::materials::{
    entities::Material,
    requests::{CreateMaterialData, UpdateMaterialData},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
    Set,
};

impl SeaOrmStorage {
    /// 创建材料
    pub async fn create_material_impl(&self, data: CreateMaterialData) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = materials::ActiveModel {
            topic_id: Set(data.topic_id),
            title: Set(data.title),
            content: Set(data.content),
            youtube_url: Set(data.youtube_url),
            image_url: Set(data.image_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建材料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 获取模块内的指定材料，材料不属于该模块时返回 None
    pub async fn get_material_in_module_impl(
        &self,
        module_id: i64,
        material_id: i64,
    ) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .join(JoinType::InnerJoin, materials::Relation::Topic.def())
            .filter(topics::Column::ModuleId.eq(module_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询材料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 更新材料
    pub async fn update_material_impl(
        &self,
        id: i64,
        data: UpdateMaterialData,
    ) -> Result<Option<Material>> {
        let Some(existing) = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询材料失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: materials::ActiveModel = existing.into();
        model.title = Set(data.title);
        model.content = Set(data.content);
        model.youtube_url = Set(data.youtube_url);
        if let Some(image_url) = data.image_url {
            model.image_url = Set(Some(image_url));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新材料失败: {e}")))?;

        Ok(Some(updated.into_material()))
    }

    /// 删除材料（外键级联删除进度记录）
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除材料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
