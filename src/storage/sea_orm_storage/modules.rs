use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{materials, modules, progress, topics};
use crate::errors::{LmsError, Result};
use crate::models::modules::{
    entities::Module,
    requests::{CreateModuleData, UpdateModuleData},
    responses::{ModuleDetailResponse, ModuleListItem, TopicNode},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建模块
    pub async fn create_module_impl(&self, data: CreateModuleData) -> Result<Module> {
        let now = chrono::Utc::now().timestamp();

        let model = modules::ActiveModel {
            author_id: Set(data.author_id),
            title: Set(data.title),
            short_description: Set(data.short_description),
            image_url: Set(data.image_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建模块失败: {e}")))?;

        let author = self.author_username(result.author_id).await?;
        Ok(result.into_module(author))
    }

    /// 通过 ID 获取模块
    pub async fn get_module_by_id_impl(&self, id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询模块失败: {e}")))?;

        Ok(result.map(|(module, author)| module.into_module(author.map(|a| a.username))))
    }

    /// 列出模块（不附带进度）
    pub async fn list_modules_impl(&self) -> Result<Vec<ModuleListItem>> {
        let rows = Modules::find()
            .find_also_related(Users)
            .order_by_asc(modules::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询模块列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(module, author)| ModuleListItem {
                module: module.into_module(author.map(|a| a.username)),
                completed_materials: None,
                total_materials: None,
            })
            .collect())
    }

    /// 列出模块并附带指定用户的完成进度
    pub async fn list_modules_with_progress_impl(&self, user_id: i64) -> Result<Vec<ModuleListItem>> {
        let rows = Modules::find()
            .find_also_related(Users)
            .order_by_asc(modules::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询模块列表失败: {e}")))?;

        let mut items = Vec::with_capacity(rows.len());
        for (module, author) in rows {
            let total = self.count_module_materials(module.id).await?;
            let completed = self.count_completed_materials(user_id, module.id).await?;

            items.push(ModuleListItem {
                module: module.into_module(author.map(|a| a.username)),
                completed_materials: Some(completed as i64),
                total_materials: Some(total as i64),
            });
        }

        Ok(items)
    }

    /// 获取模块详情（主题 + 材料树）
    pub async fn get_module_detail_impl(&self, id: i64) -> Result<Option<ModuleDetailResponse>> {
        let Some((module, author)) = Modules::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询模块失败: {e}")))?
        else {
            return Ok(None);
        };

        let topic_rows = Topics::find()
            .filter(topics::Column::ModuleId.eq(id))
            .order_by_asc(topics::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询主题列表失败: {e}")))?;

        let topic_ids: Vec<i64> = topic_rows.iter().map(|t| t.id).collect();
        let mut materials_by_topic: HashMap<i64, Vec<_>> = HashMap::new();

        if !topic_ids.is_empty() {
            let material_rows = Materials::find()
                .filter(materials::Column::TopicId.is_in(topic_ids))
                .order_by_asc(materials::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| LmsError::database_operation(format!("查询材料列表失败: {e}")))?;

            for material in material_rows {
                materials_by_topic
                    .entry(material.topic_id)
                    .or_default()
                    .push(material.into_material());
            }
        }

        let topics = topic_rows
            .into_iter()
            .map(|topic| TopicNode {
                id: topic.id,
                title: topic.title,
                materials: materials_by_topic.remove(&topic.id).unwrap_or_default(),
            })
            .collect();

        Ok(Some(ModuleDetailResponse {
            module: module.into_module(author.map(|a| a.username)),
            topics,
        }))
    }

    /// 更新模块
    pub async fn update_module_impl(&self, id: i64, data: UpdateModuleData) -> Result<Option<Module>> {
        let Some(existing) = Modules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询模块失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: modules::ActiveModel = existing.into();
        model.title = Set(data.title);
        model.short_description = Set(data.short_description);
        if let Some(image_url) = data.image_url {
            model.image_url = Set(image_url);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新模块失败: {e}")))?;

        let author = self.author_username(updated.author_id).await?;
        Ok(Some(updated.into_module(author)))
    }

    /// 删除模块（外键级联删除主题、材料与进度）
    pub async fn delete_module_impl(&self, id: i64) -> Result<bool> {
        let result = Modules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除模块失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询模块作者的用户名
    async fn author_username(&self, author_id: i64) -> Result<Option<String>> {
        let author = Users::find_by_id(author_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询模块作者失败: {e}")))?;

        Ok(author.map(|a| a.username))
    }

    /// 统计模块下的材料总数
    async fn count_module_materials(&self, module_id: i64) -> Result<u64> {
        Materials::find()
            .join(JoinType::InnerJoin, materials::Relation::Topic.def())
            .filter(topics::Column::ModuleId.eq(module_id))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("统计材料数量失败: {e}")))
    }

    /// 统计用户在模块内已完成的材料数
    async fn count_completed_materials(&self, user_id: i64, module_id: i64) -> Result<u64> {
        Progress::find()
            .filter(progress::Column::UserId.eq(user_id))
            .join(JoinType::InnerJoin, progress::Relation::Material.def())
            .join(JoinType::InnerJoin, materials::Relation::Topic.def())
            .filter(topics::Column::ModuleId.eq(module_id))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("统计完成进度失败: {e}")))
    }
}
