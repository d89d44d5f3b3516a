//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{PortalError, Result};
use crate::models::materials::{
    entities::Material,
    requests::{NewMaterial, StoredFile, UpdateMaterialRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建资料
    pub async fn create_material_impl(&self, req: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        // 上传文件优先于外部链接
        let (file_url, file_name, stored_name, file_size) = match req.file {
            Some(file) => (
                Some(file.public_url()),
                Some(file.original_name),
                Some(file.stored_name),
                Some(file.size),
            ),
            None => (req.file_url, None, None, None),
        };

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            course_id: Set(req.course_id),
            teacher_id: Set(req.teacher_id),
            file_url: Set(file_url),
            file_name: Set(file_name),
            stored_name: Set(stored_name),
            file_size: Set(file_size),
            material_type: Set(req.material_type.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出资料，按创建时间降序
    pub async fn list_materials_impl(&self, course_id: Option<i64>) -> Result<Vec<Material>> {
        let mut select = Materials::find();

        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let materials = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新资料信息
    pub async fn update_material_impl(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        if self.get_material_by_id_impl(material_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(material_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(material_type) = update.material_type {
            model.material_type = Set(material_type.to_string());
        }
        if let Some(file_url) = update.file_url {
            model.file_url = Set(Some(file_url));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新资料失败: {e}")))?;

        Ok(Some(result.into_material()))
    }

    /// 替换资料文件
    pub async fn replace_material_file_impl(
        &self,
        material_id: i64,
        file: StoredFile,
    ) -> Result<Option<Material>> {
        if self.get_material_by_id_impl(material_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(material_id),
            file_url: Set(Some(file.public_url())),
            file_name: Set(Some(file.original_name)),
            stored_name: Set(Some(file.stored_name)),
            file_size: Set(Some(file.size)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("替换资料文件失败: {e}")))?;

        Ok(Some(result.into_material()))
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use crate::models::{
        materials::{
            entities::MaterialType,
            requests::{NewMaterial, StoredFile, UpdateMaterialRequest},
        },
        users::entities::UserRole,
    };
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_material_lifecycle() {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let course = fixtures::course(&storage, "CS101").await;

        let material = storage
            .create_material(NewMaterial {
                title: "Lecture 1".into(),
                description: None,
                course_id: course.id,
                teacher_id: teacher.id,
                material_type: MaterialType::Document,
                file: Some(StoredFile {
                    stored_name: "abc.pdf".into(),
                    original_name: "lecture1.pdf".into(),
                    size: 1024,
                }),
                file_url: Some("https://ignored.example.com".into()),
            })
            .await
            .unwrap();
        assert_eq!(material.file_url.as_deref(), Some("/uploads/abc.pdf"));
        assert_eq!(material.file_name.as_deref(), Some("lecture1.pdf"));

        let updated = storage
            .update_material(
                material.id,
                UpdateMaterialRequest {
                    title: Some("Lecture 1 (rev)".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Lecture 1 (rev)");
        assert_eq!(updated.stored_name.as_deref(), Some("abc.pdf"));

        let replaced = storage
            .replace_material_file(
                material.id,
                StoredFile {
                    stored_name: "def.mp4".into(),
                    original_name: "lecture1.mp4".into(),
                    size: 4096,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.file_size, Some(4096));

        assert_eq!(storage.list_materials(Some(course.id)).await.unwrap().len(), 1);
        assert!(storage.delete_material(material.id).await.unwrap());
        assert!(!storage.delete_material(material.id).await.unwrap());
        assert!(storage.get_material_by_id(material.id).await.unwrap().is_none());
    }
}
