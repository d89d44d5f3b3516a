use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{PortalError, Result};
use crate::models::users::{
    entities::{User, UserBrief},
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password),
            full_name: Set(req.full_name),
            role: Set(req.role.to_string()),
            group_name: Set(req.group_name),
            avatar_url: Set(req.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                PortalError::conflict("该邮箱已被注册")
            } else {
                PortalError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户资料（仅更新提供的字段）
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(group_name) = update.group_name {
            model.group_name = Set(Some(group_name));
        }
        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(Some(avatar_url));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新用户失败: {e}")))?;

        Ok(Some(result.into_user()))
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计用户数量失败: {e}")))
    }

    /// 批量获取用户摘要
    pub async fn list_user_briefs_impl(&self, ids: &[i64]) -> Result<Vec<UserBrief>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_brief()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use crate::errors::PortalError;
    use crate::models::users::{entities::UserRole, requests::UpdateUserRequest};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = fixtures::storage().await;
        fixtures::user(&storage, "dup@example.com", UserRole::Student).await;

        let err = storage
            .create_user(fixtures::user_request("dup@example.com", UserRole::Teacher))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_user_keeps_unset_fields() {
        let storage = fixtures::storage().await;
        let user = fixtures::user(&storage, "s@example.com", UserRole::Student).await;

        let updated = storage
            .update_user(
                user.id,
                UpdateUserRequest {
                    group_name: Some("CS-101".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.group_name.as_deref(), Some("CS-101"));
        assert_eq!(updated.full_name, user.full_name);
        assert!(
            storage
                .update_user(9999, UpdateUserRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_user_briefs() {
        let storage = fixtures::storage().await;
        let a = fixtures::user(&storage, "a@example.com", UserRole::Student).await;
        fixtures::user(&storage, "b@example.com", UserRole::Student).await;

        let briefs = storage.list_user_briefs(&[a.id]).await.unwrap();
        assert_eq!(briefs.len(), 1);
        assert_eq!(briefs[0].email, "a@example.com");
        assert!(storage.list_user_briefs(&[]).await.unwrap().is_empty());
        assert_eq!(storage.count_users().await.unwrap(), 2);
    }
}
