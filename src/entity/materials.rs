//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub course_id: i64,
    pub teacher_id: i64,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub stored_name: Option<String>,
    pub file_size: Option<i64>,
    #[sea_orm(column_name = "type")]
    pub material_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::{Material, MaterialType};

        Material {
            id: self.id,
            title: self.title,
            description: self.description,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            file_url: self.file_url,
            file_name: self.file_name,
            stored_name: self.stored_name,
            file_size: self.file_size,
            material_type: self.material_type.parse().unwrap_or(MaterialType::Other),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
