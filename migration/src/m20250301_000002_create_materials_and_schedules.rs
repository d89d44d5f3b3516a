use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::{Courses, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 课程资料表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Materials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Materials::Title).string().not_null())
                    .col(ColumnDef::new(Materials::Description).text().null())
                    .col(ColumnDef::new(Materials::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Materials::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Materials::FileUrl).string().null())
                    .col(ColumnDef::new(Materials::FileName).string().null())
                    .col(ColumnDef::new(Materials::StoredName).string().null())
                    .col(ColumnDef::new(Materials::FileSize).big_integer().null())
                    .col(
                        ColumnDef::new(Materials::MaterialType)
                            .string()
                            .not_null()
                            .default("document"),
                    )
                    .col(ColumnDef::new(Materials::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Materials::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Materials::Table, Materials::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Materials::Table, Materials::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 课表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::DayOfWeek).small_integer().not_null())
                    .col(ColumnDef::new(Schedules::StartTime).string_len(8).not_null())
                    .col(ColumnDef::new(Schedules::EndTime).string_len(8).not_null())
                    .col(ColumnDef::new(Schedules::Classroom).string().null())
                    .col(ColumnDef::new(Schedules::GroupName).string().null())
                    .col(ColumnDef::new(Schedules::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_materials_course_id")
                    .table(Materials::Table)
                    .col(Materials::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schedules_day_start")
                    .table(Schedules::Table)
                    .col(Schedules::DayOfWeek)
                    .col(Schedules::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Materials::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Materials {
    #[sea_orm(iden = "materials")]
    Table,
    Id,
    Title,
    Description,
    CourseId,
    TeacherId,
    FileUrl,
    FileName,
    StoredName,
    FileSize,
    #[sea_orm(iden = "type")]
    MaterialType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    CourseId,
    TeacherId,
    DayOfWeek,
    StartTime,
    EndTime,
    Classroom,
    GroupName,
    CreatedAt,
    UpdatedAt,
}
