//! Create worksheets table.
//!
//! Zone and team are plain nullable columns without foreign keys: a worksheet
//! outlives a deleted zone or team and simply stops resolving.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Worksheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Worksheets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Worksheets::Number)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Worksheets::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Worksheets::ZoneId).integer())
                    .col(ColumnDef::new(Worksheets::TeamId).integer())
                    .col(
                        ColumnDef::new(Worksheets::Created)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_worksheets_zone_id")
                    .table(Worksheets::Table)
                    .col(Worksheets::ZoneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_worksheets_team_id")
                    .table(Worksheets::Table)
                    .col(Worksheets::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_worksheets_created")
                    .table(Worksheets::Table)
                    .col(Worksheets::Created)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Worksheets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Worksheets {
    Table,
    Id,
    Number,
    Name,
    ZoneId,
    TeamId,
    Created,
}
