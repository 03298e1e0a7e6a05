//! Create photos table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Photos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Photos::WorksheetId).integer().not_null())
                    .col(ColumnDef::new(Photos::RunningNumber).integer().not_null())
                    .col(ColumnDef::new(Photos::FileName).string_len(255).not_null())
                    .col(ColumnDef::new(Photos::Location).string().not_null())
                    .col(
                        ColumnDef::new(Photos::Created)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Running numbers are unique per worksheet
        manager
            .create_index(
                Index::create()
                    .name("idx_photos_worksheet_running_number")
                    .table(Photos::Table)
                    .col(Photos::WorksheetId)
                    .col(Photos::RunningNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Photos {
    Table,
    Id,
    WorksheetId,
    RunningNumber,
    FileName,
    Location,
    Created,
}
