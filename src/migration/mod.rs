//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_teams;
mod m20240301_000003_create_zones;
mod m20240301_000004_create_worksheets;
mod m20240301_000005_create_photos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_teams::Migration),
            Box::new(m20240301_000003_create_zones::Migration),
            Box::new(m20240301_000004_create_worksheets::Migration),
            Box::new(m20240301_000005_create_photos::Migration),
        ]
    }
}
