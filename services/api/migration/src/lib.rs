use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users;
mod m20260601_000002_create_activities;
mod m20260601_000003_create_participations;
mod m20260601_000004_create_reviews;
mod m20260601_000005_create_point_awards;
mod m20260601_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_users::Migration),
            Box::new(m20260601_000002_create_activities::Migration),
            Box::new(m20260601_000003_create_participations::Migration),
            Box::new(m20260601_000004_create_reviews::Migration),
            Box::new(m20260601_000005_create_point_awards::Migration),
            Box::new(m20260601_000006_add_indexes::Migration),
        ]
    }
}
