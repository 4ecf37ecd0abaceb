use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(PointAwards::Table)
                    .col(PointAwards::UserId)
                    .name("idx_point_awards_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Activities::Table)
                    .col(Activities::Status)
                    .col(Activities::CreatedAt)
                    .name("idx_activities_status_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_activities_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_point_awards_user_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum PointAwards {
    Table,
    UserId,
}

#[derive(Iden)]
enum Activities {
    Table,
    Status,
    CreatedAt,
}
