use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointAwards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointAwards::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PointAwards::UserId).uuid().not_null())
                    .col(ColumnDef::new(PointAwards::ActivityId).uuid().not_null())
                    .col(ColumnDef::new(PointAwards::Reason).string().not_null())
                    .col(ColumnDef::new(PointAwards::Amount).integer().not_null())
                    .col(
                        ColumnDef::new(PointAwards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointAwards::Table, PointAwards::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PointAwards::Table, PointAwards::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        // Idempotency key: one award per (activity, user, reason).
        manager
            .create_index(
                Index::create()
                    .table(PointAwards::Table)
                    .col(PointAwards::ActivityId)
                    .col(PointAwards::UserId)
                    .col(PointAwards::Reason)
                    .name("uq_point_awards_activity_user_reason")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_point_awards_activity_user_reason")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(PointAwards::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PointAwards {
    Table,
    Id,
    UserId,
    ActivityId,
    Reason,
    Amount,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
}
