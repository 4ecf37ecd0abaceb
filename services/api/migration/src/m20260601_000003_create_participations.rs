use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participations::ActivityId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participations::UserId).uuid().not_null())
                    .col(ColumnDef::new(Participations::OtpCode).string())
                    .col(
                        ColumnDef::new(Participations::OtpExpiresAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(Participations::OtpVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participations::ActivityStarted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participations::ActivityCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participations::PointsAwarded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Participations::ActivityId)
                            .col(Participations::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Participations {
    Table,
    ActivityId,
    UserId,
    OtpCode,
    OtpExpiresAt,
    OtpVerified,
    ActivityStarted,
    ActivityCompleted,
    PointsAwarded,
    CreatedAt,
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
