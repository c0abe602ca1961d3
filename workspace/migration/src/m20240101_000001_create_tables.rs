use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table. The unique key on email makes registration an
        // atomic insert-if-absent instead of a racy read-then-write.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username))
                    .col(string_uniq(Users::Email))
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Role))
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name))
                    .col(string_uniq(Categories::Slug))
                    .to_owned(),
            )
            .await?;

        // Create products table. Category is a denormalized slug, not a
        // foreign key, so no constraint is declared for it.
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::Name))
                    .col(string(Products::Category))
                    .col(decimal_len(Products::Price, 16, 2))
                    .col(string_null(Products::Description))
                    .col(string_null(Products::Image))
                    .col(double(Products::Ratings).default(0.0))
                    .col(boolean(Products::FlashSale).default(false))
                    .to_owned(),
            )
            .await?;

        // Create orders table
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(string_null(Orders::OrderedBy))
                    .col(json(Orders::Payload))
                    .to_owned(),
            )
            .await?;

        // Orders are listed per email, so index the lookup column.
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_ordered_by")
                    .table(Orders::Table)
                    .col(Orders::OrderedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Category,
    Price,
    Description,
    Image,
    Ratings,
    FlashSale,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderedBy,
    Payload,
}
