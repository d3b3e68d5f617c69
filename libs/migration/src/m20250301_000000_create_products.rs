use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Gender::Enum)
                    .values([Gender::Men, Gender::Women, Gender::Kid, Gender::Unisex])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(text_uniq(Products::Title))
                    .col(double(Products::Price).default(0.0))
                    .col(text_null(Products::Description))
                    .col(text_uniq(Products::Slug))
                    .col(integer(Products::Stock).default(0))
                    .col(array(Products::Sizes, ColumnType::Text))
                    .col(
                        ColumnDef::new(Products::Gender)
                            .enumeration(
                                Gender::Enum,
                                [Gender::Men, Gender::Women, Gender::Kid, Gender::Unisex],
                            )
                            .not_null(),
                    )
                    .col(array(Products::Tags, ColumnType::Text))
                    .check(Expr::col(Products::Price).gte(0))
                    .check(Expr::col(Products::Slug).ne(""))
                    .check(Expr::col(Products::Stock).gte(0))
                    .to_owned(),
            )
            .await?;

        // Backs the case-insensitive title/slug lookup
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_products_lower_title ON products (LOWER(title));
                CREATE INDEX IF NOT EXISTS idx_products_lower_slug ON products (LOWER(slug));
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Gender::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    Title,
    Price,
    Description,
    Slug,
    Stock,
    Sizes,
    Gender,
    Tags,
}

#[derive(DeriveIden)]
enum Gender {
    #[sea_orm(iden = "product_gender")]
    Enum,
    #[sea_orm(iden = "men")]
    Men,
    #[sea_orm(iden = "women")]
    Women,
    #[sea_orm(iden = "kid")]
    Kid,
    #[sea_orm(iden = "unisex")]
    Unisex,
}
