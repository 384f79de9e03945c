//! Create bookings table
//!
//! CHECK constraints repeat the application-level field rules so a row that
//! slips past validation is still refused by SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Name)
                            .text()
                            .not_null()
                            .check(Expr::cust("length(trim(name)) > 0")),
                    )
                    .col(
                        ColumnDef::new(Bookings::Phone)
                            .text()
                            .not_null()
                            .check(Expr::cust(
                                "length(phone) BETWEEN 10 AND 15 AND phone NOT GLOB '*[^0-9]*'",
                            )),
                    )
                    .col(
                        ColumnDef::new(Bookings::Age)
                            .integer()
                            .not_null()
                            .check(Expr::col(Bookings::Age).gte(14)),
                    )
                    .col(
                        ColumnDef::new(Bookings::Date)
                            .text()
                            .not_null()
                            .check(Expr::cust("date(\"date\") IS \"date\"")),
                    )
                    .col(
                        ColumnDef::new(Bookings::Attractions)
                            .text()
                            .not_null()
                            .check(Expr::cust("length(attractions) > 0")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    Name,
    Phone,
    Age,
    Date,
    Attractions,
}
