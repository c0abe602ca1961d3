use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Represents a catalog item.
/// `category` holds the slug of the category the product belongs to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Soft foreign key on `categories.slug`.
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Aggregate customer rating, used for the top-rated listing.
    pub ratings: f64,
    pub flash_sale: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
