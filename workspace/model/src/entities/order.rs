use sea_orm::entity::prelude::*;

/// Represents a submitted order.
/// The client document is stored verbatim in `payload`; `ordered_by` is
/// lifted out of it so the per-email listing stays a single indexed query.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Soft foreign key on `users.email`; absent when the client omitted it.
    pub ordered_by: Option<String>,
    pub payload: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
