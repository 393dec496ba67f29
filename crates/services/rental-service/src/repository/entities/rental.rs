//! Rental database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Rental;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rentals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: DateTimeUtc,
    /// NULL while the rental is open
    pub end_date: Option<DateTimeUtc>,
    pub user_id: i32,
    pub closed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Rental {
    fn from(model: Model) -> Self {
        Rental {
            id: model.id,
            date: model.date,
            end_date: model.end_date,
            user_id: model.user_id,
            closed: model.closed,
        }
    }
}
