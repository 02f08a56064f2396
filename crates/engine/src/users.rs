//! Users table.
//!
//! Rows are created at signup and never updated. The password column is
//! stored as given and must never leave the engine: callers only see
//! [`User`].

use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favourites::Entity")]
    Favourites,
}

impl Related<super::favourites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favourites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A registered user, without credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            is_active: model.is_active,
        }
    }
}

/// Fields required to register a user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

impl From<NewUser> for ActiveModel {
    fn from(user: NewUser) -> Self {
        Self {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(user.username),
            email: ActiveValue::Set(user.email),
            password: ActiveValue::Set(user.password),
            is_active: ActiveValue::Set(user.is_active),
        }
    }
}
