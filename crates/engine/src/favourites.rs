//! User favourites.
//!
//! A [`Favourite`] links one user to one catalog entity. The table keeps a
//! nullable foreign key per catalog table (`id_peoples`, `id_planets`,
//! `id_vehicles`); the engine only ever talks in terms of a
//! [`FavouriteTarget`], so a row with zero or several keys set can only come
//! from outside the engine and is rejected on read.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, Person, Planet, Vehicle};

/// The catalog entity a favourite points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FavouriteTarget {
    Person(i32),
    Planet(i32),
    Vehicle(i32),
}

impl FavouriteTarget {
    /// Human readable entity name, used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Person(_) => "Person",
            Self::Planet(_) => "Planet",
            Self::Vehicle(_) => "Vehicle",
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::Person(id) | Self::Planet(id) | Self::Vehicle(id) => id,
        }
    }

    /// Foreign key column holding this kind of target.
    pub(crate) fn column(self) -> Column {
        match self {
            Self::Person(_) => Column::IdPeoples,
            Self::Planet(_) => Column::IdPlanets,
            Self::Vehicle(_) => Column::IdVehicles,
        }
    }

    fn columns(self) -> (Option<i32>, Option<i32>, Option<i32>) {
        match self {
            Self::Person(id) => (Some(id), None, None),
            Self::Planet(id) => (None, Some(id), None),
            Self::Vehicle(id) => (None, None, Some(id)),
        }
    }

    fn from_columns(
        id_peoples: Option<i32>,
        id_planets: Option<i32>,
        id_vehicles: Option<i32>,
    ) -> Option<Self> {
        match (id_peoples, id_planets, id_vehicles) {
            (Some(id), None, None) => Some(Self::Person(id)),
            (None, Some(id), None) => Some(Self::Planet(id)),
            (None, None, Some(id)) => Some(Self::Vehicle(id)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Favourite {
    pub id: i32,
    pub name: Option<String>,
    pub user_id: i32,
    pub target: FavouriteTarget,
}

/// The favourited entity, loaded alongside its favourite.
#[derive(Clone, Debug, PartialEq)]
pub enum FavouriteEntity {
    Person(Person),
    Planet(Planet),
    Vehicle(Vehicle),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FavouriteDetail {
    pub favourite: Favourite,
    /// `None` when the referenced row no longer exists.
    pub entity: Option<FavouriteEntity>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favourite")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub id_user: Option<i32>,
    pub id_peoples: Option<i32>,
    pub id_planets: Option<i32>,
    pub id_vehicles: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::IdUser",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::IdPeoples",
        to = "super::people::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    People,
    #[sea_orm(
        belongs_to = "super::planets::Entity",
        from = "Column::IdPlanets",
        to = "super::planets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Planets,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::IdVehicles",
        to = "super::vehicles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Vehicles,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::People.def()
    }
}

impl Related<super::planets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planets.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new(user_id: i32, target: FavouriteTarget, name: Option<String>) -> Self {
        let (id_peoples, id_planets, id_vehicles) = target.columns();
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            id_user: ActiveValue::Set(Some(user_id)),
            id_peoples: ActiveValue::Set(id_peoples),
            id_planets: ActiveValue::Set(id_planets),
            id_vehicles: ActiveValue::Set(id_vehicles),
        }
    }
}

impl TryFrom<Model> for Favourite {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let target =
            FavouriteTarget::from_columns(model.id_peoples, model.id_planets, model.id_vehicles)
                .ok_or(EngineError::InvalidFavourite(model.id))?;
        let user_id = model.id_user.ok_or(EngineError::InvalidFavourite(model.id))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            user_id,
            target,
        })
    }
}
