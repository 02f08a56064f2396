//! Catalog of planets.
//!
//! Every attribute is nullable so that bare ids coming from the upstream
//! catalog can be stored before their details are known.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "planet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub rotation_period: Option<i32>,
    pub orbital_period: Option<i32>,
    pub diameter: Option<i32>,
    pub climate: Option<String>,
    pub gravity: Option<f64>,
    pub terrain: Option<String>,
    pub surface_water: Option<i32>,
    pub population: Option<i64>,
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
