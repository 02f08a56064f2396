//! Initial schema migration.
//!
//! Creates the complete schema for Holocron:
//!
//! - `user`: registered accounts
//! - `people`, `planet`, `vehicle`: read-only catalog, seeded out of band
//! - `favourite`: one user favouriting one catalog entity
//!
//! A favourite row carries one nullable foreign key per catalog table. The
//! "exactly one target" rule and the per-user uniqueness of targets are
//! enforced by the engine, not by the schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum User {
    Table,
    Id,
    Username,
    Email,
    Password,
    IsActive,
}

#[derive(Iden)]
enum People {
    Table,
    Id,
    Name,
    Height,
    Mass,
    HairColor,
    SkinColor,
    EyeColor,
    BirthYear,
    Gender,
}

#[derive(Iden)]
enum Planet {
    Table,
    Id,
    Name,
    RotationPeriod,
    OrbitalPeriod,
    Diameter,
    Climate,
    Gravity,
    Terrain,
    SurfaceWater,
    Population,
}

#[derive(Iden)]
enum Vehicle {
    Table,
    Id,
    Name,
    Model,
    Manufacturer,
    CostInCredits,
    Length,
    Speed,
    Crew,
    CargoCapacity,
    Consumables,
    VehicleClass,
}

#[derive(Iden)]
enum Favourite {
    Table,
    Id,
    Name,
    IdUser,
    IdPeoples,
    IdPlanets,
    IdVehicles,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Username)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Password).string_len(80).not_null())
                    .col(ColumnDef::new(User::IsActive).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. People
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(People::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(People::Name).string_len(120).not_null())
                    .col(ColumnDef::new(People::Height).integer().not_null())
                    .col(ColumnDef::new(People::Mass).string_len(120).not_null())
                    .col(ColumnDef::new(People::HairColor).string_len(120).not_null())
                    .col(ColumnDef::new(People::SkinColor).string_len(120).not_null())
                    .col(ColumnDef::new(People::EyeColor).string_len(120).not_null())
                    .col(ColumnDef::new(People::BirthYear).string_len(120).not_null())
                    .col(ColumnDef::new(People::Gender).string_len(120).not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Planets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Planet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Planet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Planet::Name).string_len(250))
                    .col(ColumnDef::new(Planet::RotationPeriod).integer())
                    .col(ColumnDef::new(Planet::OrbitalPeriod).integer())
                    .col(ColumnDef::new(Planet::Diameter).integer())
                    .col(ColumnDef::new(Planet::Climate).string_len(250))
                    .col(ColumnDef::new(Planet::Gravity).double())
                    .col(ColumnDef::new(Planet::Terrain).string_len(250))
                    .col(ColumnDef::new(Planet::SurfaceWater).integer())
                    .col(ColumnDef::new(Planet::Population).big_integer())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Vehicles
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicle::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicle::Name).string_len(250).not_null())
                    .col(ColumnDef::new(Vehicle::Model).string_len(250).not_null())
                    .col(
                        ColumnDef::new(Vehicle::Manufacturer)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicle::CostInCredits)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vehicle::Length).double().not_null())
                    .col(ColumnDef::new(Vehicle::Speed).integer().not_null())
                    .col(ColumnDef::new(Vehicle::Crew).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicle::CargoCapacity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicle::Consumables)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicle::VehicleClass)
                            .string_len(250)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Favourites
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Favourite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favourite::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favourite::Name).string_len(120))
                    .col(ColumnDef::new(Favourite::IdUser).integer())
                    .col(ColumnDef::new(Favourite::IdPeoples).integer())
                    .col(ColumnDef::new(Favourite::IdPlanets).integer())
                    .col(ColumnDef::new(Favourite::IdVehicles).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-favourite-id_user")
                            .from(Favourite::Table, Favourite::IdUser)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-favourite-id_peoples")
                            .from(Favourite::Table, Favourite::IdPeoples)
                            .to(People::Table, People::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-favourite-id_planets")
                            .from(Favourite::Table, Favourite::IdPlanets)
                            .to(Planet::Table, Planet::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-favourite-id_vehicles")
                            .from(Favourite::Table, Favourite::IdVehicles)
                            .to(Vehicle::Table, Vehicle::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-favourite-id_user")
                    .table(Favourite::Table)
                    .col(Favourite::IdUser)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Favourite::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Planet::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}
