use std::collections::HashMap;

use sea_orm::{
    ConnectionTrait, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Favourite, FavouriteDetail, FavouriteEntity, FavouriteTarget, ResultEngine,
    favourites, people, planets, vehicles,
};

use super::{Engine, with_tx};

impl Engine {
    /// Ensure the target exists and return the label stored on the favourite.
    async fn require_target(
        &self,
        db: &DatabaseTransaction,
        target: FavouriteTarget,
    ) -> ResultEngine<Option<String>> {
        let name = match target {
            FavouriteTarget::Person(id) => people::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|person| Some(person.name)),
            FavouriteTarget::Planet(id) => planets::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|planet| planet.name),
            FavouriteTarget::Vehicle(id) => vehicles::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|vehicle| Some(vehicle.name)),
        };
        name.ok_or_else(|| EngineError::KeyNotFound(target.label().to_string()))
    }

    async fn find_favourite<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        target: FavouriteTarget,
    ) -> ResultEngine<Option<favourites::Model>> {
        favourites::Entity::find()
            .filter(favourites::Column::IdUser.eq(user_id))
            .filter(target.column().eq(target.id()))
            .one(db)
            .await
            .map_err(Into::into)
    }

    /// Favourite `target` for `user_id`.
    ///
    /// The duplicate check and the insert share one transaction; two
    /// concurrent calls for the same pair may still both succeed.
    pub async fn add_favourite(
        &self,
        user_id: i32,
        target: FavouriteTarget,
    ) -> ResultEngine<Favourite> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let name = self.require_target(&db_tx, target).await?;

            if self
                .find_favourite(&db_tx, user_id, target)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingFavourite(target.label().to_string()));
            }

            let model = favourites::ActiveModel::new(user_id, target, name)
                .insert(&db_tx)
                .await?;
            Favourite::try_from(model)
        })
    }

    /// Remove `target` from the favourites of `user_id`.
    pub async fn remove_favourite(
        &self,
        user_id: i32,
        target: FavouriteTarget,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            self.require_target(&db_tx, target).await?;

            let favourite = self
                .find_favourite(&db_tx, user_id, target)
                .await?
                .ok_or_else(|| EngineError::MissingFavourite(target.label().to_string()))?;

            favourites::Entity::delete_by_id(favourite.id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// List the favourites of `user_id`, each with the entity it points at.
    pub async fn favourites(&self, user_id: i32) -> ResultEngine<Vec<FavouriteDetail>> {
        self.require_user(&self.database, user_id).await?;

        let favourites = favourites::Entity::find()
            .filter(favourites::Column::IdUser.eq(user_id))
            .order_by_asc(favourites::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Favourite::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        let mut person_ids = Vec::new();
        let mut planet_ids = Vec::new();
        let mut vehicle_ids = Vec::new();
        for favourite in &favourites {
            match favourite.target {
                FavouriteTarget::Person(id) => person_ids.push(id),
                FavouriteTarget::Planet(id) => planet_ids.push(id),
                FavouriteTarget::Vehicle(id) => vehicle_ids.push(id),
            }
        }

        let mut entities: HashMap<FavouriteTarget, FavouriteEntity> = HashMap::new();
        if !person_ids.is_empty() {
            for person in people::Entity::find()
                .filter(people::Column::Id.is_in(person_ids))
                .all(&self.database)
                .await?
            {
                entities.insert(
                    FavouriteTarget::Person(person.id),
                    FavouriteEntity::Person(person),
                );
            }
        }
        if !planet_ids.is_empty() {
            for planet in planets::Entity::find()
                .filter(planets::Column::Id.is_in(planet_ids))
                .all(&self.database)
                .await?
            {
                entities.insert(
                    FavouriteTarget::Planet(planet.id),
                    FavouriteEntity::Planet(planet),
                );
            }
        }
        if !vehicle_ids.is_empty() {
            for vehicle in vehicles::Entity::find()
                .filter(vehicles::Column::Id.is_in(vehicle_ids))
                .all(&self.database)
                .await?
            {
                entities.insert(
                    FavouriteTarget::Vehicle(vehicle.id),
                    FavouriteEntity::Vehicle(vehicle),
                );
            }
        }

        Ok(favourites
            .into_iter()
            .map(|favourite| FavouriteDetail {
                entity: entities.get(&favourite.target).cloned(),
                favourite,
            })
            .collect())
    }
}
