use sea_orm::{ActiveModelTrait, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, NewUser, ResultEngine, User, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("User".to_string()))
    }

    /// List every registered user ordered by id.
    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.database)
            .await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    pub async fn user(&self, user_id: i32) -> ResultEngine<User> {
        self.require_user(&self.database, user_id)
            .await
            .map(User::from)
    }

    /// Register a new user.
    ///
    /// Username and email uniqueness is left to the storage constraints: a
    /// duplicate surfaces as [`EngineError::Database`].
    pub async fn signup(&self, user: NewUser) -> ResultEngine<User> {
        let model = users::ActiveModel::from(user)
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    /// Check a user's credentials.
    ///
    /// An unknown email is [`EngineError::KeyNotFound`]; a known email with a
    /// different password yields `Ok(None)`.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("User".to_string()))?;

        if user.email != email || user.password != password {
            return Ok(None);
        }

        Ok(Some(user.into()))
    }
}
