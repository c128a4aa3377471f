use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{ResultStore, StoreError, User, users};

use super::{Store, normalize_required_name, with_tx};

impl Store {
    /// Return every live user, ordered by name.
    pub async fn users(&self) -> ResultStore<Vec<User>> {
        with_tx!(self, |db_tx| {
            let models = users::Entity::find()
                .filter(users::Column::DeletedAt.is_null())
                .order_by_asc(users::Column::Name)
                .all(&db_tx)
                .await?;
            models.into_iter().map(User::try_from).collect()
        })
    }

    /// Return a live user by id.
    pub async fn user(&self, user_id: Uuid) -> ResultStore<User> {
        with_tx!(self, |db_tx| self.require_live_user(&db_tx, user_id).await)
    }

    /// Add a new user.
    pub async fn new_user(&self, name: &str) -> ResultStore<User> {
        let name = normalize_required_name(name, "user")?;
        with_tx!(self, |db_tx| {
            let user = User::new(name)?;
            let model: users::ActiveModel = (&user).into();
            model.insert(&db_tx).await?;
            Ok(user)
        })
    }

    /// Rename an existing user and stamp `updated_at`.
    pub async fn update_user(&self, user_id: Uuid, name: &str) -> ResultStore<User> {
        let name = normalize_required_name(name, "user")?;
        with_tx!(self, |db_tx| {
            self.require_live_user(&db_tx, user_id).await?;
            let active = users::ActiveModel {
                id: ActiveValue::Set(user_id.to_string()),
                name: ActiveValue::Set(name),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            User::try_from(model)
        })
    }

    /// Soft delete a user.
    ///
    /// The row stays in place so old expenses keep their payer; it simply
    /// disappears from listings and pickers. Deleting an already deleted
    /// user refreshes `deleted_at`.
    pub async fn delete_user(&self, user_id: Uuid) -> ResultStore<()> {
        with_tx!(self, |db_tx| {
            users::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| StoreError::NotFound("user not exists".to_string()))?;
            let active = users::ActiveModel {
                id: ActiveValue::Set(user_id.to_string()),
                deleted_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    pub(crate) async fn require_live_user<C>(&self, db: &C, user_id: Uuid) -> ResultStore<User>
    where
        C: ConnectionTrait,
    {
        let model = users::Entity::find_by_id(user_id.to_string())
            .filter(users::Column::DeletedAt.is_null())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::NotFound("user not exists".to_string()))?;
        User::try_from(model)
    }
}
