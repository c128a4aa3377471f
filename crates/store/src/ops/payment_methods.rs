use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{PaymentMethod, ResultStore, StoreError, payment_methods};

use super::{Store, normalize_required_color, normalize_required_name, with_tx};

impl Store {
    /// Return every live payment method, ordered by name.
    pub async fn payment_methods(&self) -> ResultStore<Vec<PaymentMethod>> {
        with_tx!(self, |db_tx| {
            let models = payment_methods::Entity::find()
                .filter(payment_methods::Column::DeletedAt.is_null())
                .order_by_asc(payment_methods::Column::Name)
                .all(&db_tx)
                .await?;
            models.into_iter().map(PaymentMethod::try_from).collect()
        })
    }

    /// Return a live payment method by id.
    pub async fn payment_method(&self, method_id: Uuid) -> ResultStore<PaymentMethod> {
        with_tx!(self, |db_tx| {
            self.require_live_payment_method(&db_tx, method_id).await
        })
    }

    /// Add a new payment method.
    pub async fn new_payment_method(&self, name: &str, color: &str) -> ResultStore<PaymentMethod> {
        let name = normalize_required_name(name, "payment method")?;
        let color = normalize_required_color(color, "payment method")?;
        with_tx!(self, |db_tx| {
            let method = PaymentMethod::new(name, color)?;
            let model: payment_methods::ActiveModel = (&method).into();
            model.insert(&db_tx).await?;
            Ok(method)
        })
    }

    /// Update name and color of an existing payment method and stamp `updated_at`.
    pub async fn update_payment_method(
        &self,
        method_id: Uuid,
        name: &str,
        color: &str,
    ) -> ResultStore<PaymentMethod> {
        let name = normalize_required_name(name, "payment method")?;
        let color = normalize_required_color(color, "payment method")?;
        with_tx!(self, |db_tx| {
            self.require_live_payment_method(&db_tx, method_id).await?;
            let active = payment_methods::ActiveModel {
                id: ActiveValue::Set(method_id.to_string()),
                name: ActiveValue::Set(name),
                color: ActiveValue::Set(color),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            PaymentMethod::try_from(model)
        })
    }

    /// Soft delete a payment method. Expenses paid with it keep the reference.
    pub async fn delete_payment_method(&self, method_id: Uuid) -> ResultStore<()> {
        with_tx!(self, |db_tx| {
            payment_methods::Entity::find_by_id(method_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| StoreError::NotFound("payment method not exists".to_string()))?;
            let active = payment_methods::ActiveModel {
                id: ActiveValue::Set(method_id.to_string()),
                deleted_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    pub(crate) async fn require_live_payment_method<C>(
        &self,
        db: &C,
        method_id: Uuid,
    ) -> ResultStore<PaymentMethod>
    where
        C: ConnectionTrait,
    {
        let model = payment_methods::Entity::find_by_id(method_id.to_string())
            .filter(payment_methods::Column::DeletedAt.is_null())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::NotFound("payment method not exists".to_string()))?;
        PaymentMethod::try_from(model)
    }
}
