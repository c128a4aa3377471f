//! Payment method records.
//!
//! A `PaymentMethod` describes how an expense was paid (cash, a card, Pix).
//! Each method carries a display color used for the chips next to expense
//! rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultStore, StoreError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PaymentMethod {
    pub fn new(name: String, color: String) -> ResultStore<Self> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName(
                "payment method name must not be empty".to_string(),
            ));
        }
        if color.trim().is_empty() {
            return Err(StoreError::InvalidColor(
                "payment method color must not be empty".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            color,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_methods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PaymentMethod> for ActiveModel {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            id: ActiveValue::Set(method.id.to_string()),
            name: ActiveValue::Set(method.name.clone()),
            color: ActiveValue::Set(method.color.clone()),
            created_at: ActiveValue::Set(method.created_at),
            updated_at: ActiveValue::Set(method.updated_at),
            deleted_at: ActiveValue::Set(method.deleted_at),
        }
    }
}

impl TryFrom<Model> for PaymentMethod {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| StoreError::NotFound("payment method not exists".to_string()))?,
            name: model.name,
            color: model.color,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        })
    }
}
