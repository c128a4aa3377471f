//! Expense records.
//!
//! An `Expense` is one purchase inside a group, attributed to the user who
//! paid and to the payment method used. Amounts are stored as integer
//! **centavos**; an amount must be strictly positive.
//!
//! The `payer`, `payment_method` and `tags` fields are hydrated by the read
//! ops in one batch per query. They are loaded without the soft delete
//! filter so an expense keeps showing who paid it even after that user is
//! deleted.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultStore, StoreError, payment_methods::PaymentMethod, tags::Tag, users::User};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub payment_method_id: Uuid,
    pub name: String,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub payer: Option<User>,
    pub payment_method: Option<PaymentMethod>,
    pub tags: Vec<Tag>,
}

impl Expense {
    pub fn new(
        group_id: Uuid,
        user_id: Uuid,
        payment_method_id: Uuid,
        name: String,
        amount_cents: i64,
    ) -> ResultStore<Self> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName(
                "expense name must not be empty".to_string(),
            ));
        }
        if amount_cents <= 0 {
            return Err(StoreError::InvalidAmount(
                "amount_cents must be > 0".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            group_id,
            user_id,
            payment_method_id,
            name,
            amount_cents,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            payer: None,
            payment_method: None,
            tags: Vec::new(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub payment_method_id: String,
    pub name: String,
    pub amount_cents: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Groups,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::payment_methods::Entity",
        from = "Column::PaymentMethodId",
        to = "super::payment_methods::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    PaymentMethods,
    #[sea_orm(has_many = "super::expense_tags::Entity")]
    ExpenseTags,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::payment_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethods.def()
    }
}

impl Related<super::expense_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            group_id: ActiveValue::Set(expense.group_id.to_string()),
            user_id: ActiveValue::Set(expense.user_id.to_string()),
            payment_method_id: ActiveValue::Set(expense.payment_method_id.to_string()),
            name: ActiveValue::Set(expense.name.clone()),
            amount_cents: ActiveValue::Set(expense.amount_cents),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
            deleted_at: ActiveValue::Set(expense.deleted_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let parse = |value: &str| {
            Uuid::parse_str(value)
                .map_err(|_| StoreError::NotFound("expense not exists".to_string()))
        };
        Ok(Self {
            id: parse(&model.id)?,
            group_id: parse(&model.group_id)?,
            user_id: parse(&model.user_id)?,
            payment_method_id: parse(&model.payment_method_id)?,
            name: model.name,
            amount_cents: model.amount_cents,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
            payer: None,
            payment_method: None,
            tags: Vec::new(),
        })
    }
}
