//! Tag records.
//!
//! A `Tag` is a colored label attached to expenses through the
//! `expense_tags` junction table. An expense can carry any number of tags.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultStore, StoreError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Tag {
    pub fn new(name: String, color: String) -> ResultStore<Self> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName(
                "tag name must not be empty".to_string(),
            ));
        }
        if color.trim().is_empty() {
            return Err(StoreError::InvalidColor(
                "tag color must not be empty".to_string(),
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
#[sea_orm(table_name = "tags")]
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
    #[sea_orm(has_many = "super::expense_tags::Entity")]
    ExpenseTags,
}

impl Related<super::expense_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Tag> for ActiveModel {
    fn from(tag: &Tag) -> Self {
        Self {
            id: ActiveValue::Set(tag.id.to_string()),
            name: ActiveValue::Set(tag.name.clone()),
            color: ActiveValue::Set(tag.color.clone()),
            created_at: ActiveValue::Set(tag.created_at),
            updated_at: ActiveValue::Set(tag.updated_at),
            deleted_at: ActiveValue::Set(tag.deleted_at),
        }
    }
}

impl TryFrom<Model> for Tag {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| StoreError::NotFound("tag not exists".to_string()))?,
            name: model.name,
            color: model.color,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        })
    }
}
