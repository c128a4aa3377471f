use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{ResultStore, StoreError, Tag, tags};

use super::{Store, normalize_required_color, normalize_required_name, with_tx};

impl Store {
    /// Return every live tag, ordered by name.
    pub async fn tags(&self) -> ResultStore<Vec<Tag>> {
        with_tx!(self, |db_tx| {
            let models = tags::Entity::find()
                .filter(tags::Column::DeletedAt.is_null())
                .order_by_asc(tags::Column::Name)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Tag::try_from).collect()
        })
    }

    /// Return a live tag by id.
    pub async fn tag(&self, tag_id: Uuid) -> ResultStore<Tag> {
        with_tx!(self, |db_tx| {
            let live = self.require_live_tags(&db_tx, &[tag_id]).await?;
            live.into_iter()
                .next()
                .ok_or_else(|| StoreError::NotFound("tag not exists".to_string()))
        })
    }

    /// Add a new tag.
    pub async fn new_tag(&self, name: &str, color: &str) -> ResultStore<Tag> {
        let name = normalize_required_name(name, "tag")?;
        let color = normalize_required_color(color, "tag")?;
        with_tx!(self, |db_tx| {
            let tag = Tag::new(name, color)?;
            let model: tags::ActiveModel = (&tag).into();
            model.insert(&db_tx).await?;
            Ok(tag)
        })
    }

    /// Update name and color of an existing tag and stamp `updated_at`.
    pub async fn update_tag(&self, tag_id: Uuid, name: &str, color: &str) -> ResultStore<Tag> {
        let name = normalize_required_name(name, "tag")?;
        let color = normalize_required_color(color, "tag")?;
        with_tx!(self, |db_tx| {
            self.require_live_tags(&db_tx, &[tag_id]).await?;
            let active = tags::ActiveModel {
                id: ActiveValue::Set(tag_id.to_string()),
                name: ActiveValue::Set(name),
                color: ActiveValue::Set(color),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            Tag::try_from(model)
        })
    }

    /// Soft delete a tag. Existing expense links keep pointing at the row.
    pub async fn delete_tag(&self, tag_id: Uuid) -> ResultStore<()> {
        with_tx!(self, |db_tx| {
            tags::Entity::find_by_id(tag_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| StoreError::NotFound("tag not exists".to_string()))?;
            let active = tags::ActiveModel {
                id: ActiveValue::Set(tag_id.to_string()),
                deleted_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Load the given tags, requiring every one of them to be live.
    ///
    /// Duplicate ids are collapsed; the result keeps the order of first
    /// occurrence in `tag_ids`.
    pub(crate) async fn require_live_tags<C>(
        &self,
        db: &C,
        tag_ids: &[Uuid],
    ) -> ResultStore<Vec<Tag>>
    where
        C: ConnectionTrait,
    {
        let mut unique: Vec<String> = Vec::with_capacity(tag_ids.len());
        for tag_id in tag_ids {
            let id = tag_id.to_string();
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(unique.clone()))
            .filter(tags::Column::DeletedAt.is_null())
            .all(db)
            .await?;
        if models.len() != unique.len() {
            return Err(StoreError::NotFound("tag not exists".to_string()));
        }

        let mut by_id = HashMap::with_capacity(models.len());
        for model in models {
            let tag = Tag::try_from(model)?;
            by_id.insert(tag.id.to_string(), tag);
        }
        let mut tags = Vec::with_capacity(unique.len());
        for id in &unique {
            let tag = by_id
                .remove(id)
                .ok_or_else(|| StoreError::NotFound("tag not exists".to_string()))?;
            tags.push(tag);
        }
        Ok(tags)
    }
}
