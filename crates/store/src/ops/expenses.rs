use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Expense, PaymentMethod, ResultStore, StoreError, Tag, User, expense_tags, expenses,
    payment_methods, tags, users,
};

use super::{Store, normalize_required_name, with_tx};

impl Store {
    /// Return the live expenses of a group, newest first, hydrated with
    /// payer, payment method and tags.
    ///
    /// An unknown group yields an empty list rather than an error; the
    /// caller fetches the group itself first when it needs a 404.
    pub async fn group_expenses(&self, group_id: Uuid) -> ResultStore<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            let models = expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_id.to_string()))
                .filter(expenses::Column::DeletedAt.is_null())
                .order_by_desc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            self.hydrate_expenses(&db_tx, models).await
        })
    }

    /// Return a live expense by id, hydrated.
    pub async fn expense(&self, expense_id: Uuid) -> ResultStore<Expense> {
        with_tx!(self, |db_tx| {
            let model = self.require_live_expense(&db_tx, expense_id).await?;
            let mut hydrated = self.hydrate_expenses(&db_tx, vec![model]).await?;
            hydrated
                .pop()
                .ok_or_else(|| StoreError::NotFound("expense not exists".to_string()))
        })
    }

    /// Add a new expense with its tag links.
    ///
    /// The group, payer and payment method must be live, as must every tag.
    /// The expense row and its links are written in one transaction, so a
    /// bad tag id leaves nothing behind.
    pub async fn new_expense(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        payment_method_id: Uuid,
        name: &str,
        amount_cents: i64,
        tag_ids: &[Uuid],
    ) -> ResultStore<Expense> {
        let name = normalize_required_name(name, "expense")?;
        with_tx!(self, |db_tx| {
            self.require_live_group(&db_tx, group_id).await?;
            let payer = self.require_live_user(&db_tx, user_id).await?;
            let method = self
                .require_live_payment_method(&db_tx, payment_method_id)
                .await?;
            let tags = self.require_live_tags(&db_tx, tag_ids).await?;

            let mut expense =
                Expense::new(group_id, user_id, payment_method_id, name, amount_cents)?;
            let model: expenses::ActiveModel = (&expense).into();
            model.insert(&db_tx).await?;
            self.replace_tag_links(&db_tx, expense.id, &tags).await?;

            expense.payer = Some(payer);
            expense.payment_method = Some(method);
            let mut tags = tags;
            tags.sort_by(|a, b| a.name.cmp(&b.name));
            expense.tags = tags;
            Ok(expense)
        })
    }

    /// Update an existing expense and replace its tag set, stamping
    /// `updated_at`.
    ///
    /// Tags are replaced, not merged; an empty slice clears them. Row
    /// update and tag replacement commit together, so a failed validation
    /// leaves the old version intact. The group of an expense never
    /// changes.
    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        user_id: Uuid,
        payment_method_id: Uuid,
        name: &str,
        amount_cents: i64,
        tag_ids: &[Uuid],
    ) -> ResultStore<Expense> {
        let name = normalize_required_name(name, "expense")?;
        if amount_cents <= 0 {
            return Err(StoreError::InvalidAmount(
                "amount_cents must be > 0".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            self.require_live_expense(&db_tx, expense_id).await?;
            let payer = self.require_live_user(&db_tx, user_id).await?;
            let method = self
                .require_live_payment_method(&db_tx, payment_method_id)
                .await?;
            let tags = self.require_live_tags(&db_tx, tag_ids).await?;

            let active = expenses::ActiveModel {
                id: ActiveValue::Set(expense_id.to_string()),
                user_id: ActiveValue::Set(user_id.to_string()),
                payment_method_id: ActiveValue::Set(payment_method_id.to_string()),
                name: ActiveValue::Set(name),
                amount_cents: ActiveValue::Set(amount_cents),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            self.replace_tag_links(&db_tx, expense_id, &tags).await?;

            let mut expense = Expense::try_from(model)?;
            expense.payer = Some(payer);
            expense.payment_method = Some(method);
            let mut tags = tags;
            tags.sort_by(|a, b| a.name.cmp(&b.name));
            expense.tags = tags;
            Ok(expense)
        })
    }

    /// Replace the tag set of an expense.
    ///
    /// The previous links are dropped and the given set written in their
    /// place, in one transaction. Returns the new set.
    pub async fn replace_tags(&self, expense_id: Uuid, tag_ids: &[Uuid]) -> ResultStore<Vec<Tag>> {
        with_tx!(self, |db_tx| {
            self.require_live_expense(&db_tx, expense_id).await?;
            let tags = self.require_live_tags(&db_tx, tag_ids).await?;
            self.replace_tag_links(&db_tx, expense_id, &tags).await?;
            let mut tags = tags;
            tags.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(tags)
        })
    }

    /// Soft delete an expense. Tag links stay in place; the row is only
    /// filtered out of reads. Deleting twice refreshes `deleted_at`.
    pub async fn delete_expense(&self, expense_id: Uuid) -> ResultStore<()> {
        with_tx!(self, |db_tx| {
            expenses::Entity::find_by_id(expense_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| StoreError::NotFound("expense not exists".to_string()))?;
            let active = expenses::ActiveModel {
                id: ActiveValue::Set(expense_id.to_string()),
                deleted_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    pub(crate) async fn require_live_expense<C>(
        &self,
        db: &C,
        expense_id: Uuid,
    ) -> ResultStore<expenses::Model>
    where
        C: ConnectionTrait,
    {
        expenses::Entity::find_by_id(expense_id.to_string())
            .filter(expenses::Column::DeletedAt.is_null())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::NotFound("expense not exists".to_string()))
    }

    /// Attach payer, payment method and tags to a batch of expense rows.
    ///
    /// Everything is loaded with one query per related table, never per
    /// row. Parents are looked up without the soft delete filter: a
    /// deleted payer must still show on the expenses it paid. Tags are
    /// ordered by name within each expense.
    pub(crate) async fn hydrate_expenses<C>(
        &self,
        db: &C,
        models: Vec<expenses::Model>,
    ) -> ResultStore<Vec<Expense>>
    where
        C: ConnectionTrait,
    {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids: Vec<String> = Vec::new();
        let mut method_ids: Vec<String> = Vec::new();
        let mut expense_ids: Vec<String> = Vec::with_capacity(models.len());
        for model in &models {
            if !user_ids.contains(&model.user_id) {
                user_ids.push(model.user_id.clone());
            }
            if !method_ids.contains(&model.payment_method_id) {
                method_ids.push(model.payment_method_id.clone());
            }
            expense_ids.push(model.id.clone());
        }

        let mut users_by_id: HashMap<String, User> = HashMap::new();
        for model in users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(db)
            .await?
        {
            let user = User::try_from(model)?;
            users_by_id.insert(user.id.to_string(), user);
        }

        let mut methods_by_id: HashMap<String, PaymentMethod> = HashMap::new();
        for model in payment_methods::Entity::find()
            .filter(payment_methods::Column::Id.is_in(method_ids))
            .all(db)
            .await?
        {
            let method = PaymentMethod::try_from(model)?;
            methods_by_id.insert(method.id.to_string(), method);
        }

        let links = expense_tags::Entity::find()
            .filter(expense_tags::Column::ExpenseId.is_in(expense_ids))
            .all(db)
            .await?;
        let mut tag_ids: Vec<String> = Vec::new();
        for link in &links {
            if !tag_ids.contains(&link.tag_id) {
                tag_ids.push(link.tag_id.clone());
            }
        }
        let mut tags_by_id: HashMap<String, Tag> = HashMap::new();
        if !tag_ids.is_empty() {
            for model in tags::Entity::find()
                .filter(tags::Column::Id.is_in(tag_ids))
                .all(db)
                .await?
            {
                let tag = Tag::try_from(model)?;
                tags_by_id.insert(tag.id.to_string(), tag);
            }
        }
        let mut tags_by_expense: HashMap<String, Vec<Tag>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags_by_id.get(&link.tag_id) {
                tags_by_expense
                    .entry(link.expense_id)
                    .or_default()
                    .push(tag.clone());
            }
        }

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            let id = model.id.clone();
            let mut expense = Expense::try_from(model)?;
            expense.payer = users_by_id.get(&expense.user_id.to_string()).cloned();
            expense.payment_method = methods_by_id
                .get(&expense.payment_method_id.to_string())
                .cloned();
            let mut tag_set = tags_by_expense.remove(&id).unwrap_or_default();
            tag_set.sort_by(|a, b| a.name.cmp(&b.name));
            expense.tags = tag_set;
            result.push(expense);
        }
        Ok(result)
    }

    async fn replace_tag_links<C>(&self, db: &C, expense_id: Uuid, tags: &[Tag]) -> ResultStore<()>
    where
        C: ConnectionTrait,
    {
        expense_tags::Entity::delete_many()
            .filter(expense_tags::Column::ExpenseId.eq(expense_id.to_string()))
            .exec(db)
            .await?;
        for tag in tags {
            let link = expense_tags::ActiveModel {
                expense_id: ActiveValue::Set(expense_id.to_string()),
                tag_id: ActiveValue::Set(tag.id.to_string()),
            };
            link.insert(db).await?;
        }
        Ok(())
    }
}
