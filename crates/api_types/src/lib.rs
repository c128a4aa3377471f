use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Request body for creating or renaming a user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpsert {
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }
}

pub mod payment_method {
    use super::*;

    /// Request body for creating or updating a payment method.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentMethodUpsert {
        pub name: String,
        /// Hex color (`#RRGGBB`) used for the chip next to expense rows.
        pub color: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PaymentMethodView {
        pub id: Uuid,
        pub name: String,
        pub color: String,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }
}

pub mod tag {
    use super::*;

    /// Request body for creating or updating a tag.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TagUpsert {
        pub name: String,
        pub color: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TagView {
        pub id: Uuid,
        pub name: String,
        pub color: String,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }
}

pub mod group {
    use super::*;

    /// Request body for creating or renaming a group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupUpsert {
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }

    /// A group with its live expenses embedded, as returned by the
    /// overview listing. The embedded rows are plain (no payer or tag
    /// objects); the overview only needs ids and amounts.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GroupOverview {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
        pub expenses: Vec<super::expense::ExpenseRow>,
    }
}

pub mod expense {
    use super::*;

    /// A plain expense row, without the hydrated payer/method/tag objects.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseRow {
        pub id: Uuid,
        pub group_id: Uuid,
        pub user_id: Uuid,
        pub payment_method_id: Uuid,
        pub name: String,
        /// Amount in integer centavos (BRL). Always > 0.
        pub amount_cents: i64,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }

    /// The user a hydrated expense is attributed to.
    ///
    /// `None` on [`ExpenseView`] means the row is gone entirely; a payer
    /// that was soft deleted still embeds here.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PayerRef {
        pub id: Uuid,
        pub name: String,
    }

    /// The payment method of a hydrated expense.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PaymentMethodRef {
        pub id: Uuid,
        pub name: String,
        pub color: String,
    }

    /// An expense hydrated with payer, payment method and tags.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group_id: Uuid,
        pub user_id: Uuid,
        pub payment_method_id: Uuid,
        pub name: String,
        /// Amount in integer centavos (BRL). Always > 0.
        pub amount_cents: i64,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
        pub payer: Option<PayerRef>,
        pub payment_method: Option<PaymentMethodRef>,
        pub tags: Vec<super::tag::TagView>,
    }

    /// Request body for creating an expense with its tag links.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub group_id: Uuid,
        pub user_id: Uuid,
        pub payment_method_id: Uuid,
        pub name: String,
        /// Amount in integer centavos (BRL). Must be > 0.
        pub amount_cents: i64,
        pub tag_ids: Vec<Uuid>,
    }

    /// Request body for updating an expense.
    ///
    /// `tag_ids` replaces the whole tag set; an empty list clears it. The
    /// group of an expense never changes.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub user_id: Uuid,
        pub payment_method_id: Uuid,
        pub name: String,
        pub amount_cents: i64,
        pub tag_ids: Vec<Uuid>,
    }

    /// Request body for replacing the tag set of an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TagsReplace {
        pub tag_ids: Vec<Uuid>,
    }
}
