use axum::{Json, http::StatusCode, response::IntoResponse};
use store::StoreError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod expenses;
mod groups;
mod payment_methods;
mod server;
mod tags;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserUpsert, UserView};
    }

    pub mod payment_method {
        pub use api_types::payment_method::{PaymentMethodUpsert, PaymentMethodView};
    }

    pub mod tag {
        pub use api_types::tag::{TagUpsert, TagView};
    }

    pub mod group {
        pub use api_types::group::{GroupOverview, GroupUpsert, GroupView};
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseNew, ExpenseRow, ExpenseUpdate, ExpenseView, PayerRef, PaymentMethodRef,
            TagsReplace,
        };
    }
}

pub struct ServerError(StoreError);

//TODO: move the error envelope into api_types so the client stops redeclaring it
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        StoreError::InvalidName(_) | StoreError::InvalidAmount(_) | StoreError::InvalidColor(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_store_error(err: StoreError) -> String {
    match err {
        StoreError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for_store_error(&self.0);
        let error = message_for_store_error(self.0);

        (status, Json(Error { error })).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let res = ServerError::from(StoreError::NotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_validation_maps_to_422() {
        let res = ServerError::from(StoreError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn store_bad_color_maps_to_422() {
        let res = ServerError::from(StoreError::InvalidColor("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn database_failure_maps_to_500() {
        let err = StoreError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
