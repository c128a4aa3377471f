use api_types::{
    expense::{ExpenseNew, ExpenseUpdate, ExpenseView},
    group::{GroupOverview, GroupUpsert, GroupView},
    payment_method::{PaymentMethodUpsert, PaymentMethodView},
    tag::{TagUpsert, TagView},
    user::{UserUpsert, UserView},
};
use reqwest::Url;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug)]
pub enum ClientError {
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| config::ConfigError::Message(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn error_for(res: reqwest::Response) -> ClientError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            404 => ClientError::NotFound,
            422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        }
    }

    async fn decode<T: DeserializeOwned>(
        res: reqwest::Response,
    ) -> std::result::Result<T, ClientError> {
        if res.status().is_success() {
            return res.json::<T>().await.map_err(ClientError::Transport);
        }

        Err(Self::error_for(res).await)
    }

    async fn check(res: reqwest::Response) -> std::result::Result<(), ClientError> {
        if res.status().is_success() {
            return Ok(());
        }

        Err(Self::error_for(res).await)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::decode(res).await
    }

    async fn post<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        payload: &P,
    ) -> std::result::Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::decode(res).await
    }

    async fn put<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        payload: &P,
    ) -> std::result::Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .put(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::decode(res).await
    }

    async fn remove(&self, path: &str) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::check(res).await
    }

    pub async fn groups(&self) -> std::result::Result<Vec<GroupOverview>, ClientError> {
        self.get("groups").await
    }

    pub async fn new_group(&self, name: &str) -> std::result::Result<GroupView, ClientError> {
        let payload = GroupUpsert {
            name: name.to_string(),
        };
        self.post("groups", &payload).await
    }

    pub async fn update_group(
        &self,
        group_id: Uuid,
        name: &str,
    ) -> std::result::Result<GroupView, ClientError> {
        let payload = GroupUpsert {
            name: name.to_string(),
        };
        self.put(&format!("groups/{group_id}"), &payload).await
    }

    pub async fn delete_group(&self, group_id: Uuid) -> std::result::Result<(), ClientError> {
        self.remove(&format!("groups/{group_id}")).await
    }

    pub async fn group_expenses(
        &self,
        group_id: Uuid,
    ) -> std::result::Result<Vec<ExpenseView>, ClientError> {
        self.get(&format!("groups/{group_id}/expenses")).await
    }

    pub async fn users(&self) -> std::result::Result<Vec<UserView>, ClientError> {
        self.get("users").await
    }

    pub async fn new_user(&self, name: &str) -> std::result::Result<UserView, ClientError> {
        let payload = UserUpsert {
            name: name.to_string(),
        };
        self.post("users", &payload).await
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> std::result::Result<UserView, ClientError> {
        let payload = UserUpsert {
            name: name.to_string(),
        };
        self.put(&format!("users/{user_id}"), &payload).await
    }

    pub async fn delete_user(&self, user_id: Uuid) -> std::result::Result<(), ClientError> {
        self.remove(&format!("users/{user_id}")).await
    }

    pub async fn payment_methods(&self) -> std::result::Result<Vec<PaymentMethodView>, ClientError> {
        self.get("payment-methods").await
    }

    pub async fn new_payment_method(
        &self,
        name: &str,
        color: &str,
    ) -> std::result::Result<PaymentMethodView, ClientError> {
        let payload = PaymentMethodUpsert {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.post("payment-methods", &payload).await
    }

    pub async fn update_payment_method(
        &self,
        method_id: Uuid,
        name: &str,
        color: &str,
    ) -> std::result::Result<PaymentMethodView, ClientError> {
        let payload = PaymentMethodUpsert {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.put(&format!("payment-methods/{method_id}"), &payload)
            .await
    }

    pub async fn delete_payment_method(
        &self,
        method_id: Uuid,
    ) -> std::result::Result<(), ClientError> {
        self.remove(&format!("payment-methods/{method_id}")).await
    }

    pub async fn tags(&self) -> std::result::Result<Vec<TagView>, ClientError> {
        self.get("tags").await
    }

    pub async fn new_tag(
        &self,
        name: &str,
        color: &str,
    ) -> std::result::Result<TagView, ClientError> {
        let payload = TagUpsert {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.post("tags", &payload).await
    }

    pub async fn update_tag(
        &self,
        tag_id: Uuid,
        name: &str,
        color: &str,
    ) -> std::result::Result<TagView, ClientError> {
        let payload = TagUpsert {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.put(&format!("tags/{tag_id}"), &payload).await
    }

    pub async fn delete_tag(&self, tag_id: Uuid) -> std::result::Result<(), ClientError> {
        self.remove(&format!("tags/{tag_id}")).await
    }

    pub async fn new_expense(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<ExpenseView, ClientError> {
        self.post("expenses", payload).await
    }

    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        payload: &ExpenseUpdate,
    ) -> std::result::Result<ExpenseView, ClientError> {
        self.put(&format!("expenses/{expense_id}"), payload).await
    }

    pub async fn delete_expense(&self, expense_id: Uuid) -> std::result::Result<(), ClientError> {
        self.remove(&format!("expenses/{expense_id}")).await
    }
}
