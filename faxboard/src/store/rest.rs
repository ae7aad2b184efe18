use crate::error::StoreError;
use crate::record::{Record, RecordId, UserId};
use crate::settings::BackendSettings;
use crate::store::RecordStore;
use crate::warn;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Deserialize)]
struct BackendMessage {
    message: String,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
}

/// Talks to a PostgREST-compatible backend (`/rest/v1/<table>`) with GoTrue-style auth (`/auth/v1/user`).
#[derive(Clone)]
pub struct RestStore {
    http_client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestStore {
    pub fn new(settings: &BackendSettings) -> Result<Self, StoreError> {
        let http_client = Client::builder().timeout(settings.timeout_s).build()?;
        Ok(RestStore {
            http_client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            access_token: settings.access_token.clone().filter(|token| !token.is_empty()),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.api_key).bearer_auth(self.access_token.as_deref().unwrap_or(&self.api_key))
    }

    fn by_id(request: RequestBuilder, id: &RecordId) -> RequestBuilder {
        request.query(&[("id", format!("eq.{}", id))])
    }

    async fn rejection(response: Response) -> StoreError {
        let status = response.status();
        match response.text().await {
            Ok(body) => match serde_json::from_str::<BackendMessage>(&body) {
                Ok(parsed) => StoreError::Rejected(parsed.message),
                Err(_) if body.is_empty() => StoreError::Rejected(status.to_string()),
                Err(_) => StoreError::Rejected(body),
            },
            Err(e) => StoreError::Transport(e),
        }
    }

    async fn returned_rows(response: Response) -> Result<Vec<Record>, StoreError> {
        if response.status().is_success() {
            Ok(response.json::<Vec<Record>>().await?)
        } else {
            Err(Self::rejection(response).await)
        }
    }
}

fn id_of(row: &Record) -> Option<RecordId> {
    match row.get("id")? {
        Value::String(s) => Some(RecordId(s.clone())),
        Value::Number(n) => Some(RecordId(n.to_string())),
        _ => None,
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_by_id(&self, table: &str, id: &RecordId) -> Result<Record, StoreError> {
        let request = self.authorized(self.http_client.get(self.table_url(table)));
        let response = Self::by_id(request, id).query(&[("select", "*")]).header(ACCEPT, SINGLE_OBJECT).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json::<Record>().await?),
            StatusCode::NOT_ACCEPTABLE => Err(StoreError::not_found(table, id)),
            _ => Err(Self::rejection(response).await),
        }
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId, StoreError> {
        let request = self.authorized(self.http_client.post(self.table_url(table)));
        let response = request.header("Prefer", "return=representation").json(&record).send().await?;
        let rows = Self::returned_rows(response).await?;
        rows.first()
            .and_then(id_of)
            .ok_or_else(|| StoreError::Rejected(format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, id: &RecordId, partial: Record) -> Result<(), StoreError> {
        let request = self.authorized(self.http_client.patch(self.table_url(table)));
        let response = Self::by_id(request, id).header("Prefer", "return=representation").json(&partial).send().await?;
        let rows = Self::returned_rows(response).await?;
        if rows.is_empty() {
            Err(StoreError::not_found(table, id))
        } else {
            Ok(())
        }
    }

    async fn current_user(&self) -> Option<UserId> {
        let token = self.access_token.as_deref()?;
        let request = self
            .http_client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token);
        match request.send().await {
            Ok(response) if response.status().is_success() => match response.json::<AuthUser>().await {
                Ok(user) => Some(UserId(user.id)),
                Err(e) => {
                    warn!("Current user payload not understood: {}", e);
                    None
                }
            },
            Ok(response) => {
                warn!("Current user lookup refused with {}", response.status());
                None
            }
            Err(e) => {
                warn!("Current user lookup failed: {}", e);
                None
            }
        }
    }

    async fn list(&self, table: &str, limit: usize) -> Result<Vec<Record>, StoreError> {
        let request = self.authorized(self.http_client.get(self.table_url(table)));
        let limit = limit.to_string();
        let response = request
            .query(&[("select", "*"), ("order", "created_at.desc"), ("limit", limit.as_str())])
            .send()
            .await?;
        Self::returned_rows(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BackendKind;
    use axum::extract::{Path, Query};
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn bearer(headers: &HeaderMap) -> Option<&str> {
        headers.get("authorization").and_then(|v| v.to_str().ok()).and_then(|v| v.strip_prefix("Bearer "))
    }

    async fn select(
        Path(table): Path<String>,
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> axum::response::Response {
        if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some("anon") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" }))).into_response();
        }
        match params.get("id").map(String::as_str) {
            Some("eq.abc") => Json(json!({ "id": "abc", "account_id": "x", "number": "555", "table": table })).into_response(),
            Some(_) => (
                StatusCode::NOT_ACCEPTABLE,
                Json(json!({ "code": "PGRST116", "message": "JSON object requested, multiple (or no) rows returned" })),
            )
                .into_response(),
            None => {
                let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
                let order = params.get("order").cloned().unwrap_or_default();
                let rows: Vec<_> = (0..limit).map(|n| json!({ "id": n, "order": order })).collect();
                Json(rows).into_response()
            }
        }
    }

    async fn insert(Json(body): Json<Value>) -> axum::response::Response {
        if body["number"] == json!("dup") {
            let message = "duplicate key value violates unique constraint \"fax_numbers_number_key\"";
            return (StatusCode::CONFLICT, Json(json!({ "code": "23505", "message": message }))).into_response();
        }
        let mut row = body.clone();
        row["id"] = json!("new-1");
        (StatusCode::CREATED, Json(json!([row]))).into_response()
    }

    async fn update(Query(params): Query<HashMap<String, String>>, Json(body): Json<Value>) -> axum::response::Response {
        match params.get("id").map(String::as_str) {
            Some("eq.abc") => Json(json!([body])).into_response(),
            _ => Json(json!([])).into_response(),
        }
    }

    async fn user(headers: HeaderMap) -> axum::response::Response {
        match bearer(&headers) {
            Some("token-1") => Json(json!({ "id": "u1", "email": "ops@example.com" })).into_response(),
            _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "invalid JWT" }))).into_response(),
        }
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/rest/v1/{table}", get(select).post(insert).patch(update))
            .route("/auth/v1/user", get(user));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/", addr)
    }

    fn settings(url: String, api_key: &str, access_token: Option<&str>) -> BackendSettings {
        BackendSettings {
            kind: BackendKind::Rest,
            url,
            api_key: api_key.to_string(),
            access_token: access_token.map(str::to_string),
            timeout_s: Duration::from_secs(5),
            seed_user: None,
        }
    }

    async fn rest_store(access_token: Option<&str>) -> RestStore {
        let url = spawn_backend().await;
        RestStore::new(&settings(url, "anon", access_token)).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_single_row() {
        let store = rest_store(None).await;
        let row = store.fetch_by_id("fax_numbers", &RecordId::from("abc")).await.unwrap();
        assert_eq!(row["account_id"], json!("x"));
        assert_eq!(row["table"], json!("fax_numbers"));
    }

    #[tokio::test]
    async fn fetch_of_missing_row_is_not_found() {
        let store = rest_store(None).await;
        let err = store.fetch_by_id("fax_numbers", &RecordId::from("zzz")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn backend_messages_are_kept_verbatim() {
        let url = spawn_backend().await;
        let store = RestStore::new(&settings(url, "wrong", None)).unwrap();
        let err = store.fetch_by_id("fax_numbers", &RecordId::from("abc")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid API key");

        let store = rest_store(None).await;
        let record = json!({ "number": "dup" }).as_object().cloned().unwrap();
        let err = store.insert("fax_numbers", record).await.unwrap_err();
        assert_eq!(err.to_string(), "duplicate key value violates unique constraint \"fax_numbers_number_key\"");
    }

    #[tokio::test]
    async fn insert_reads_id_of_returned_row() {
        let store = rest_store(None).await;
        let record = json!({ "number": "555" }).as_object().cloned().unwrap();
        assert_eq!(store.insert("fax_numbers", record).await.unwrap(), RecordId::from("new-1"));
    }

    #[tokio::test]
    async fn update_without_matching_row_is_not_found() {
        let store = rest_store(None).await;
        let partial = json!({ "number": "556" }).as_object().cloned().unwrap();
        store.update("fax_numbers", &RecordId::from("abc"), partial.clone()).await.unwrap();
        let err = store.update("fax_numbers", &RecordId::from("zzz"), partial).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn current_user_requires_a_valid_token() {
        assert_eq!(rest_store(None).await.current_user().await, None);
        assert_eq!(rest_store(Some("")).await.current_user().await, None);
        assert_eq!(rest_store(Some("expired")).await.current_user().await, None);
        assert_eq!(rest_store(Some("token-1")).await.current_user().await, Some(UserId::from("u1")));
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_limits() {
        let store = rest_store(None).await;
        let rows = store.list("faxes", 3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["order"], json!("created_at.desc"));
        assert_eq!(id_of(&rows[2]), Some(RecordId::from("2")));
    }
}
