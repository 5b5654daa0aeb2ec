//! Infrastructure implementation of the backend API ports.
//!
//! `HttpApi` talks to the contest backend over HTTPS with `reqwest` and maps
//! wire-level failures onto [`ApiError`]. The backend wraps most payloads in
//! a `{ success, data }` envelope, but not consistently, so every decode goes
//! through the lenient `unwrap_data` / `unwrap_list` helpers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::ports::{AccountApi, ChallengeApi, InstanceApi};
use crate::domain::contest::{
    Genre, Leaderboard, Question, QuestionSummary, StartResponse, User,
};
use crate::domain::error::ApiError;
use crate::domain::instance::InstanceStatus;

/// Per-request timeout. Generous enough for the machine start endpoint,
/// which provisions before responding.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(90);

/// HTTP client for the contest backend — implements `AccountApi`,
/// `ChallengeApi`, and `InstanceApi`.
pub struct HttpApi {
    client: reqwest::Client,
    base: String,
    bearer: Option<String>,
}

impl HttpApi {
    /// Build a client against the given base URL (trailing slashes trimmed).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS stack fails to initialize.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base: base_url.trim_end_matches('/').to_string(),
            bearer: None,
        })
    }

    /// Same client, authenticated with a bearer token.
    #[must_use]
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(map_status(status.as_u16(), &text));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(reqwest::Method::GET, path, None).await
    }

    async fn patch(&self, path: &str) -> Result<Value, ApiError> {
        self.send(reqwest::Method::PATCH, path, None).await
    }
}

/// Map a non-2xx response onto the error taxonomy. The body's `message`
/// field is surfaced when present, the raw body otherwise.
fn map_status(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.chars().take(200).collect());
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(message),
        404 => ApiError::NotFound,
        _ => ApiError::Server { status, message },
    }
}

/// Peel the `{ data }` envelope when present, otherwise keep the payload.
fn unwrap_data(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Find a list in a payload that may be bare, enveloped, or keyed under a
/// collection name (`genres`, `questions`).
fn unwrap_list(payload: Value, keys: &[&str]) -> Value {
    let inner = unwrap_data(payload);
    if inner.is_array() {
        return inner;
    }
    if let Value::Object(mut map) = inner {
        for key in keys {
            if map.get(*key).is_some_and(Value::is_array) {
                if let Some(list) = map.remove(*key) {
                    return list;
                }
            }
        }
    }
    Value::Array(Vec::new())
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

impl AccountApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let payload = self.send(reqwest::Method::POST, "auth/login", Some(&body)).await?;
        unwrap_data(payload)
            .get("token")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| ApiError::Decode("login response carried no token".to_string()))
    }

    async fn profile(&self) -> Result<User, ApiError> {
        decode(unwrap_data(self.get("user/profile").await?))
    }
}

impl ChallengeApi for HttpApi {
    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        decode(unwrap_list(self.get("genre").await?, &["genres"]))
    }

    async fn genre_questions(&self, genre_id: &str) -> Result<Vec<QuestionSummary>, ApiError> {
        let payload = self.get(&format!("genre/{genre_id}/questions")).await?;
        decode(unwrap_list(payload, &["questions"]))
    }

    async fn question(&self, question_id: &str) -> Result<Question, ApiError> {
        decode(unwrap_data(self.get(&format!("question/{question_id}")).await?))
    }

    async fn submit_flag(&self, question_id: &str, flag: &str) -> Result<bool, ApiError> {
        let body = serde_json::json!({ "flag": flag });
        let payload = self
            .send(
                reqwest::Method::POST,
                &format!("question/{question_id}/flag"),
                Some(&body),
            )
            .await?;
        unwrap_data(payload)
            .get("is_correct")
            .and_then(Value::as_bool)
            .ok_or_else(|| ApiError::Decode("flag response carried no verdict".to_string()))
    }

    async fn leaderboard(&self) -> Result<Leaderboard, ApiError> {
        decode(unwrap_data(self.get("leaderboard/1").await?))
    }
}

impl InstanceApi for HttpApi {
    async fn stored_status(&self, question_id: &str) -> Result<Option<InstanceStatus>, ApiError> {
        match self.get(&format!("ec2/status-from-db/{question_id}")).await {
            Ok(payload) => decode(unwrap_data(payload)).map(Some),
            // No machine has ever been provisioned for this question.
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn live_status(&self, question_id: &str) -> Result<InstanceStatus, ApiError> {
        decode(unwrap_data(self.get(&format!("ec2/status/{question_id}")).await?))
    }

    async fn start(&self, question_id: &str) -> Result<StartResponse, ApiError> {
        decode(unwrap_data(self.patch(&format!("ec2/start/{question_id}")).await?))
    }

    async fn terminate(&self, question_id: &str) -> Result<(), ApiError> {
        self.patch(&format!("ec2/terminate/{question_id}")).await?;
        Ok(())
    }

    async fn extend(&self, question_id: &str) -> Result<InstanceStatus, ApiError> {
        decode(unwrap_data(self.patch(&format!("ec2/extend/{question_id}")).await?))
    }
}
