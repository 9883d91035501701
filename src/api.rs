use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::error::ApiError;
use crate::models::{
    ErrorBody, EventTypeStatistics, GiftMoney, GiftMoneyRequest, GiftMoneySummary, LoginRequest,
    LoginResponse, MonthlyStatistics, Page, PersonStatistics, RegisterRequest, RelationStatistics,
    UploadResponse, User, YearlyStatistics,
};
use crate::session::ViewState;

/// Maps a failed response to an [`ApiError`].
pub fn error_from_response(status: u16, content_type: Option<&str>, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return ApiError::Server {
            status,
            message: String::new(),
        };
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message,
            errors: Some(errors),
        }) => ApiError::Validation {
            message: message.unwrap_or_default(),
            errors,
        },
        Ok(ErrorBody { message, .. }) => ApiError::Server {
            status,
            message: message.unwrap_or_default(),
        },
        Err(err) => {
            debug!(%err, "unreadable error body");
            ApiError::Server {
                status,
                message: String::new(),
            }
        }
    }
}

fn browser_error(err: JsValue) -> ApiError {
    ApiError::Browser(format!("{:?}", err))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base: base.into(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(resp: Response) -> Result<Response, ApiError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let content_type = resp.headers().get("content-type");
        let body = resp.text().await.unwrap_or_default();
        let err = error_from_response(status, content_type.as_deref(), &body);
        error!(status, url = %resp.url(), %err, "request failed");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let resp = Self::check(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let builder = self
            .authorize(Request::get(&url))
            .query(query.iter().map(|(k, v)| (*k, v.as_str())));
        Self::decode(builder.send().await?).await
    }

    async fn send_body<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(builder).json(body)?;
        Self::decode(request.send().await?).await
    }

    pub async fn login(&self, user_id: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            user_id: user_id.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .send_body(Request::post(&self.url("/auth/login")), &body)
            .await?;
        info!(user_id, "logged in");
        Ok(resp)
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        self.send_body(Request::post(&self.url("/auth/register")), body)
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me", &[]).await
    }

    pub async fn list_gifts(&self, view: &ViewState) -> Result<Page<GiftMoney>, ApiError> {
        self.get("/gift-money", &view.query()).await
    }

    pub async fn get_gift(&self, id: i64) -> Result<GiftMoney, ApiError> {
        self.get(&format!("/gift-money/{}", id), &[]).await
    }

    pub async fn create_gift(&self, body: &GiftMoneyRequest) -> Result<GiftMoney, ApiError> {
        let created: GiftMoney = self
            .send_body(Request::post(&self.url("/gift-money")), body)
            .await?;
        info!(id = created.id, "gift created");
        Ok(created)
    }

    pub async fn update_gift(&self, id: i64, body: &GiftMoneyRequest) -> Result<GiftMoney, ApiError> {
        let updated = self
            .send_body(Request::put(&self.url(&format!("/gift-money/{}", id))), body)
            .await?;
        info!(id, "gift updated");
        Ok(updated)
    }

    pub async fn delete_gift(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/gift-money/{}", id));
        let resp = self.authorize(Request::delete(&url)).send().await?;
        Self::check(resp).await?;
        info!(id, "gift deleted");
        Ok(())
    }

    /// Posts a spreadsheet as multipart `file`. The browser sets the
    /// multipart content type, so only the bearer header is added.
    pub async fn upload_gifts(&self, file: &File) -> Result<UploadResponse, ApiError> {
        let form = FormData::new().map_err(browser_error)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(browser_error)?;
        let request = self
            .authorize(Request::post(&self.url("/gift-money/upload")))
            .body(form)?;
        let result: UploadResponse = Self::decode(request.send().await?).await?;
        info!(
            succeeded = result.success_count,
            failed = result.fail_count,
            "spreadsheet imported"
        );
        Ok(result)
    }

    /// Link target for the CSV import template. The route needs no token.
    pub fn template_url(&self) -> String {
        self.url("/template/download")
    }

    pub async fn summary(&self) -> Result<GiftMoneySummary, ApiError> {
        self.get("/gift-money/statistics", &[]).await
    }

    pub async fn yearly(&self) -> Result<Vec<YearlyStatistics>, ApiError> {
        self.get("/statistics/yearly", &[]).await
    }

    pub async fn monthly(&self, months: u32) -> Result<Vec<MonthlyStatistics>, ApiError> {
        self.get("/statistics/monthly", &[("months", months.to_string())])
            .await
    }

    pub async fn persons(&self) -> Result<Vec<PersonStatistics>, ApiError> {
        self.get("/statistics/person", &[]).await
    }

    pub async fn event_types(&self) -> Result<Vec<EventTypeStatistics>, ApiError> {
        self.get("/statistics/event-type", &[]).await
    }

    pub async fn relations(&self) -> Result<Vec<RelationStatistics>, ApiError> {
        self.get("/statistics/relation", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json;charset=UTF-8");

    #[test]
    fn unauthorized_wins_over_body() {
        let err = error_from_response(401, JSON, r#"{"message":"expired"}"#);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn field_errors_become_validation() {
        let body = r#"{"message":"Validation failed","errors":{"amount":"must be positive"}}"#;
        match error_from_response(400, JSON, body) {
            ApiError::Validation { message, errors } => {
                assert_eq!(message, "Validation failed");
                assert_eq!(errors.get("amount").map(String::as_str), Some("must be positive"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn message_only_is_a_server_error() {
        match error_from_response(404, JSON, r#"{"message":"Not found"}"#) {
            ApiError::Server { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_json_bodies_use_the_default_message() {
        let err = error_from_response(502, Some("text/html"), "<html>Bad gateway</html>");
        assert_eq!(err.user_message("Server error."), "Server error.");
        let err = error_from_response(500, JSON, "not json");
        assert_eq!(err.user_message("Server error."), "Server error.");
    }

    #[test]
    fn urls_join_the_base() {
        let client = ApiClient::new("/api", None);
        assert_eq!(client.url("/gift-money/3"), "/api/gift-money/3");
        assert_eq!(client.template_url(), "/api/template/download");
    }
}
