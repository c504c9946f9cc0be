use crate::api::models::{LikeResponse, MessageId};
use crate::config::Config;
use crate::error::{LikeError, Result};
use reqwest::Client as HttpClient;
use std::future::Future;
use url::Url;

/// The one remote call the like handler depends on.
pub trait LikeApi {
    fn like_message(&self, id: MessageId) -> impl Future<Output = Result<LikeResponse>>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/messages/{id}/like`, keeping any path prefix on the base url.
    pub fn like_url(&self, id: &MessageId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LikeError::Config(format!("{} cannot be used as a base url", self.base_url)))?
            .pop_if_empty()
            .extend(["messages", id.as_str(), "like"]);
        Ok(url)
    }

    /// POST with no body. Any non-2xx status is a failure even if the body parses.
    pub async fn like(&self, id: &MessageId) -> Result<LikeResponse> {
        let url = self.like_url(id)?;
        log::debug!("POST {}", url);
        let resp = self.http.post(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LikeError::Status(status));
        }
        let body = resp.bytes().await?;
        let parsed: LikeResponse = serde_json::from_slice(&body)?;
        Ok(parsed)
    }
}

impl LikeApi for ApiClient {
    fn like_message(&self, id: MessageId) -> impl Future<Output = Result<LikeResponse>> {
        async move { self.like(&id).await }
    }
}

/// Runs each request on the shared Tokio runtime. Needed when the caller polls from an
/// executor without a Tokio reactor, such as the GTK main context. The request starts as
/// soon as `like_message` is called.
#[derive(Debug, Clone)]
pub struct RuntimeApi(pub ApiClient);

impl LikeApi for RuntimeApi {
    fn like_message(&self, id: MessageId) -> impl Future<Output = Result<LikeResponse>> {
        let client = self.0.clone();
        let handle = crate::utils::spawn_on_runtime(async move { client.like(&id).await });
        async move { Ok::<_, LikeError>(handle.await??) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    type Hits = Arc<Mutex<Vec<String>>>;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn toggle(State(hits): State<Hits>, Path(id): Path<String>, body: String) -> impl IntoResponse {
        assert!(body.is_empty());
        hits.lock().unwrap().push(id.clone());
        match id.as_str() {
            "500" => (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"liked": true}))).into_response(),
            "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
            "bare" => Json(serde_json::json!({"ok": true})).into_response(),
            _ => Json(serde_json::json!({"liked": id == "42"})).into_response(),
        }
    }

    async fn client_for_test_server() -> (ApiClient, Hits) {
        let hits: Hits = Arc::default();
        let app = Router::new()
            .route("/messages/:id/like", post(toggle))
            .with_state(hits.clone());
        let base = serve(app).await;
        let client = ApiClient::new(&Config::new(&base).unwrap()).unwrap();
        (client, hits)
    }

    fn id(raw: &str) -> MessageId {
        MessageId::parse(raw).unwrap()
    }

    #[test]
    fn like_url_keeps_base_path_and_encodes_id() {
        let client = ApiClient::new(&Config::new("https://warbler.example.com/api/").unwrap()).unwrap();
        assert_eq!(
            client.like_url(&id("42")).unwrap().as_str(),
            "https://warbler.example.com/api/messages/42/like"
        );
        assert_eq!(
            client.like_url(&id("a b/c")).unwrap().as_str(),
            "https://warbler.example.com/api/messages/a%20b%2Fc/like"
        );
    }

    #[tokio::test]
    async fn posts_once_and_reads_liked() {
        let (client, hits) = client_for_test_server().await;

        let liked = client.like(&id("42")).await.unwrap();
        assert!(liked.liked);
        let unliked = client.like(&id("7")).await.unwrap();
        assert!(!unliked.liked);

        assert_eq!(*hits.lock().unwrap(), vec!["42".to_string(), "7".to_string()]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (client, _) = client_for_test_server().await;
        let err = client.like(&id("500")).await.unwrap_err();
        assert!(matches!(err, LikeError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn unparseable_body_is_a_decode_error() {
        let (client, _) = client_for_test_server().await;
        let err = client.like(&id("garbage")).await.unwrap_err();
        assert!(matches!(err, LikeError::Decode(_)));
    }

    #[tokio::test]
    async fn json_without_liked_reads_as_not_liked() {
        let (client, _) = client_for_test_server().await;
        let resp = client.like(&id("bare")).await.unwrap();
        assert!(!resp.liked);
    }

    #[tokio::test]
    async fn runtime_api_delegates_to_client() {
        let (client, hits) = client_for_test_server().await;
        let api = RuntimeApi(client);

        let resp = api.like_message(id("42")).await.unwrap();
        assert!(resp.liked);
        assert_eq!(hits.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&Config::new(&format!("http://{}", addr)).unwrap()).unwrap();
        let err = client.like(&id("42")).await.unwrap_err();
        assert!(matches!(err, LikeError::Transport(_)));
    }
}
