//! HTTP server: pages rendered per request plus the signup endpoint

use anyhow::Result;
use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentType;
use crate::pages::Pages;
use crate::signup::{email_from_body, RequestSource, SignupRecorder};
use crate::Site;

/// Shared state for all handlers
pub struct AppState {
    pub pages: Pages,
    pub recorder: SignupRecorder,
    pub static_dir: PathBuf,
}

/// Routes of the site
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .route("/compare/:slug", get(comparison_handler))
        .route("/faq/:slug", get(faq_handler))
        .route("/api/signup", post(signup_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(AppState {
        pages: site.pages()?,
        recorder: site.recorder()?,
        static_dir: site.static_dir.clone(),
    });
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn render_failure(e: anyhow::Error) -> Response {
    tracing::error!("Failed to render page: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.pages.home().await {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn blog_index_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.pages.blog_index().await {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn item_response(state: &AppState, kind: ContentType, slug: &str) -> Response {
    match state.pages.item(kind, slug).await {
        Ok(page) if page.found => Html(page.html).into_response(),
        Ok(page) => (StatusCode::NOT_FOUND, Html(page.html)).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn blog_post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    item_response(&state, ContentType::BlogPost, &slug).await
}

async fn comparison_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    item_response(&state, ContentType::Comparison, &slug).await
}

async fn faq_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    item_response(&state, ContentType::Faq, &slug).await
}

/// `POST /api/signup` with a JSON body `{"email": "..."}`
async fn signup_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let source = RequestSource::from_headers(&headers);

    let result = match email_from_body(&body) {
        Ok(email) => state.recorder.record(&email, &source).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!("Signup failed: {}", e);
            } else {
                tracing::debug!("Rejected signup: {}", e);
            }
            e.into_response()
        }
    }
}

/// Static assets, then the not-found page
async fn fallback_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    if state.static_dir.is_dir() {
        let mut service = ServeDir::new(&state.static_dir);
        if let Ok(response) = service.try_call(request).await {
            if response.status() != StatusCode::NOT_FOUND {
                return response.into_response();
            }
        }
    }

    match state.pages.not_found(None) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => render_failure(e),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{ContentLoader, MarkdownRenderer, MemoryRepository};
    use crate::signup::MemoryStore;
    use axum::http::HeaderValue;
    use tempfile::TempDir;

    fn state(store: Arc<MemoryStore>, static_dir: PathBuf) -> Arc<AppState> {
        let repo = MemoryRepository::new().with(
            ContentType::Comparison,
            "secondlook-vs-symptom-checkers",
            "---\ntitle: SecondLook vs Symptom Checkers\ndescription: Compared\n---\n| a | b |\n|---|---|\n| 1 | 2 |\n",
        );
        let loader = ContentLoader::new(Arc::new(repo), Arc::new(MarkdownRenderer::new()));
        Arc::new(AppState {
            pages: Pages::new(SiteConfig::default(), loader).unwrap(),
            recorder: SignupRecorder::new(store, "secondlook"),
            static_dir,
        })
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_item_routes() {
        let state = state(Arc::new(MemoryStore::new()), PathBuf::from("missing"));

        let response = comparison_handler(
            State(state.clone()),
            Path("secondlook-vs-symptom-checkers".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<table>"));

        let response = blog_post_handler(State(state), Path("nope".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response)
            .await
            .contains("<title>Post Not Found | SecondLook</title>"));
    }

    #[tokio::test]
    async fn test_signup_success() {
        let store = Arc::new(MemoryStore::new());
        let state = state(store.clone(), PathBuf::from("missing"));

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("192.0.2.7"));
        let response = signup_handler(
            State(state),
            headers,
            Bytes::from_static(br#"{"email":" Someone@Example.org "}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"success":true}"#);

        let list = store.list("email_signups:secondlook").await;
        assert_eq!(list.len(), 1);
        assert!(list[0].contains(r#""email":"someone@example.org""#));
        assert!(list[0].contains(r#""sourceIP":"192.0.2.7""#));
        assert_eq!(store.counter("email_signups_count:secondlook").await, 1);
    }

    #[tokio::test]
    async fn test_signup_rejections() {
        let store = Arc::new(MemoryStore::new());
        let state = state(store.clone(), PathBuf::from("missing"));

        let cases: [(&[u8], &str); 3] = [
            (&b"{}"[..], "Valid email address is required"),
            (&b"garbage"[..], "Valid email address is required"),
            (&br#"{"email":"nope"}"#[..], "Please enter a valid email address"),
        ];
        for (body, message) in cases {
            let response = signup_handler(
                State(state.clone()),
                HeaderMap::new(),
                Bytes::copy_from_slice(body),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json: serde_json::Value =
                serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(json["error"], message);
        }
        assert!(store.list("email_signups:secondlook").await.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_serves_static_then_not_found() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("robots.txt"), "User-agent: *\n").unwrap();
        let state = state(Arc::new(MemoryStore::new()), dir.path().to_path_buf());

        let request = Request::builder().uri("/robots.txt").body(Body::empty()).unwrap();
        let response = fallback_handler(State(state.clone()), request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "User-agent: *\n");

        let request = Request::builder().uri("/nowhere").body(Body::empty()).unwrap();
        let response = fallback_handler(State(state), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("Page Not Found"));
    }
}
