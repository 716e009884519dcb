use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as AnyhowContext;
use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::{net::TcpListener, signal};

use crate::{
    cli::CliArgs,
    error::{RespondError, Result},
    fetch, footprint,
    responder::Responder,
    session::HttpSession,
    util::current_unix_time,
    website,
};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone)]
struct ServerState {
    session: HttpSession,
    responder: Arc<Responder>,
}

pub async fn run_server(args: &CliArgs) -> Result<()> {
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("parsing listen address `{}`", args.listen))?;

    let state = ServerState {
        session: HttpSession::new(&args.session_config())?,
        responder: Arc::new(args.responder()?),
    };

    let router = Router::new()
        .route("/api/footprint", post(calculate_footprint))
        .route("/api/website", post(calculate_website))
        .route("/api/chat", post(chat))
        .route("/api/tip", get(tip))
        .with_state(state);

    let listener = TcpListener::bind(addr)
        .await
        .context("binding server address")?;
    println!(
        "carbontrace listening on http://{}",
        listener.local_addr().unwrap_or(addr)
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::warn!("failed to listen for shutdown signal: {err:?}");
            }
            println!("Shutdown signal received; stopping server");
        })
        .await
        .context("running server")?;

    Ok(())
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Client-facing failure envelope: `{success: false, error}` with a 400 for
/// caller input errors and a 500 for everything internal.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("internal server error: {message}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server error occurred".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Numeric field that may arrive as a JSON number or a string from a form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn coerce_number(field: &'static str, value: Option<&NumberOrText>) -> ApiResult<f64> {
    let parsed = match value {
        None => 0.0,
        Some(NumberOrText::Number(number)) => *number,
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ApiError::bad_request(format!("invalid number for `{field}`")))?,
    };
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ApiError::bad_request(format!(
            "`{field}` must be a non-negative number"
        )));
    }
    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct FootprintRequest {
    electricity: Option<NumberOrText>,
    #[serde(default)]
    transport_type: String,
    distance: Option<NumberOrText>,
    #[serde(default)]
    diet: String,
}

#[debug_handler]
async fn calculate_footprint(
    Json(request): Json<FootprintRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let electricity = coerce_number("electricity", request.electricity.as_ref())?;
    let distance = coerce_number("distance", request.distance.as_ref())?;

    let result = footprint::compute(electricity, &request.transport_type, distance, &request.diet);
    let tips = footprint::reduction_tips(result.total);
    tracing::debug!("calculation result: {result:?}");

    let mut result = serde_json::to_value(&result)
        .map_err(|err| ApiError::internal(format!("serializing result: {err}")))?;
    result["tips"] = json!(tips);

    Ok(Json(json!({ "success": true, "result": result })))
}

#[derive(Debug, Deserialize)]
struct WebsiteRequest {
    #[serde(default)]
    url: String,
    monthly_views: Option<NumberOrText>,
}

#[debug_handler]
async fn calculate_website(
    State(state): State<ServerState>,
    Json(request): Json<WebsiteRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::bad_request("No URL provided"));
    }

    let monthly_views = match request.monthly_views {
        None => None,
        Some(NumberOrText::Number(number)) => Some(number as i64),
        Some(NumberOrText::Text(text)) => Some(
            text.trim()
                .parse::<i64>()
                .map_err(|_| ApiError::bad_request("invalid number for `monthly_views`"))?,
        ),
    };

    let (size_mb, preview) = tokio::join!(
        fetch::page_size_mb(&state.session, url),
        fetch::text_preview(&state.session, url),
    );

    let result = website::compute(size_mb, monthly_views);
    tracing::debug!("website calculation result: {result:?}");

    let mut result = serde_json::to_value(&result)
        .map_err(|err| ApiError::internal(format!("serializing result: {err}")))?;
    result["text_preview"] = json!(preview);

    Ok(Json(json!({ "success": true, "result": result })))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[debug_handler]
async fn chat(
    State(state): State<ServerState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let reply = state
        .responder
        .respond(&request.message)
        .await
        .map_err(|err| match err {
            RespondError::EmptyMessage => ApiError::bad_request("No message provided"),
        })?;

    Ok(Json(json!({
        "success": true,
        "response": reply.text,
        "tier": reply.tier,
    })))
}

/// Rotating web-sustainability tips, indexed by wall-clock time so repeated
/// calls cycle through the list without an RNG.
const TIPS: &[&str] = &[
    "Use system fonts instead of custom web fonts to reduce page weight and carbon emissions.",
    "Optimize your images before uploading them to reduce file size and bandwidth usage.",
    "Consider using dark mode to reduce energy consumption on OLED displays.",
    "Implement lazy loading for images and videos to reduce initial page load size.",
    "Choose a green web hosting provider that uses renewable energy for their data centers.",
    "Use CSS instead of JavaScript for animations when possible to reduce CPU usage.",
    "Minify your CSS, JavaScript, and HTML files to reduce file sizes.",
    "Implement proper caching strategies to reduce repeat downloads and server requests.",
    "Consider a static site if your content doesn't need to be dynamic.",
    "Regularly audit your website's performance and make optimizations.",
];

async fn tip() -> Json<serde_json::Value> {
    let index = current_unix_time() as usize % TIPS.len();
    Json(json!({ "tip": TIPS[index] }))
}
