//! HTTP transport for the screen router.
//!
//! Every registered screen is served at `{base_path}{screen path}`. `GET` renders the screen
//! with an empty interaction (the initial card load). `POST` takes a frame action payload.
//! Transaction screens answer with an `eth_sendTransaction` request, frame screens with
//! their render description.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::FrameConfig;
use crate::error::Error;
use crate::frame::{FrameActionPayload, FrameResponse, InteractionContext};
use crate::ScreenRouter;

/// Service name reported by `/health`
pub const SERVICE_NAME: &str = "op-delegation-frame";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::UnknownRoute(_) => ApiError::not_found(err.to_string()),
            Error::MissingAddress | Error::InvalidAddress(_) => {
                ApiError::bad_request(err.to_string())
            }
            other => {
                error!("Screen handler failed: {}", other);
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": {
                    "message": self.message,
                    "status": self.status.as_u16(),
                }
            })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    chain_id: String,
}

fn respond(
    router: &ScreenRouter,
    path: &str,
    ctx: InteractionContext,
) -> Result<Response, ApiError> {
    match router.dispatch(path, &ctx)? {
        FrameResponse::Frame(view) => Ok(Json(view).into_response()),
        FrameResponse::Transaction(call) => {
            let request = call.to_transaction_request()?;
            Ok(Json(request).into_response())
        }
    }
}

async fn health(State(router): State<ScreenRouter>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        chain_id: router.config().chain.chain_id.clone(),
    })
}

async fn not_found(uri: Uri) -> ApiError {
    warn!("No screen for {}", uri.path());
    ApiError::not_found(format!("No screen registered for path: {}", uri.path()))
}

/// Build the axum router serving every screen registered on `screens`
pub fn build_router(screens: ScreenRouter) -> Router {
    let mut frames: Router<ScreenRouter> = Router::new();

    for (path, _) in screens.routes() {
        let get_path = path.to_string();
        let post_path = path.to_string();
        frames = frames.route(
            path,
            get(move |State(router): State<ScreenRouter>| async move {
                respond(&router, &get_path, InteractionContext::default())
            })
            .post(
                move |State(router): State<ScreenRouter>,
                      Json(payload): Json<FrameActionPayload>| async move {
                    respond(&router, &post_path, payload.into())
                },
            ),
        );
    }

    let base_path = screens.config().server.base_path.clone();
    let app = Router::new().route("/health", get(health));
    let app = if base_path.is_empty() || base_path == "/" {
        app.merge(frames)
    } else {
        app.nest(&base_path, frames)
    };

    app.fallback(not_found).with_state(screens)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: FrameConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow::anyhow!(
                "Invalid bind address '{}:{}': {}",
                config.server.host,
                config.server.port,
                e
            )
        })?;
    let base_path = config.server.base_path.clone();

    let app = build_router(ScreenRouter::new(config));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

    info!("Frame server listening on http://{}{}", addr, base_path);
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Frame server error: {}", e))
}
