// src/server.rs
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::analysis::{analyze_design, analyze_flow, compare_designs, FlowInput};
use crate::error::AnalysisError;
use crate::llm::Llm;
use crate::prompts::ReviewDetail;
use crate::types::{ComparisonAnalysis, DesignAnalysis, FlowAnalysis};

/// Base64 screenshots are large; two of them must fit in one comparison request.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct Engine {
    pub llm: Arc<dyn Llm>,
}

#[derive(Deserialize)]
pub struct AnalyzeReq {
    image: Option<String>,
    #[serde(default)]
    concise: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReq {
    your_design: Option<String>,
    competitor_design: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReq {
    mode: Option<String>,
    flow_description: Option<String>,
    image: Option<String>,
}

#[derive(Serialize)]
pub struct AnalysisResp<T> {
    analysis: T,
}

#[derive(Serialize)]
struct ErrorResp {
    error: String,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorResp { error: self.1 })).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let status = match &err {
            AnalysisError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AnalysisError::NoContent => StatusCode::BAD_GATEWAY,
            AnalysisError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(%status, error = %err, "analysis failed");
        ApiError(status, err.to_string())
    }
}

fn bad_request(msg: &str) -> ApiError {
    ApiError(StatusCode::BAD_REQUEST, msg.to_string())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn analyze(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<AnalyzeReq>,
) -> Result<Json<AnalysisResp<DesignAnalysis>>, ApiError> {
    let image = present(req.image).ok_or_else(|| bad_request("No image provided"))?;
    let detail = if req.concise { ReviewDetail::Concise } else { ReviewDetail::Detailed };
    let analysis = analyze_design(engine.llm.as_ref(), &image, detail).await?;
    Ok(Json(AnalysisResp { analysis }))
}

pub async fn compare(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<CompareReq>,
) -> Result<Json<AnalysisResp<ComparisonAnalysis>>, ApiError> {
    let (Some(yours), Some(theirs)) = (present(req.your_design), present(req.competitor_design)) else {
        return Err(bad_request("Both designs are required"));
    };
    let analysis = compare_designs(engine.llm.as_ref(), &yours, &theirs).await?;
    Ok(Json(AnalysisResp { analysis }))
}

pub async fn analyze_flow_route(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<FlowReq>,
) -> Result<Json<AnalysisResp<FlowAnalysis>>, ApiError> {
    let input = match (req.mode.as_deref(), present(req.flow_description), present(req.image)) {
        (Some("text"), Some(description), _) => FlowInput::Text(description),
        (Some("image"), _, Some(image)) => FlowInput::Image(image),
        _ => {
            return Err(bad_request(
                "Invalid request format. Please provide either flowDescription or image.",
            ))
        }
    };
    let analysis = analyze_flow(engine.llm.as_ref(), &input).await?;
    Ok(Json(AnalysisResp { analysis }))
}

pub fn router(engine: Engine) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/compare", post(compare))
        .route("/api/analyze-flow", post(analyze_flow_route))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(engine))
}

pub async fn run_server(engine: Engine, addr: &str) -> anyhow::Result<()> {
    let app = router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
