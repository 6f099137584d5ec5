use crate::config::Config;
use crate::lookup::{self, VerificationOutcome};
use crate::models::{CheckContactBody, CheckContactQuery, RawPhoneInput};
use crate::phone::{self, InputShape};
use crate::response::{self, Envelope, ResponseContext};
use crate::session::SessionClient;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// The session collaborator; injected so the pipeline is testable with a
    /// mock client.
    pub session: Arc<dyn SessionClient>,
}

/// Builds the HTTP router over the shared state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/status", get(connection_status))
        .route("/check-contact", post(check_contact_post).get(check_contact_get))
        .with_state(state)
}

/// GET /
///
/// Service descriptor with the session readiness flag and endpoint list.
pub async fn root(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Envelope>) {
    let status = if state.session.is_ready().await {
        "Conectado"
    } else {
        "Aguardando QR Code"
    };

    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            message: "API WhatsApp Check Contact".to_string(),
            dados: json!({
                "status": status,
                "endpoints": [
                    {"method": "POST", "path": "/check-contact", "description": "Verifica se número é contato WhatsApp"},
                    {"method": "GET", "path": "/check-contact?phone=NUMERO", "description": "Verifica via GET"},
                    {"method": "GET", "path": "/status", "description": "Status da conexão"},
                ],
                "timestamp": Utc::now().to_rfc3339(),
            }),
        }),
    )
}

/// GET /status
///
/// Readiness and authentication state of the session collaborator.
pub async fn connection_status(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Envelope>) {
    let is_ready = state.session.is_ready().await;
    let is_authenticated = state
        .session
        .auth_state()
        .await
        .unwrap_or_else(|| "unknown".to_string());

    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            message: "Status da conexão WhatsApp".to_string(),
            dados: json!({
                "isReady": is_ready,
                "isAuthenticated": is_authenticated,
                "timestamp": Utc::now().to_rfc3339(),
            }),
        }),
    )
}

/// POST /check-contact
///
/// Accepts either `{phoneNumber, countryCode?}` or `{numero, ddd?, ddi?}`.
/// A missing or non-JSON body is treated as missing input so the standard
/// envelope is still produced.
pub async fn check_contact_post(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CheckContactBody>>,
) -> (StatusCode, Json<Envelope>) {
    let started = Instant::now();
    let body = body.map(|Json(body)| body).unwrap_or_default();
    tracing::info!("POST /check-contact");

    let input = body.into_raw_input(&state.config.default_country_code);
    run_check(&state, input, InputShape::Body, started).await
}

/// GET /check-contact?phone=NUMERO
///
/// Same pipeline as the POST entry; the country code is fixed to the
/// configured default.
pub async fn check_contact_get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckContactQuery>,
) -> (StatusCode, Json<Envelope>) {
    let started = Instant::now();
    tracing::info!("GET /check-contact");

    let input = query.phone.map(|phone| RawPhoneInput {
        raw: phone,
        country_code: state.config.default_country_code.clone(),
    });
    run_check(&state, input, InputShape::Query, started).await
}

/// The verification pipeline shared by both entry shapes.
///
/// Normalize, validate, consult session readiness, run the timeout-bounded
/// lookup, and shape the envelope. Validation failures and a not-ready
/// session short-circuit without contacting the collaborator.
async fn run_check(
    state: &AppState,
    input: Option<RawPhoneInput>,
    shape: InputShape,
    started: Instant,
) -> (StatusCode, Json<Envelope>) {
    let (raw, country_code) = match &input {
        Some(input) => (input.raw.clone(), input.country_code.clone()),
        None => (String::new(), state.config.default_country_code.clone()),
    };

    let mut ctx = ResponseContext {
        normalized: phone::normalize(&raw, &country_code),
        original_input: raw.clone(),
        country_code,
        elapsed_ms: 0,
        development: state.config.is_development(),
    };

    let outcome = match phone::validate(
        input.as_ref().map(|input| input.raw.as_str()),
        &ctx.normalized,
        shape,
    ) {
        Err(error) => {
            tracing::info!("Rejected check-contact request: {:?}", error);
            VerificationOutcome::InvalidInput(error)
        }
        Ok(()) => {
            let ready = state.session.is_ready().await;
            lookup::lookup(
                state.session.as_ref(),
                ready,
                &ctx.normalized,
                Duration::from_millis(state.config.lookup_timeout_ms),
            )
            .await
        }
    };

    ctx.elapsed_ms = started.elapsed().as_millis();
    let (status, envelope) = response::build(outcome, &ctx);
    (status, Json(envelope))
}
