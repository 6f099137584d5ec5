use crate::lookup::VerificationOutcome;
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

/// The stable `{success, message, dados}` shape returned on every path.
///
/// External consumers rely on this structure being identical across success
/// and error responses; only the field values vary. `dados` always carries a
/// `timestamp` when it is an object.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    pub dados: Value,
}

/// Per-request context folded into `dados` by the builder.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// The input as supplied by the caller (structured shapes concatenated).
    pub original_input: String,
    /// Effective country code used for normalization.
    pub country_code: String,
    /// Canonical number produced by the normalizer.
    pub normalized: String,
    /// Wall-clock milliseconds from request receipt to envelope construction.
    pub elapsed_ms: u128,
    /// Whether internal error detail may be echoed to the client.
    pub development: bool,
}

/// Maps a verification outcome to its HTTP status and response envelope.
pub fn build(outcome: VerificationOutcome, ctx: &ResponseContext) -> (StatusCode, Envelope) {
    let timestamp = Utc::now().to_rfc3339();

    match outcome {
        VerificationOutcome::Valid {
            contact_id,
            profile,
        } => {
            let contact_details = match profile {
                Some(profile) => json!({
                    "name": profile.display_name(),
                    "isBusiness": profile.is_business,
                    "isEnterprise": profile.is_enterprise,
                    "isUser": profile.is_user,
                    "isGroup": profile.is_group,
                    "isMe": profile.is_me,
                }),
                None => Value::Null,
            };

            (
                StatusCode::OK,
                Envelope {
                    success: true,
                    message: "Contato válido do WhatsApp".to_string(),
                    dados: json!({
                        "isWhatsAppContact": true,
                        "phoneNumber": ctx.normalized,
                        "contactId": contact_id,
                        "contactDetails": contact_details,
                        "metadata": metadata(ctx),
                        "timestamp": timestamp,
                        "responseTime": format!("{}ms", ctx.elapsed_ms),
                    }),
                },
            )
        }
        VerificationOutcome::NotFound => (
            StatusCode::OK,
            Envelope {
                success: true,
                message: "Contato não encontrado".to_string(),
                dados: json!({
                    "isWhatsAppContact": false,
                    "phoneNumber": ctx.normalized,
                    "contactId": Value::Null,
                    "contactDetails": Value::Null,
                    "metadata": metadata(ctx),
                    "timestamp": timestamp,
                    "responseTime": format!("{}ms", ctx.elapsed_ms),
                }),
            },
        ),
        VerificationOutcome::NotReady => (
            StatusCode::SERVICE_UNAVAILABLE,
            Envelope {
                success: false,
                message: "Cliente do WhatsApp não está pronto. Aguarde a autenticação.".to_string(),
                dados: json!({
                    "qrNeeded": true,
                    "status": "waiting_authentication",
                    "timestamp": timestamp,
                }),
            },
        ),
        VerificationOutcome::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            Envelope {
                success: false,
                message: "Tempo limite excedido ao verificar contato".to_string(),
                dados: json!({
                    "errorType": "timeout",
                    "timestamp": timestamp,
                    "retryAfter": 30,
                }),
            },
        ),
        VerificationOutcome::InvalidInput(error) => (
            StatusCode::BAD_REQUEST,
            Envelope {
                success: false,
                message: error.message().to_string(),
                dados: Value::Null,
            },
        ),
        VerificationOutcome::InternalError(detail) => {
            let mut dados = json!({
                "errorType": "internal_error",
                "timestamp": timestamp,
            });
            // Raw detail is only echoed outside production.
            if ctx.development {
                dados["error"] = json!(detail);
            }

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope {
                    success: false,
                    message: "Erro ao verificar contato".to_string(),
                    dados,
                },
            )
        }
    }
}

fn metadata(ctx: &ResponseContext) -> Value {
    json!({
        "originalNumber": ctx.original_input,
        "countryCode": ctx.country_code,
        "formattedNumber": ctx.normalized,
        "length": ctx.normalized.len(),
        "validation": "valid",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileSnapshot;
    use crate::phone::{InputShape, ValidationError};

    fn ctx() -> ResponseContext {
        ResponseContext {
            original_input: "(62) 91234-5678".to_string(),
            country_code: "55".to_string(),
            normalized: "5562912345678".to_string(),
            elapsed_ms: 42,
            development: false,
        }
    }

    #[test]
    fn valid_outcome_builds_full_payload() {
        let outcome = VerificationOutcome::Valid {
            contact_id: "5562912345678@c.us".to_string(),
            profile: Some(ProfileSnapshot {
                pushname: Some("Maria".to_string()),
                is_user: true,
                ..Default::default()
            }),
        };

        let (status, envelope) = build(outcome, &ctx());
        assert_eq!(status, StatusCode::OK);
        assert!(envelope.success);
        assert_eq!(envelope.message, "Contato válido do WhatsApp");
        assert_eq!(envelope.dados["isWhatsAppContact"], json!(true));
        assert_eq!(envelope.dados["contactId"], json!("5562912345678@c.us"));
        assert_eq!(envelope.dados["contactDetails"]["name"], json!("Maria"));
        assert_eq!(envelope.dados["metadata"]["formattedNumber"], json!("5562912345678"));
        assert_eq!(envelope.dados["metadata"]["length"], json!(13));
        assert_eq!(envelope.dados["responseTime"], json!("42ms"));
    }

    #[test]
    fn valid_outcome_without_profile_keeps_null_details() {
        let outcome = VerificationOutcome::Valid {
            contact_id: "5562912345678@c.us".to_string(),
            profile: None,
        };

        let (status, envelope) = build(outcome, &ctx());
        assert_eq!(status, StatusCode::OK);
        assert!(envelope.success);
        assert_eq!(envelope.dados["contactDetails"], Value::Null);
    }

    #[test]
    fn not_found_is_a_successful_answer() {
        let (status, envelope) = build(VerificationOutcome::NotFound, &ctx());
        assert_eq!(status, StatusCode::OK);
        assert!(envelope.success);
        assert_eq!(envelope.message, "Contato não encontrado");
        assert_eq!(envelope.dados["isWhatsAppContact"], json!(false));
        assert_eq!(envelope.dados["contactId"], Value::Null);
    }

    #[test]
    fn not_ready_maps_to_service_unavailable() {
        let (status, envelope) = build(VerificationOutcome::NotReady, &ctx());
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!envelope.success);
        assert_eq!(envelope.dados["qrNeeded"], json!(true));
        assert_eq!(envelope.dados["status"], json!("waiting_authentication"));
    }

    #[test]
    fn timeout_advertises_retry_hint() {
        let (status, envelope) = build(VerificationOutcome::Timeout, &ctx());
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(envelope.message, "Tempo limite excedido ao verificar contato");
        assert_eq!(envelope.dados["errorType"], json!("timeout"));
        assert_eq!(envelope.dados["retryAfter"], json!(30));
    }

    #[test]
    fn invalid_input_carries_validator_message_and_null_dados() {
        let outcome = VerificationOutcome::InvalidInput(ValidationError::MissingInput(InputShape::Query));
        let (status, envelope) = build(outcome, &ctx());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.message, "Parâmetro \"phone\" é obrigatório (ex: ?phone=6282391269)");
        assert_eq!(envelope.dados, Value::Null);
    }

    #[test]
    fn internal_error_detail_hidden_in_production() {
        let outcome = VerificationOutcome::InternalError("bridge exploded".to_string());
        let (status, envelope) = build(outcome, &ctx());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.dados["errorType"], json!("internal_error"));
        assert!(envelope.dados.get("error").is_none());
    }

    #[test]
    fn internal_error_detail_echoed_in_development() {
        let mut dev_ctx = ctx();
        dev_ctx.development = true;

        let outcome = VerificationOutcome::InternalError("bridge exploded".to_string());
        let (_, envelope) = build(outcome, &dev_ctx);
        assert_eq!(envelope.dados["error"], json!("bridge exploded"));
    }
}
