/// Timeout-bounded orchestration of a single contact lookup.
///
/// The resolve call races a fixed timer; whichever settles first wins and
/// the loser is dropped. Profile enrichment happens sequentially after a
/// successful resolve and is best-effort: a found number stays found even
/// when its profile cannot be fetched.
use crate::models::ProfileSnapshot;
use crate::phone::ValidationError;
use crate::session::SessionClient;
use std::time::Duration;
use tokio::time::timeout;

/// Result of one verification request, consumed exactly once by the
/// response builder.
#[derive(Debug, Clone)]
pub enum VerificationOutcome {
    /// The number belongs to a registered account. `profile` is `None` when
    /// the enrichment fetch failed.
    Valid {
        contact_id: String,
        profile: Option<ProfileSnapshot>,
    },
    /// The number has no account on the platform.
    NotFound,
    /// The session is not authenticated yet; the caller should retry later.
    NotReady,
    /// The resolve call did not settle within the time budget.
    Timeout,
    /// The request was rejected before any collaborator call.
    InvalidInput(ValidationError),
    /// The collaborator failed while resolving.
    InternalError(String),
}

/// Runs the lookup for an already-validated canonical number.
///
/// When `session_ready` is false the collaborator is never contacted and
/// `NotReady` is returned immediately. Otherwise the resolve call races a
/// timer of `time_budget`; on timeout the pending call is dropped without
/// being awaited further.
pub async fn lookup(
    session: &dyn SessionClient,
    session_ready: bool,
    canonical: &str,
    time_budget: Duration,
) -> VerificationOutcome {
    if !session_ready {
        tracing::debug!("Session not ready, skipping lookup for {}", canonical);
        return VerificationOutcome::NotReady;
    }

    let resolved = match timeout(time_budget, session.resolve_number(canonical)).await {
        Ok(resolved) => resolved,
        Err(_) => {
            tracing::warn!(
                "Contact resolution timed out after {:?} for {}",
                time_budget,
                canonical
            );
            return VerificationOutcome::Timeout;
        }
    };

    let identity = match resolved {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            tracing::info!("Number {} is not a registered contact", canonical);
            return VerificationOutcome::NotFound;
        }
        Err(e) => {
            tracing::error!("Contact resolution failed for {}: {}", canonical, e);
            return VerificationOutcome::InternalError(e.to_string());
        }
    };

    // Enrichment failure must not invalidate the primary answer.
    let profile = match session.get_profile(&identity.serialized).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!(
                "Could not fetch contact details for {}: {}",
                identity.serialized,
                e
            );
            None
        }
    };

    VerificationOutcome::Valid {
        contact_id: identity.serialized,
        profile,
    }
}
