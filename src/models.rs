use serde::{Deserialize, Serialize};

// ============ Request Models ============

/// Body accepted by `POST /check-contact`.
///
/// Two shapes are supported: a free-form `phoneNumber` (with optional
/// `countryCode`) or the structured `numero`/`ddd`/`ddi` triple. All fields
/// are optional at the serde level; presence is enforced by the validator so
/// that a missing number still produces the standard envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckContactBody {
    pub phone_number: Option<String>,
    pub country_code: Option<String>,
    pub numero: Option<String>,
    pub ddd: Option<String>,
    pub ddi: Option<String>,
}

/// Query parameters accepted by `GET /check-contact`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckContactQuery {
    pub phone: Option<String>,
}

/// A single request's phone input after both accepted shapes have been
/// collapsed to free-form. Ephemeral; lives for one request only.
#[derive(Debug, Clone)]
pub struct RawPhoneInput {
    /// The number as the caller supplied it (structured triples are
    /// concatenated `ddi + ddd + numero`).
    pub raw: String,
    /// Country code used by the normalization heuristic.
    pub country_code: String,
}

impl CheckContactBody {
    /// Collapses the two accepted body shapes into one free-form input.
    ///
    /// When `numero` is present the structured shape wins and `ddi` doubles
    /// as the effective country code, defaulting to `default_country_code`.
    /// Returns `None` when neither shape carries a number.
    pub fn into_raw_input(self, default_country_code: &str) -> Option<RawPhoneInput> {
        if let Some(numero) = self.numero.filter(|n| !n.is_empty()) {
            let ddi = self
                .ddi
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| default_country_code.to_string());
            let ddd = self.ddd.unwrap_or_default();
            return Some(RawPhoneInput {
                raw: format!("{}{}{}", ddi, ddd, numero),
                country_code: ddi,
            });
        }

        self.phone_number.map(|phone| RawPhoneInput {
            raw: phone,
            country_code: self
                .country_code
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| default_country_code.to_string()),
        })
    }
}

// ============ Collaborator Models ============

/// Contact identity resolved by the session collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Serialized id in the messaging platform's format (e.g. `55629...@c.us`).
    pub serialized: String,
}

/// Profile metadata fetched after a contact identity resolves.
///
/// Every field is optional on the wire; missing flags default to `false`.
/// Enrichment is best-effort, so consumers must tolerate the whole snapshot
/// being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pushname: Option<String>,
    #[serde(default)]
    pub is_business: bool,
    #[serde(default)]
    pub is_enterprise: bool,
    #[serde(default)]
    pub is_user: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub is_me: bool,
}

impl ProfileSnapshot {
    /// Display name with the `name` -> `pushname` fallback chain.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.pushname.as_deref())
    }
}
