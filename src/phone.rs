/// Phone-number normalization and request validation.
///
/// The normalizer is a pure, total function: it never fails, and out-of-range
/// results are caught by `validate`, not here. The validator checks are
/// ordered (presence, then character set on the raw string, then length on
/// the normalized one) and the first failure wins; each failure carries the
/// exact user-facing message consumers depend on.
use regex::Regex;

/// Rejection reasons for a verification request, ordered by check priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No phone number was supplied. Carries the entry shape so the message
    /// can hint at the fields that shape expects.
    MissingInput(InputShape),
    /// The raw input contains characters outside digits, whitespace,
    /// `+`, `-`, `(` and `)`.
    IllegalCharacters,
    /// The normalized number is shorter than 10 or longer than 15 digits.
    LengthOutOfRange,
}

/// Which of the two accepted entry shapes produced the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// `POST /check-contact` JSON body.
    Body,
    /// `GET /check-contact?phone=...` query string.
    Query,
}

impl ValidationError {
    /// User-facing message for this rejection.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingInput(InputShape::Body) => {
                "Número de telefone é obrigatório (envie \"phoneNumber\" ou objeto com \"numero\", \"ddd\", \"ddi\")"
            }
            ValidationError::MissingInput(InputShape::Query) => {
                "Parâmetro \"phone\" é obrigatório (ex: ?phone=6282391269)"
            }
            ValidationError::IllegalCharacters => "Número de telefone contém caracteres inválidos",
            ValidationError::LengthOutOfRange => "Número deve ter entre 10 e 15 dígitos",
        }
    }
}

/// Normalizes a raw phone string into a canonical digit-only number.
///
/// Strips every non-digit character, drops a single leading trunk zero, and
/// prepends `default_country_code` when the number looks like a national
/// 10-11 digit number without one. The window is judged both with and
/// without the trunk zero, so `0912345678` still gains the country code.
///
/// Returns the digit string verbatim; no truncation is applied.
pub fn normalize(raw: &str, default_country_code: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let trimmed = cleaned.strip_prefix('0').unwrap_or(&cleaned);

    let national_window =
        (10..=11).contains(&cleaned.len()) || (10..=11).contains(&trimmed.len());

    if national_window && !trimmed.starts_with(default_country_code) {
        format!("{}{}", default_country_code, trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Validates one request's input against the rejection taxonomy.
///
/// # Arguments
///
/// * `raw` - The raw input string, `None` when the request carried no number.
/// * `normalized` - The canonical number produced by `normalize`.
/// * `shape` - The entry shape, used to pick the missing-input message.
pub fn validate(
    raw: Option<&str>,
    normalized: &str,
    shape: InputShape,
) -> Result<(), ValidationError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ValidationError::MissingInput(shape)),
    };

    let allowed = Regex::new(r"^[\d\s+\-()]+$").unwrap();
    if !allowed.is_match(raw) {
        return Err(ValidationError::IllegalCharacters);
    }

    if !(10..=15).contains(&normalized.len()) {
        return Err(ValidationError::LengthOutOfRange);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prepends_country_code_after_trunk_zero() {
        assert_eq!(normalize("0912345678", "55"), "55912345678");
    }

    #[test]
    fn normalize_keeps_already_prefixed_number() {
        assert_eq!(normalize("5562912345678", "55"), "5562912345678");
    }

    #[test]
    fn normalize_prepends_for_bare_national_number() {
        assert_eq!(normalize("6282391269", "55"), "556282391269");
        assert_eq!(normalize("62912345678", "55"), "5562912345678");
    }

    #[test]
    fn normalize_strips_formatting_characters() {
        assert_eq!(normalize("+55 (62) 91234-5678", "55"), "5562912345678");
    }

    #[test]
    fn normalize_drops_single_trunk_zero_only() {
        assert_eq!(normalize("00912345678", "55"), "550912345678");
    }

    #[test]
    fn normalize_leaves_short_numbers_alone() {
        assert_eq!(normalize("12345", "55"), "12345");
    }

    #[test]
    fn normalize_is_stable_for_canonical_numbers() {
        let canonical = normalize("5562912345678", "55");
        assert_eq!(normalize(&canonical, "55"), canonical);
    }

    #[test]
    fn validate_rejects_missing_input_first() {
        assert_eq!(
            validate(None, "", InputShape::Body),
            Err(ValidationError::MissingInput(InputShape::Body))
        );
        assert_eq!(
            validate(Some(""), "", InputShape::Query),
            Err(ValidationError::MissingInput(InputShape::Query))
        );
    }

    #[test]
    fn validate_rejects_illegal_characters_before_length() {
        // "abc123" is both non-numeric and too short; the character-set
        // check must win.
        assert_eq!(
            validate(Some("abc123"), &normalize("abc123", "55"), InputShape::Body),
            Err(ValidationError::IllegalCharacters)
        );
    }

    #[test]
    fn validate_rejects_out_of_range_length() {
        assert_eq!(
            validate(Some("12345"), &normalize("12345", "55"), InputShape::Body),
            Err(ValidationError::LengthOutOfRange)
        );

        let long = "1".repeat(16);
        assert_eq!(
            validate(Some(&long), &normalize(&long, "55"), InputShape::Body),
            Err(ValidationError::LengthOutOfRange)
        );
    }

    #[test]
    fn validate_accepts_formatted_number() {
        let raw = "(62) 91234-5678";
        assert_eq!(validate(Some(raw), &normalize(raw, "55"), InputShape::Body), Ok(()));
    }

    #[test]
    fn messages_are_exact() {
        assert_eq!(
            ValidationError::IllegalCharacters.message(),
            "Número de telefone contém caracteres inválidos"
        );
        assert_eq!(
            ValidationError::LengthOutOfRange.message(),
            "Número deve ter entre 10 e 15 dígitos"
        );
        assert_eq!(
            ValidationError::MissingInput(InputShape::Query).message(),
            "Parâmetro \"phone\" é obrigatório (ex: ?phone=6282391269)"
        );
    }
}
