//! Query parameters.
//!
//! Callers hand in loosely typed [`RawParams`] (typically straight from a URL
//! query string). [`RawParams::resolve`] applies [`ParamDefaults`] and the
//! supplier-count floor exactly once, producing the strongly typed
//! [`QueryParams`] the evaluator works with. The evaluator never sees a
//! missing value and never hardcodes a default.

use serde::{Deserialize, Deserializer, Serialize};

/// Lowest meaningful `min_fornitori` for the "multiple suppliers" query.
pub const MIN_SUPPLIERS_FLOOR: u32 = 2;

/// Default values applied to parameters the caller omits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDefaults {
    /// Color for Q3 and Q7.
    pub colore: String,
    /// Supplier name for Q4.
    pub fornitore: String,
    /// First color for Q8 and Q9.
    pub colore1: String,
    /// Second color for Q8 and Q9.
    pub colore2: String,
    /// Threshold for Q10 (raised to the floor if lower).
    pub min_fornitori: u32,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            colore: "rosso".to_string(),
            fornitore: "Acme".to_string(),
            colore1: "rosso".to_string(),
            colore2: "verde".to_string(),
            min_fornitori: MIN_SUPPLIERS_FLOOR,
        }
    }
}

/// Unvalidated parameters as supplied by a caller.
///
/// Every field is optional and textual; nothing here can fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawParams {
    #[serde(default)]
    pub colore: Option<String>,
    #[serde(default)]
    pub fornitore: Option<String>,
    #[serde(default)]
    pub colore1: Option<String>,
    #[serde(default)]
    pub colore2: Option<String>,
    #[serde(default)]
    pub min_fornitori: Option<String>,
}

impl RawParams {
    /// Create an empty parameter set (every value defaulted on resolve).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Q3/Q7 color.
    pub fn with_colore(mut self, colore: impl Into<String>) -> Self {
        self.colore = Some(colore.into());
        self
    }

    /// Set the Q4 supplier name.
    pub fn with_fornitore(mut self, fornitore: impl Into<String>) -> Self {
        self.fornitore = Some(fornitore.into());
        self
    }

    /// Set the Q8/Q9 colors.
    pub fn with_colors(mut self, colore1: impl Into<String>, colore2: impl Into<String>) -> Self {
        self.colore1 = Some(colore1.into());
        self.colore2 = Some(colore2.into());
        self
    }

    /// Set the Q10 threshold as raw text.
    pub fn with_min_fornitori(mut self, min_fornitori: impl Into<String>) -> Self {
        self.min_fornitori = Some(min_fornitori.into());
        self
    }

    /// Apply defaults and clamping.
    ///
    /// A `min_fornitori` without leading digits silently becomes the default;
    /// any value below [`MIN_SUPPLIERS_FLOOR`] is raised to it.
    pub fn resolve(&self, defaults: &ParamDefaults) -> QueryParams {
        let min_fornitori = lenient_int(
            self.min_fornitori.as_deref(),
            i64::from(defaults.min_fornitori),
        );

        QueryParams {
            colore: self.colore.clone().unwrap_or_else(|| defaults.colore.clone()),
            fornitore: self
                .fornitore
                .clone()
                .unwrap_or_else(|| defaults.fornitore.clone()),
            colore1: self.colore1.clone().unwrap_or_else(|| defaults.colore1.clone()),
            colore2: self.colore2.clone().unwrap_or_else(|| defaults.colore2.clone()),
            min_fornitori: clamp_min_suppliers(min_fornitori),
        }
    }
}

/// Resolved parameters, serialized into snapshot bundles in this field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub colore: String,
    pub fornitore: String,
    pub colore1: String,
    pub colore2: String,
    #[serde(deserialize_with = "deserialize_min_suppliers")]
    min_fornitori: u32,
}

impl QueryParams {
    /// Resolved Q10 threshold, never below [`MIN_SUPPLIERS_FLOOR`].
    pub fn min_fornitori(&self) -> u32 {
        self.min_fornitori
    }

    /// Replace the Q10 threshold, clamping it to the floor.
    pub fn with_min_fornitori(mut self, min_fornitori: i64) -> Self {
        self.min_fornitori = clamp_min_suppliers(min_fornitori);
        self
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        RawParams::default().resolve(&ParamDefaults::default())
    }
}

/// Parse an integer the lenient way.
///
/// Leading whitespace and an optional sign are skipped, then the leading
/// digits are read and anything after them is ignored (`"3.9"` is 3,
/// `"5 fornitori"` is 5). Values out of range saturate. Input without
/// leading digits yields `default`.
pub fn lenient_int(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_int).unwrap_or(default)
}

fn leading_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].bytes().fold(0_i64, |acc, digit| {
        let digit = i64::from(digit - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(value)
}

fn clamp_min_suppliers(value: i64) -> u32 {
    let floor = i64::from(MIN_SUPPLIERS_FLOOR);
    u32::try_from(value.max(floor)).unwrap_or(u32::MAX)
}

fn deserialize_min_suppliers<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(clamp_min_suppliers(value))
}
