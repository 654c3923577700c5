//! Threshold rule models as read from the rule document.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Threshold family named by a rule entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ThresholdType {
    PriceEarnings,
    PriceBook,
    Ema,
    #[default]
    None,
    /// A type this engine does not know; kept so the report shows what was configured.
    Unsupported(String),
}

impl From<Option<String>> for ThresholdType {
    fn from(raw: Option<String>) -> Self {
        let Some(raw) = raw else {
            return ThresholdType::None;
        };
        match raw.trim().to_ascii_uppercase().as_str() {
            "PE" => ThresholdType::PriceEarnings,
            "PB" => ThresholdType::PriceBook,
            "EMA" => ThresholdType::Ema,
            "" | "NONE" => ThresholdType::None,
            _ => ThresholdType::Unsupported(raw),
        }
    }
}

impl From<ThresholdType> for Option<String> {
    fn from(kind: ThresholdType) -> Self {
        match kind {
            ThresholdType::None => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdType::PriceEarnings => write!(f, "PE"),
            ThresholdType::PriceBook => write!(f, "PB"),
            ThresholdType::Ema => write!(f, "EMA"),
            ThresholdType::None => write!(f, "none"),
            ThresholdType::Unsupported(raw) => write!(f, "{}", raw),
        }
    }
}

/// Comparison direction of a threshold rule. Defaults to `lt` when the field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Comparison {
    #[default]
    LessThan,
    GreaterThan,
    /// Any other configured value. Never fires.
    Unrecognized(String),
}

impl From<Option<String>> for Comparison {
    fn from(raw: Option<String>) -> Self {
        // A missing field takes the serde default; an explicit null is not a direction.
        match raw.as_deref().map(str::trim) {
            None => Comparison::Unrecognized("null".to_string()),
            Some("lt") => Comparison::LessThan,
            Some("gt") => Comparison::GreaterThan,
            Some(other) => Comparison::Unrecognized(other.to_string()),
        }
    }
}

impl From<Comparison> for String {
    fn from(comparison: Comparison) -> Self {
        comparison.to_string()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::LessThan => write!(f, "lt"),
            Comparison::GreaterThan => write!(f, "gt"),
            Comparison::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

impl Comparison {
    /// Strict comparison of `value` against `threshold`; equality never holds.
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::LessThan => value < threshold,
            Comparison::GreaterThan => value > threshold,
            Comparison::Unrecognized(_) => false,
        }
    }
}

/// One configured security and its optional threshold rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerRule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub threshold_type: ThresholdType,
    #[serde(default, deserialize_with = "deserialize_threshold_number")]
    pub threshold_number: Option<f64>,
    #[serde(default)]
    pub comparison: Comparison,
}

/// Closed set of rule kinds the evaluator understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleKind {
    PriceEarnings { threshold: f64 },
    PriceBook { threshold: f64 },
    Ema { period: u32 },
    ReportOnly,
}

impl TickerRule {
    /// Report-only rule for a bare ticker.
    pub fn report_only(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn new(
        name: impl Into<String>,
        threshold_type: ThresholdType,
        threshold_number: f64,
        comparison: Comparison,
    ) -> Self {
        Self {
            name: Some(name.into()),
            threshold_type,
            threshold_number: Some(threshold_number),
            comparison,
        }
    }

    /// Ticker identifier, if the entry carries a non-blank one.
    pub fn ticker(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Resolve the entry into a rule kind.
    ///
    /// PE/PB without a threshold and EMA without a positive integer period
    /// cannot fire and resolve to [`RuleKind::ReportOnly`].
    pub fn kind(&self) -> RuleKind {
        match (&self.threshold_type, self.threshold_number) {
            (ThresholdType::PriceEarnings, Some(threshold)) => {
                RuleKind::PriceEarnings { threshold }
            }
            (ThresholdType::PriceBook, Some(threshold)) => RuleKind::PriceBook { threshold },
            (ThresholdType::Ema, Some(number)) => {
                let period = number.trunc();
                if period >= 1.0 && period <= u32::MAX as f64 {
                    RuleKind::Ema {
                        period: period as u32,
                    }
                } else {
                    RuleKind::ReportOnly
                }
            }
            _ => RuleKind::ReportOnly,
        }
    }

    /// True when the entry names EMA but its number is not a usable period.
    pub fn has_invalid_ema_period(&self) -> bool {
        self.threshold_type == ThresholdType::Ema && self.kind() == RuleKind::ReportOnly
    }
}

/// Accepts a JSON number or a numeric string; anything else is treated as absent.
fn deserialize_threshold_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(value = %s, "Ignoring non-numeric threshold_number");
                None
            }
        },
        Some(other) => {
            tracing::warn!(value = %other, "Ignoring non-numeric threshold_number");
            None
        }
    };
    Ok(number.filter(|n| n.is_finite()))
}
