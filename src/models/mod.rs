use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteTally {
    pub a: u64,
    pub b: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percentages {
    pub a: u8,
    pub b: u8,
}

// The two bars on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bar {
    A,
    B,
}

// What the presentation layer binds to. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub a_percent: u8,
    pub b_percent: u8,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            a_percent: 50,
            b_percent: 50,
            total: 0,
            updated_at: None,
        }
    }
}

impl DisplayState {
    pub fn new(tally: VoteTally, percentages: Percentages) -> Self {
        Self {
            a_percent: percentages.a,
            b_percent: percentages.b,
            total: tally.a.saturating_add(tally.b),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn width(&self, bar: Bar) -> String {
        match bar {
            Bar::A => format!("{}%", self.a_percent),
            Bar::B => format!("{}%", self.b_percent),
        }
    }
}

impl VoteTally {
    #[cfg(test)]
    pub fn new(a: u64, b: u64) -> Self {
        Self { a, b }
    }

    /// Builds a tally from a decoded `/votes` body.
    ///
    /// Accepts `{"a": .., "b": ..}` as well as the row list
    /// `[{"vote": "a", "count": ..}, ..]`. Fields that are missing or not
    /// numeric count as zero votes.
    pub fn from_json(body: &Value) -> Self {
        match body {
            Value::Object(fields) => Self {
                a: fields.get("a").map(coerce_count).unwrap_or(0),
                b: fields.get("b").map(coerce_count).unwrap_or(0),
            },
            Value::Array(rows) => {
                let mut tally = Self::default();
                for row in rows {
                    let count = row.get("count").map(coerce_count).unwrap_or(0);
                    match row.get("vote").and_then(Value::as_str) {
                        Some("a") => tally.a = tally.a.saturating_add(count),
                        Some("b") => tally.b = tally.b.saturating_add(count),
                        _ => {}
                    }
                }
                tally
            }
            _ => Self::default(),
        }
    }
}

/// Reads a vote count out of a loosely typed JSON value.
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
                    _ => 0,
                }
            }
        }
        Value::String(s) => leading_digits(s),
        _ => 0,
    }
}

// "12abc" -> 12, "abc" -> 0
fn leading_digits(s: &str) -> u64 {
    let trimmed = s.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    if digits.is_empty() {
        return 0;
    }
    // Saturate instead of wrapping on absurd inputs
    digits.parse::<u64>().unwrap_or(u64::MAX)
}
