// Query filtering for records

use crate::record::{IndexValue, Record};
use eyre::{Result, eyre};
use std::cmp::Ordering;
use std::str::FromStr;

/// Filter for querying records
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name to filter on
    pub field: String,
    /// Comparison operator
    pub op: FilterOp,
    /// Value to compare against
    pub value: IndexValue,
}

/// Comparison operators for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,       // ==
    Ne,       // !=
    Gt,       // >
    Lt,       // <
    Gte,      // >=
    Lte,      // <=
    Contains, // ~
}

// Longest tokens first so ">=" is not read as ">"
const OP_TOKENS: [(&str, FilterOp); 8] = [
    ("==", FilterOp::Eq),
    ("!=", FilterOp::Ne),
    (">=", FilterOp::Gte),
    ("<=", FilterOp::Lte),
    ("=", FilterOp::Eq),
    (">", FilterOp::Gt),
    ("<", FilterOp::Lt),
    ("~", FilterOp::Contains),
];

impl FilterOp {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Ne => ordering != Ordering::Equal,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
            FilterOp::Contains => false,
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "="),
            FilterOp::Ne => write!(f, "!="),
            FilterOp::Gt => write!(f, ">"),
            FilterOp::Lt => write!(f, "<"),
            FilterOp::Gte => write!(f, ">="),
            FilterOp::Lte => write!(f, "<="),
            FilterOp::Contains => write!(f, "~"),
        }
    }
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: IndexValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Check a single record against this filter
    ///
    /// Missing fields never match. Text fields compare against the filter
    /// value as written, so `title~2026` finds "Plan 2026"; other mismatched
    /// value types never match.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let fields = record.indexed_fields();
        let Some(actual) = fields.get(&self.field) else {
            return false;
        };

        match (actual, &self.value) {
            (IndexValue::String(a), IndexValue::String(b)) => self.matches_text(a, b),
            (IndexValue::String(a), IndexValue::Int(b)) => self.matches_text(a, &b.to_string()),
            (IndexValue::String(a), IndexValue::Bool(b)) => self.matches_text(a, &b.to_string()),
            (IndexValue::Int(a), IndexValue::Int(b)) => self.op.accepts(a.cmp(b)),
            (IndexValue::Bool(a), IndexValue::Bool(b)) => match self.op {
                FilterOp::Eq => a == b,
                FilterOp::Ne => a != b,
                _ => false,
            },
            _ => false,
        }
    }

    fn matches_text(&self, actual: &str, expected: &str) -> bool {
        match self.op {
            FilterOp::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
            op => op.accepts(actual.cmp(expected)),
        }
    }
}

/// True when the record satisfies every filter
pub fn matches_all<R: Record>(record: &R, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(record))
}

impl FromStr for Filter {
    type Err = eyre::Report;

    /// Parse `field<op>value`, e.g. `status=ready` or `open_tasks>=2`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (pos, token, op) = OP_TOKENS
            .iter()
            .filter_map(|(token, op)| s.find(token).map(|pos| (pos, *token, *op)))
            .min_by_key(|(pos, token, _)| (*pos, std::cmp::Reverse(token.len())))
            .ok_or_else(|| eyre!("Filter has no operator: {}", s))?;

        let field = s[..pos].trim();
        if field.is_empty() {
            return Err(eyre!("Filter has no field name: {}", s));
        }
        if !field.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(eyre!("Invalid field name: {} (must be alphanumeric with _)", field));
        }

        let raw = s[pos + token.len()..].trim();
        let value = if let Ok(i) = raw.parse::<i64>() {
            IndexValue::Int(i)
        } else if let Ok(b) = raw.parse::<bool>() {
            IndexValue::Bool(b)
        } else {
            IndexValue::String(raw.to_string())
        };

        Ok(Filter::new(field, op, value))
    }
}
