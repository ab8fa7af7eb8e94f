//! # Values and Filters
//!
//! `Value` is a column value detached from any particular entity type.
//! `Filter` is a predicate over named columns, built as data so a backend
//! can render it into a `WHERE` clause instead of loading the whole table.
//!
//! ## Predicate Pushdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Filter::eq("major", "Computer Science")                                │
//! │      .and(Filter::ge("completion_percent", 50))                         │
//! │        │                                                                │
//! │        ├──► careercloud-db  ──►  WHERE (major = ?) AND (... >= ?)       │
//! │        │                                                                │
//! │        └──► Filter::evaluate(row)  ──►  same answer, in memory          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In-memory evaluation follows SQL three-valued logic, so a comparison
//! against NULL is "unknown" and never matches, exactly as in the store.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::entity::TimeStamp;
use crate::money::Money;

// =============================================================================
// Value
// =============================================================================

/// A single column value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Orders two values of the same kind. Mixed kinds and NULL are
    /// incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Int(v.minor())
    }
}

impl From<TimeStamp> for Value {
    fn from(v: TimeStamp) -> Self {
        Value::Bytes(v.as_bytes().to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Comparison operators supported by [`Filter::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// A predicate over an entity's named columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every row.
    All,
    /// `column <op> value`. Equality against `Value::Null` means `IS NULL`
    /// (and `Ne` means `IS NOT NULL`).
    Compare {
        column: String,
        op: CompareOp,
        value: Value,
    },
    /// SQL `LIKE` with `%` / `_` wildcards, ASCII case-insensitive.
    Like { column: String, pattern: String },
    /// `column IN (values...)`. An empty list matches nothing.
    In { column: String, values: Vec<Value> },
    IsNull(String),
    IsNotNull(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    fn compare(column: &str, op: CompareOp, value: impl Into<Value>) -> Self {
        Filter::Compare {
            column: column.to_string(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Filter::compare(column, CompareOp::Eq, value)
    }

    pub fn ne(column: &str, value: impl Into<Value>) -> Self {
        Filter::compare(column, CompareOp::Ne, value)
    }

    pub fn lt(column: &str, value: impl Into<Value>) -> Self {
        Filter::compare(column, CompareOp::Lt, value)
    }

    pub fn le(column: &str, value: impl Into<Value>) -> Self {
        Filter::compare(column, CompareOp::Le, value)
    }

    pub fn gt(column: &str, value: impl Into<Value>) -> Self {
        Filter::compare(column, CompareOp::Gt, value)
    }

    pub fn ge(column: &str, value: impl Into<Value>) -> Self {
        Filter::compare(column, CompareOp::Ge, value)
    }

    pub fn like(column: &str, pattern: impl Into<String>) -> Self {
        Filter::Like {
            column: column.to_string(),
            pattern: pattern.into(),
        }
    }

    pub fn is_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: &str) -> Self {
        Filter::IsNull(column.to_string())
    }

    pub fn is_not_null(column: &str) -> Self {
        Filter::IsNotNull(column.to_string())
    }

    /// Conjunction, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::All => other,
            Filter::And(mut parts) => {
                parts.push(other);
                Filter::And(parts)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// Disjunction, flattening nested `Or`s.
    pub fn or(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut parts) => {
                parts.push(other);
                Filter::Or(parts)
            }
            first => Filter::Or(vec![first, other]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Filter::Not(Box::new(self))
    }

    /// Every column name the filter references (duplicates included).
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Filter::All => {}
            Filter::Compare { column, .. }
            | Filter::Like { column, .. }
            | Filter::In { column, .. }
            | Filter::IsNull(column)
            | Filter::IsNotNull(column) => out.push(column),
            Filter::And(parts) | Filter::Or(parts) => {
                for part in parts {
                    part.collect_columns(out);
                }
            }
            Filter::Not(inner) => inner.collect_columns(out),
        }
    }

    /// Evaluates the filter against a row of named values.
    ///
    /// Unknown (NULL-involving) outcomes do not match.
    pub fn evaluate(&self, row: &[(&str, Value)]) -> bool {
        self.truth(row).unwrap_or(false)
    }

    /// Three-valued evaluation: `None` is SQL's UNKNOWN.
    fn truth(&self, row: &[(&str, Value)]) -> Option<bool> {
        let lookup = |column: &str| -> &Value {
            row.iter()
                .find(|(name, _)| *name == column)
                .map(|(_, value)| value)
                .unwrap_or(&Value::Null)
        };

        match self {
            Filter::All => Some(true),
            Filter::Compare { column, op, value } => {
                let current = lookup(column);
                match (op, value) {
                    (CompareOp::Eq, Value::Null) => Some(current.is_null()),
                    (CompareOp::Ne, Value::Null) => Some(!current.is_null()),
                    _ => current.compare(value).map(|ordering| op.accepts(ordering)),
                }
            }
            Filter::Like { column, pattern } => match lookup(column) {
                Value::Text(text) => Some(like_matches(text, pattern)),
                Value::Null => None,
                _ => Some(false),
            },
            Filter::In { column, values } => {
                let current = lookup(column);
                if current.is_null() {
                    return None;
                }
                let mut unknown = false;
                for candidate in values {
                    match current.compare(candidate) {
                        Some(Ordering::Equal) => return Some(true),
                        None if candidate.is_null() => unknown = true,
                        _ => {}
                    }
                }
                if unknown {
                    None
                } else {
                    Some(false)
                }
            }
            Filter::IsNull(column) => Some(lookup(column).is_null()),
            Filter::IsNotNull(column) => Some(!lookup(column).is_null()),
            Filter::And(parts) => {
                let mut result = Some(true);
                for part in parts {
                    match part.truth(row) {
                        Some(false) => return Some(false),
                        None => result = None,
                        Some(true) => {}
                    }
                }
                result
            }
            Filter::Or(parts) => {
                let mut result = Some(false);
                for part in parts {
                    match part.truth(row) {
                        Some(true) => return Some(true),
                        None => result = None,
                        Some(false) => {}
                    }
                }
                result
            }
            Filter::Not(inner) => inner.truth(row).map(|b| !b),
        }
    }
}

/// SQL `LIKE` semantics: `%` any run, `_` any single char, ASCII
/// case-insensitive (SQLite's default).
fn like_matches(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();

    // Iterative wildcard match with single backtrack point.
    let (mut t, mut p) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;
    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            t += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '%')
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<(&'static str, Value)> {
        vec![
            ("major", Value::from("Computer Science")),
            ("completion_percent", Value::from(80u8)),
            ("certificate_diploma", Value::Null),
        ]
    }

    #[test]
    fn test_comparisons() {
        let row = row();
        assert!(Filter::eq("major", "Computer Science").evaluate(&row));
        assert!(!Filter::ne("major", "Computer Science").evaluate(&row));
        assert!(Filter::ge("completion_percent", 80).evaluate(&row));
        assert!(Filter::lt("completion_percent", 81).evaluate(&row));
        assert!(!Filter::gt("completion_percent", 80).evaluate(&row));
    }

    #[test]
    fn test_null_semantics() {
        let row = row();
        // Comparison against a NULL column is unknown, never a match,
        // and NOT(unknown) is still unknown.
        assert!(!Filter::eq("certificate_diploma", "BSc").evaluate(&row));
        assert!(!Filter::eq("certificate_diploma", "BSc").not().evaluate(&row));
        // Equality with Null is IS NULL.
        assert!(Filter::eq("certificate_diploma", Value::Null).evaluate(&row));
        assert!(Filter::is_null("certificate_diploma").evaluate(&row));
        assert!(Filter::is_not_null("major").evaluate(&row));
    }

    #[test]
    fn test_and_or_flatten() {
        let f = Filter::All
            .and(Filter::eq("major", "Computer Science"))
            .and(Filter::ge("completion_percent", 50));
        assert!(matches!(&f, Filter::And(parts) if parts.len() == 2));
        assert!(f.evaluate(&row()));

        let f = Filter::eq("major", "Art").or(Filter::is_null("certificate_diploma"));
        assert!(f.evaluate(&row()));
    }

    #[test]
    fn test_in_list() {
        let row = row();
        assert!(Filter::is_in("major", ["Art", "Computer Science"]).evaluate(&row));
        assert!(!Filter::is_in("major", Vec::<&str>::new()).evaluate(&row));
        assert!(!Filter::is_in("certificate_diploma", ["BSc"]).evaluate(&row));
    }

    #[test]
    fn test_like() {
        assert!(like_matches("Computer Science", "comp%"));
        assert!(like_matches("Computer Science", "%SCIENCE"));
        assert!(like_matches("Computer Science", "C_mputer%"));
        assert!(!like_matches("Computer Science", "Science%"));
        assert!(like_matches("", "%"));
        assert!(Filter::like("major", "%sci%").evaluate(&row()));
    }

    #[test]
    fn test_columns_collected() {
        let f = Filter::eq("a", 1).and(Filter::like("b", "%").or(Filter::is_null("c").not()));
        assert_eq!(f.columns(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(5i32)), Value::Int(5));
        assert_eq!(Value::from(Money::from_minor(-1)), Value::Int(-1));
    }
}
