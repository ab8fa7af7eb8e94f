//! # Statement Builder
//!
//! Builds parameterized SQL from entity metadata. Column and table names
//! only ever come from `Entity` constants (filters are checked against
//! them first); every value travels as a bound `?` argument.
//!
//! ## Filter Rendering
//! ```text
//! Filter::eq("major", "CS").and(Filter::is_null("completion_date"))
//!     │
//!     ▼
//! ("major" = ?) AND ("completion_date" IS NULL)        values: ["CS"]
//! ```

use careercloud_core::filter::CompareOp;
use careercloud_core::{Entity, Filter, Value};
use sqlx::sqlite::SqliteArguments;
use sqlx::Arguments;

use crate::error::{DbError, DbResult};

/// Column carrying the store-assigned row version.
pub const TIME_STAMP_COLUMN: &str = "time_stamp";

/// SQL text plus its bound values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Statement {
    /// Converts the values into sqlx arguments.
    pub fn arguments<'q>(&self) -> DbResult<SqliteArguments<'q>> {
        let mut args = SqliteArguments::default();
        for value in &self.values {
            bind(&mut args, value.clone())?;
        }
        Ok(args)
    }
}

fn bind(args: &mut SqliteArguments<'_>, value: Value) -> DbResult<()> {
    let added = match value {
        Value::Null => args.add(Option::<String>::None),
        Value::Bool(v) => args.add(v),
        Value::Int(v) => args.add(v),
        Value::Text(v) => args.add(v),
        Value::Uuid(v) => args.add(v),
        Value::DateTime(v) => args.add(v),
        Value::Bytes(v) => args.add(v),
    };
    added.map_err(|e| DbError::Encode(e.to_string()))
}

fn quote(ident: &str) -> String {
    format!("\"{ident}\"")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

// =============================================================================
// Reads
// =============================================================================

/// Comma-separated select list: declared columns, then `time_stamp` if any.
pub fn select_list<E: Entity>() -> String {
    let mut columns: Vec<String> = E::COLUMNS.iter().map(|c| quote(c)).collect();
    if E::HAS_TIME_STAMP {
        columns.push(quote(TIME_STAMP_COLUMN));
    }
    columns.join(", ")
}

/// `SELECT ... FROM table [WHERE filter] [LIMIT n]`.
pub fn select<E: Entity>(filter: Option<&Filter>, limit: Option<u32>) -> DbResult<Statement> {
    let mut sql = format!("SELECT {} FROM {}", select_list::<E>(), quote(E::TABLE));
    let mut values = Vec::new();

    if let Some(filter) = filter {
        if *filter != Filter::All {
            let clause = render::<E>(filter, &mut values)?;
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
    }
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    Ok(Statement { sql, values })
}

/// `SELECT ... FROM table WHERE column IN (?, ...)`, for eager loading.
pub fn select_in<E: Entity>(column: &str, keys: Vec<Value>) -> DbResult<Statement> {
    if !E::has_column(column) {
        return Err(DbError::unknown_column(E::NAME, column));
    }
    Ok(Statement {
        sql: format!(
            "SELECT {} FROM {} WHERE {} IN ({})",
            select_list::<E>(),
            quote(E::TABLE),
            quote(column),
            placeholders(keys.len())
        ),
        values: keys,
    })
}

/// Renders a filter to a WHERE clause body, appending bound values.
pub fn render<E: Entity>(filter: &Filter, values: &mut Vec<Value>) -> DbResult<String> {
    if let Some(unknown) = filter.columns().into_iter().find(|c| !E::has_column(c)) {
        return Err(DbError::unknown_column(E::NAME, unknown));
    }
    Ok(render_checked(filter, values))
}

fn render_checked(filter: &Filter, values: &mut Vec<Value>) -> String {
    match filter {
        Filter::All => "1 = 1".to_string(),
        Filter::Compare {
            column,
            op: CompareOp::Eq,
            value: Value::Null,
        } => format!("{} IS NULL", quote(column)),
        Filter::Compare {
            column,
            op: CompareOp::Ne,
            value: Value::Null,
        } => format!("{} IS NOT NULL", quote(column)),
        Filter::Compare { column, op, value } => {
            values.push(value.clone());
            format!("{} {} ?", quote(column), op.as_sql())
        }
        Filter::Like { column, pattern } => {
            values.push(Value::Text(pattern.clone()));
            format!("{} LIKE ?", quote(column))
        }
        Filter::In { values: list, .. } if list.is_empty() => "0 = 1".to_string(),
        Filter::In {
            column,
            values: list,
        } => {
            values.extend(list.iter().cloned());
            format!("{} IN ({})", quote(column), placeholders(list.len()))
        }
        Filter::IsNull(column) => format!("{} IS NULL", quote(column)),
        Filter::IsNotNull(column) => format!("{} IS NOT NULL", quote(column)),
        Filter::And(parts) => join(parts, " AND ", "1 = 1", values),
        Filter::Or(parts) => join(parts, " OR ", "0 = 1", values),
        Filter::Not(inner) => format!("NOT ({})", render_checked(inner, values)),
    }
}

fn join(parts: &[Filter], separator: &str, empty: &str, values: &mut Vec<Value>) -> String {
    if parts.is_empty() {
        return empty.to_string();
    }
    parts
        .iter()
        .map(|part| format!("({})", render_checked(part, values)))
        .collect::<Vec<_>>()
        .join(separator)
}

// =============================================================================
// Writes
// =============================================================================

/// `INSERT INTO table (cols[, time_stamp]) VALUES (?..[, randomblob(8)])`.
pub fn insert(table: &str, columns: Vec<(&'static str, Value)>, has_time_stamp: bool) -> Statement {
    let (names, values): (Vec<&str>, Vec<Value>) = columns.into_iter().unzip();
    let mut column_list: Vec<String> = names.iter().map(|c| quote(c)).collect();
    let mut slots = vec!["?".to_string(); values.len()];
    if has_time_stamp {
        column_list.push(quote(TIME_STAMP_COLUMN));
        slots.push("randomblob(8)".to_string());
    }

    Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(table),
            column_list.join(", "),
            slots.join(", ")
        ),
        values,
    }
}

/// `UPDATE table SET col = ?..[, time_stamp = randomblob(8)] WHERE key = ?`.
///
/// Every non-key column is rewritten (full-row replace).
pub fn update(
    table: &str,
    key_column: &str,
    columns: Vec<(&'static str, Value)>,
    has_time_stamp: bool,
) -> Statement {
    let mut assignments = Vec::new();
    let mut values = Vec::new();
    let mut key = Value::Null;

    for (name, value) in columns {
        if name == key_column {
            key = value;
        } else {
            assignments.push(format!("{} = ?", quote(name)));
            values.push(value);
        }
    }
    if has_time_stamp {
        assignments.push(format!("{} = randomblob(8)", quote(TIME_STAMP_COLUMN)));
    }
    values.push(key);

    Statement {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quote(table),
            assignments.join(", "),
            quote(key_column)
        ),
        values,
    }
}

/// `DELETE FROM table WHERE key = ?`.
pub fn delete(table: &str, key_column: &str, key: Value) -> Statement {
    Statement {
        sql: format!("DELETE FROM {} WHERE {} = ?", quote(table), quote(key_column)),
        values: vec![key],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use careercloud_core::{ApplicantEducation, SystemCountryCode};
    use uuid::Uuid;

    #[test]
    fn test_select_lists_time_stamp_only_when_present() {
        assert_eq!(
            select_list::<SystemCountryCode>(),
            r#""code", "name""#
        );
        assert!(select_list::<ApplicantEducation>().ends_with(r#""completion_percent", "time_stamp""#));
    }

    #[test]
    fn test_filter_rendering() {
        let filter = Filter::eq("major", "CS")
            .and(Filter::is_null("completion_date"))
            .and(Filter::eq("certificate_diploma", Value::Null).not());
        let stmt = select::<ApplicantEducation>(Some(&filter), Some(1)).unwrap();

        assert!(stmt.sql.ends_with(
            r#"WHERE ("major" = ?) AND ("completion_date" IS NULL) AND (NOT ("certificate_diploma" IS NULL)) LIMIT 1"#
        ));
        assert_eq!(stmt.values, vec![Value::Text("CS".into())]);
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let mut values = Vec::new();
        let sql = render::<SystemCountryCode>(&Filter::is_in("code", Vec::<String>::new()), &mut values)
            .unwrap();
        assert_eq!(sql, "0 = 1");
        assert!(values.is_empty());
    }

    #[test]
    fn test_unknown_column_never_reaches_sql() {
        let err = select::<SystemCountryCode>(Some(&Filter::eq("code; DROP TABLE x", "CA")), None)
            .unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn { entity: "SystemCountryCode", .. }));
    }

    #[test]
    fn test_insert_and_update_shapes() {
        let education = ApplicantEducation::new(Uuid::nil(), Uuid::nil());

        let stmt = insert(ApplicantEducation::TABLE, education.column_values(), true);
        assert!(stmt.sql.ends_with(r#""time_stamp") VALUES (?, ?, ?, ?, ?, ?, ?, randomblob(8))"#));
        assert_eq!(stmt.values.len(), ApplicantEducation::COLUMNS.len());

        let stmt = update(ApplicantEducation::TABLE, "id", education.column_values(), true);
        assert!(stmt.sql.starts_with(r#"UPDATE "applicant_educations" SET "applicant" = ?"#));
        assert!(stmt.sql.ends_with(r#""time_stamp" = randomblob(8) WHERE "id" = ?"#));
        assert_eq!(stmt.values.last(), Some(&Value::Uuid(Uuid::nil())));

        let country = SystemCountryCode::new("CA", "Canada");
        let stmt = update(SystemCountryCode::TABLE, "code", country.column_values(), false);
        assert_eq!(
            stmt.sql,
            r#"UPDATE "system_country_codes" SET "name" = ? WHERE "code" = ?"#
        );
    }
}
