//! Renders page queries to parameterized SQL.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use crate::owner::OwnerId;
use crate::types::{CompareOp, Condition, FilterValue, OWNER_COLUMN, PageQuery, Predicate};

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub(crate) struct SqlFragment {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SqlParam {
    /// Text parameter.
    Text(String),
    /// Integer parameter.
    Integer(i64),
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlParam::Text(s) => s.to_sql(),
            SqlParam::Integer(i) => i.to_sql(),
        }
    }
}

impl From<&FilterValue> for SqlParam {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Text(s) => SqlParam::Text(s.clone()),
            FilterValue::Integer(i) => SqlParam::Integer(*i),
        }
    }
}

impl SqlFragment {
    fn new() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter and returns its placeholder.
    fn add_param(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("?{}", self.params.len())
    }

    /// Parameters as trait objects for `rusqlite`.
    pub fn bind(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p as &dyn ToSql).collect()
    }

    /// Renders a predicate, appending its parameters.
    fn render(&mut self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Compare(cond) => self.render_condition(cond),
            Predicate::And(clauses) => self.render_group(clauses, " AND ", "1"),
            Predicate::Or(clauses) => self.render_group(clauses, " OR ", "0"),
        }
    }

    fn render_group(&mut self, clauses: &[Predicate], joiner: &str, empty: &str) -> String {
        if clauses.is_empty() {
            return empty.to_string();
        }
        let parts: Vec<String> = clauses
            .iter()
            .map(|clause| format!("({})", self.render(clause)))
            .collect();
        parts.join(joiner)
    }

    fn render_condition(&mut self, cond: &Condition) -> String {
        let column = cond.column;
        match cond.op {
            CompareOp::ContainsCi => {
                let needle = cond.value.as_text().unwrap_or_default();
                let placeholder =
                    self.add_param(SqlParam::Text(format!("%{}%", escape_like(needle))));
                format!("{} LIKE {} ESCAPE '\\'", column, placeholder)
            }
            op => {
                let placeholder = self.add_param(SqlParam::from(&cond.value));
                let operator = match op {
                    CompareOp::Eq => "=",
                    CompareOp::Lt => "<",
                    CompareOp::Lte => "<=",
                    CompareOp::Gt => ">",
                    CompareOp::Gte => ">=",
                    CompareOp::ContainsCi => "LIKE",
                };
                format!("{} {} {}", column, operator, placeholder)
            }
        }
    }
}

/// Escapes LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the `SELECT` for one page of `table`, scoped to `owner`.
pub(crate) fn select_page(
    table: &str,
    columns: &str,
    owner: &OwnerId,
    query: &PageQuery,
) -> SqlFragment {
    let mut fragment = SqlFragment::new();

    let owner_param = fragment.add_param(SqlParam::Text(owner.as_str().to_string()));
    let mut sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        columns, table, OWNER_COLUMN, owner_param
    );

    if let Some(predicate) = &query.predicate {
        let rendered = fragment.render(predicate);
        sql.push_str(&format!(" AND ({})", rendered));
    }

    let order_by: Vec<String> = query
        .order_by
        .iter()
        .map(|term| format!("{} {}", term.column, term.order.as_sql()))
        .collect();
    sql.push_str(&format!(" ORDER BY {}", order_by.join(", ")));

    let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
    let limit_param = fragment.add_param(SqlParam::Integer(limit));
    sql.push_str(&format!(" LIMIT {}", limit_param));

    fragment.sql = sql;
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ID_COLUMN, OrderBy, SortOrder};

    fn query(predicate: Option<Predicate>, order: SortOrder) -> PageQuery {
        PageQuery {
            predicate,
            order_by: [
                OrderBy {
                    column: "created_at",
                    order,
                },
                OrderBy {
                    column: ID_COLUMN,
                    order,
                },
            ],
            limit: 3,
        }
    }

    #[test]
    fn test_first_page_sql() {
        let fragment = select_page("plants", "id", &OwnerId::new("u1"), &query(None, SortOrder::Desc));

        assert_eq!(
            fragment.sql,
            "SELECT id FROM plants WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2"
        );
        assert_eq!(
            fragment.params,
            vec![SqlParam::Text("u1".to_string()), SqlParam::Integer(3)]
        );
    }

    #[test]
    fn test_keyset_sql() {
        let keyset = Predicate::Or(vec![
            Predicate::gt("created_at", "2024-01-01"),
            Predicate::And(vec![
                Predicate::eq("created_at", "2024-01-01"),
                Predicate::gt("id", "b"),
            ]),
        ]);
        let fragment = select_page(
            "plants",
            "id",
            &OwnerId::new("u1"),
            &query(Some(keyset), SortOrder::Asc),
        );

        assert_eq!(
            fragment.sql,
            "SELECT id FROM plants WHERE owner_id = ?1 \
             AND ((created_at > ?2) OR ((created_at = ?3) AND (id > ?4))) \
             ORDER BY created_at ASC, id ASC LIMIT ?5"
        );
        assert_eq!(fragment.params.len(), 5);
        assert_eq!(fragment.params[3], SqlParam::Text("b".to_string()));
    }

    #[test]
    fn test_contains_escapes_wildcards() {
        let fragment = select_page(
            "plants",
            "id",
            &OwnerId::new("u1"),
            &query(Some(Predicate::contains_ci("nickname", "50%_off")), SortOrder::Asc),
        );

        assert!(fragment.sql.contains("nickname LIKE ?2 ESCAPE '\\'"));
        assert_eq!(
            fragment.params[1],
            SqlParam::Text("%50\\%\\_off%".to_string())
        );
    }

    #[test]
    fn test_empty_groups() {
        let mut fragment = SqlFragment::new();
        assert_eq!(fragment.render(&Predicate::And(vec![])), "1");
        assert_eq!(fragment.render(&Predicate::Or(vec![])), "0");
    }
}
