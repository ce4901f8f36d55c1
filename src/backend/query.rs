//! Transport-independent query descriptions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A backend row as returned on the wire
pub type Row = serde_json::Value;

/// Query verb, used for call recording and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Select => "select",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Equality filter on a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq<C: Into<String>, V: Into<String>>(column: C, value: V) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// PostgREST query pair, e.g. `("id", "eq.42")`
    pub fn to_query_pair(&self) -> (String, String) {
        (self.column.clone(), format!("eq.{}", self.value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    fn clause(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column, direction)
    }
}

/// Many-to-one relation resolved alongside each row
///
/// `Embed::new("sections", "section_id", ["name"])` attaches
/// `"sections": {"name": ...}` to every selected channel row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub relation: String,
    pub foreign_key: String,
    pub columns: Vec<String>,
}

impl Embed {
    pub fn new<R, K, I, C>(relation: R, foreign_key: K, columns: I) -> Self
    where
        R: Into<String>,
        K: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            relation: relation.into(),
            foreign_key: foreign_key.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    fn clause(&self) -> String {
        format!("{}({})", self.relation, self.columns.join(","))
    }
}

/// Description of a `select` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectQuery {
    /// Selected columns; empty means every column
    pub columns: Vec<String>,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    /// Expect exactly one row
    pub single: bool,
}

impl SelectQuery {
    /// `select *`
    pub fn all() -> Self {
        Self::default()
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn eq<C: Into<String>, V: Into<String>>(mut self, column: C, value: V) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by<C: Into<String>>(mut self, column: C, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// The `select=` clause, e.g. `*,sections(name)`
    pub fn select_clause(&self) -> String {
        let mut parts = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.clone()
        };
        parts.extend(self.embeds.iter().map(Embed::clause));
        parts.join(",")
    }

    /// The `order=` clause, if any ordering was requested
    pub fn order_clause(&self) -> Option<String> {
        if self.order.is_empty() {
            None
        } else {
            Some(
                self.order
                    .iter()
                    .map(Order::clause)
                    .collect::<Vec<_>>()
                    .join(","),
            )
        }
    }
}
