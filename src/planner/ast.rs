//! Query AST for the fixed-shape select statement
//!
//! `select <COL|*> from <TABLE> where <COL> = <VALUE>`
//!
//! Tokens are positional; the validator maps them onto `SelectQuery`.

/// Keyword that starts every query
pub const SELECT: &str = "select";
/// Keyword separating the projection from the table name
pub const FROM: &str = "from";
/// Keyword introducing the predicate
pub const WHERE: &str = "where";
/// Predicate operator
pub const EQUALS: &str = "=";
/// Projection wildcard
pub const WILDCARD: &str = "*";
/// Line that ends the session
pub const EXIT: &str = "exit";

/// Token positions of the fixed grammar
pub mod position {
    pub const KEYWORD: usize = 0;
    pub const PROJECTION: usize = 1;
    pub const FROM: usize = 2;
    pub const TABLE: usize = 3;
    pub const WHERE: usize = 4;
    pub const COLUMN: usize = 5;
    pub const OPERATOR: usize = 6;
    pub const VALUE: usize = 7;
}

/// Splits a query line on ASCII whitespace
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_ascii_whitespace().collect()
}

/// Columns selected for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`: every column in schema order
    All,
    /// A single named column
    Column(String),
}

impl Projection {
    /// Parses the projection token
    pub fn from_token(token: &str) -> Self {
        if token == WILDCARD {
            Projection::All
        } else {
            Projection::Column(token.to_string())
        }
    }

    /// Checks if `column` is part of the output
    pub fn includes(&self, column: &str) -> bool {
        match self {
            Projection::All => true,
            Projection::Column(name) => name == column,
        }
    }
}

/// A validated select query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    /// Output columns
    pub projection: Projection,
    /// Table name, equal to the loaded schema's
    pub table: String,
    /// Predicate column, a known schema column
    pub column: String,
    /// Predicate value, compared by exact string equality
    pub value: String,
}

impl SelectQuery {
    /// Creates a query
    pub fn new(
        projection: Projection,
        table: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            projection,
            table: table.into(),
            column: column.into(),
            value: value.into(),
        }
    }
}
