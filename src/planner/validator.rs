//! Query validation against the loaded schema
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. token 0 is `select`
//! 2. token 1 is `*` or a known column
//! 3. token 2 is `from`
//! 4. token 3 is the loaded table name
//! 5. token 5 is a known column
//!
//! With fewer than six tokens no token counts as a known column. Missing
//! tokens compare unequal to every keyword, so no check reads out of range.
//!
//! Strict grammar additionally requires `where` and `=` at tokens 4 and 6.

use crate::schema::TableSchema;

use super::ast::{self, position, Projection, SelectQuery};
use super::errors::{PlannerError, PlannerResult};

/// Minimum token count before column names are looked up
const MIN_COLUMN_TOKENS: usize = 6;

/// Validates tokenized query lines against one table
#[derive(Debug, Clone, Copy)]
pub struct QueryValidator<'a> {
    schema: &'a TableSchema,
    strict_grammar: bool,
}

impl<'a> QueryValidator<'a> {
    /// Creates a validator with lax grammar
    pub fn new(schema: &'a TableSchema) -> Self {
        Self {
            schema,
            strict_grammar: false,
        }
    }

    /// Enables or disables the `where` / `=` keyword checks
    pub fn with_strict_grammar(mut self, strict: bool) -> Self {
        self.strict_grammar = strict;
        self
    }

    /// Validates `tokens`, returning the query or the first failed check.
    pub fn validate(&self, tokens: &[&str]) -> PlannerResult<SelectQuery> {
        let token = |i: usize| tokens.get(i).copied();

        if token(position::KEYWORD) != Some(ast::SELECT) {
            return Err(PlannerError::unknown_query(token(position::KEYWORD)));
        }

        let projection = token(position::PROJECTION);
        if projection != Some(ast::WILDCARD) && !self.is_column(tokens, position::PROJECTION) {
            return Err(PlannerError::invalid_select_column(projection));
        }

        if token(position::FROM) != Some(ast::FROM) {
            return Err(PlannerError::invalid_select_query(
                format!("expected '{}' at token {}", ast::FROM, position::FROM),
                token(position::FROM),
            ));
        }

        let table = self.schema.table_name();
        if token(position::TABLE) != Some(table) {
            return Err(PlannerError::invalid_table_name(token(position::TABLE), table));
        }

        if !self.is_column(tokens, position::COLUMN) {
            return Err(PlannerError::invalid_where_column(token(position::COLUMN)));
        }

        if self.strict_grammar {
            for (i, keyword) in [(position::WHERE, ast::WHERE), (position::OPERATOR, ast::EQUALS)] {
                if token(i) != Some(keyword) {
                    return Err(PlannerError::invalid_select_query(
                        format!("expected '{}' at token {}", keyword, i),
                        token(i),
                    ));
                }
            }
        }

        let value = token(position::VALUE).ok_or_else(|| {
            PlannerError::invalid_select_query("missing where value", None)
        })?;

        // Checks 2 and 5 guarantee both tokens exist here
        let (Some(projection), Some(column)) = (projection, token(position::COLUMN)) else {
            return Err(PlannerError::invalid_select_query("incomplete query", None));
        };

        Ok(SelectQuery::new(
            Projection::from_token(projection),
            table,
            column,
            value,
        ))
    }

    fn is_column(&self, tokens: &[&str], index: usize) -> bool {
        tokens.len() >= MIN_COLUMN_TOKENS
            && tokens
                .get(index)
                .is_some_and(|name| self.schema.has_column(name))
    }
}
