//! Query evaluator: one query line in, one outcome out
//!
//! States:
//! - `AwaitingQuery`: every line is planned and executed
//! - `Terminated`: entered on the line `exit`; further lines are ignored

use std::io::{self, Write};

use crate::observability::{log_event_with_fields, Event};
use crate::planner::{tokenize, AccessPath, PlannerError, QueryPlanner, EXIT};

use super::context::QueryContext;
use super::errors::ExecutorError;
use super::executor::QueryExecutor;
use super::result::ExecutionResult;

/// Shown when a valid query matches no record
pub const NOT_FOUND: &str = "Not found...";

/// Evaluator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorState {
    AwaitingQuery,
    Terminated,
}

/// Outcome of evaluating one line
#[derive(Debug)]
pub enum Evaluation {
    /// The line was `exit`, or the evaluator had already terminated
    Terminated,
    /// Validation failed
    Rejected(PlannerError),
    /// The query ran; the result may be empty
    Completed(ExecutionResult),
    /// Storage failed while running the query
    Failed(ExecutorError),
}

impl Evaluation {
    /// Writes the user-visible output of this outcome, one line each.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Evaluation::Terminated => Ok(()),
            Evaluation::Rejected(err) => writeln!(out, "{}", err.diagnostic()),
            Evaluation::Failed(err) => writeln!(out, "{}", err.diagnostic()),
            Evaluation::Completed(result) if result.is_empty() => writeln!(out, "{}", NOT_FOUND),
            Evaluation::Completed(result) => {
                for line in result.lines() {
                    writeln!(out, "{}", line)?;
                }
                Ok(())
            }
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Evaluation::Terminated)
    }
}

/// Runs query lines against a `QueryContext`
pub struct QueryEvaluator<'a> {
    context: &'a QueryContext,
    state: EvaluatorState,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(context: &'a QueryContext) -> Self {
        Self {
            context,
            state: EvaluatorState::AwaitingQuery,
        }
    }

    pub fn state(&self) -> EvaluatorState {
        self.state
    }

    /// Evaluates one query line.
    pub fn evaluate(&mut self, line: &str) -> Evaluation {
        if self.state == EvaluatorState::Terminated {
            return Evaluation::Terminated;
        }
        if line == EXIT {
            self.state = EvaluatorState::Terminated;
            return Evaluation::Terminated;
        }

        log_event_with_fields(Event::QueryReceived, &[("query", line)]);

        let ctx = self.context;
        let metrics = ctx.metrics();

        let planner = QueryPlanner::new(ctx.schema(), ctx.indexes())
            .with_strict_grammar(ctx.options().strict_grammar);
        let plan = match planner.plan_tokens(&tokenize(line)) {
            Ok(plan) => plan,
            Err(err) => {
                metrics.increment_queries_rejected();
                log_event_with_fields(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                return Evaluation::Rejected(err);
            }
        };

        log_event_with_fields(
            Event::QueryPlanned,
            &[
                ("access", plan.access.as_str()),
                ("column", plan.query.column.as_str()),
            ],
        );
        if matches!(plan.access, AccessPath::IndexLookup { .. }) {
            metrics.increment_index_lookups();
        } else {
            metrics.increment_linear_scans();
        }

        let executor = QueryExecutor::new(ctx.schema(), ctx.indexes(), ctx.store());
        match executor.execute(&plan) {
            Ok(result) => {
                metrics.increment_queries_executed();
                metrics.add_records_fetched(result.len() as u64);
                if result.is_empty() {
                    metrics.increment_not_found();
                }
                log_event_with_fields(
                    Event::QueryExecuted,
                    &[
                        ("access", result.access.as_str()),
                        ("rows", &result.len().to_string()),
                    ],
                );
                Evaluation::Completed(result)
            }
            Err(err) => {
                metrics.increment_queries_failed();
                log_event_with_fields(
                    Event::QueryFailed,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                Evaluation::Failed(err)
            }
        }
    }
}
