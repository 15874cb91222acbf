//! Interactive session
//!
//! ```text
//! Welcome to myDB, please enter tablename> students
//! Reading meta-data...
//! Building index tree(s)...
//! Index column: id
//!   Tree size: 3
//!   Tree height: 1
//!
//! Enter query> select * from students where id = 2
//! id: 2
//! name: bob
//!
//! Enter query> exit
//! ```
//!
//! A schema that cannot be loaded ends the session before any query is
//! read. Every other failure is reported and the session goes on.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::executor::{QueryContext, QueryEvaluator, QueryOptions};
use crate::index::{IndexSet, IndexStatus};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, ObservationScope};
use crate::schema::{SchemaError, SchemaLoader};

use super::errors::{CliError, CliResult};
use super::io::{prompt, read_line};

const TABLE_PROMPT: &str = "Welcome to myDB, please enter tablename> ";
const QUERY_PROMPT: &str = "Enter query> ";

/// How a session ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// `exit` was entered or input ended; carries the number of queries read
    Completed { queries: u64 },
    /// The table's schema could not be loaded
    SchemaFailed(SchemaError),
    /// Input ended before a table name was given
    NoTable,
}

/// One interactive session over a line reader and a writer
pub struct Session<R: BufRead, W: Write> {
    input: R,
    output: W,
    data_dir: PathBuf,
    options: QueryOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, data_dir: impl Into<PathBuf>, options: QueryOptions) -> Self {
        Self {
            input,
            output,
            data_dir: data_dir.into(),
            options,
        }
    }

    /// Consumes the session and returns its writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the session to completion.
    ///
    /// `table` skips the table-name prompt.
    pub fn run(&mut self, table: Option<&str>) -> CliResult<SessionOutcome> {
        let table = match table {
            Some(name) => name.to_string(),
            None => {
                prompt(&mut self.output, TABLE_PROMPT)?;
                match read_line(&mut self.input)? {
                    Some(line) => line.trim().to_string(),
                    None => return Ok(SessionOutcome::NoTable),
                }
            }
        };

        log_event_with_fields(Event::StartupBegin, &[("table", table.as_str())]);

        writeln!(self.output, "Reading meta-data...")?;
        let scope = ObservationScope::with_fields("SCHEMA_LOAD", &[("table", table.as_str())]);
        let schema = match SchemaLoader::new(&self.data_dir).load(&table) {
            Ok(schema) => {
                scope.complete_with_fields(&[
                    ("columns", &schema.column_count().to_string()),
                    ("record_size", &schema.record_size().to_string()),
                ]);
                schema
            }
            Err(err) => {
                scope.fail(err.message());
                writeln!(self.output, "**Error: {}.", err.message())?;
                log_event_with_fields(Event::StartupFailed, &[("code", err.code().code())]);
                return Ok(SessionOutcome::SchemaFailed(err));
            }
        };

        writeln!(self.output, "Building index tree(s)...")?;
        let context = QueryContext::open(&self.data_dir, schema, self.options)
            .map_err(|e| CliError::Startup(e.to_string()))?;
        self.report_indexes(&table, context.indexes())?;

        let records = match context.store().record_count() {
            Ok(count) => count.to_string(),
            Err(err) => err.code().code().to_string(),
        };
        log_event_with_fields(
            Event::StartupComplete,
            &[
                ("data_file", &context.store().path().display().to_string()),
                ("indexes", &context.indexes().len().to_string()),
                ("records", records.as_str()),
            ],
        );

        let queries = self.serve(&context)?;

        Logger::info("MYDB_SESSION_METRICS", &[("metrics", &context.metrics().to_json())]);
        log_event(Event::ShutdownComplete);

        Ok(SessionOutcome::Completed { queries })
    }

    /// Prints build failures, then size and height of every index.
    fn report_indexes(&mut self, table: &str, indexes: &IndexSet) -> CliResult<()> {
        for index in indexes {
            match index.status() {
                IndexStatus::Ready => {}
                IndexStatus::Degraded(err) if err.is_unavailable() => {
                    writeln!(self.output, "**Error: couldn't open data file '{}'.", table)?
                }
                IndexStatus::Degraded(err) => writeln!(self.output, "**Error: {}", err.message())?,
                IndexStatus::Partial(skipped) => {
                    for err in skipped {
                        writeln!(self.output, "**Error: {}", err.message())?;
                    }
                }
            }
        }

        for index in indexes {
            writeln!(self.output, "Index column: {}", index.column())?;
            writeln!(self.output, "  Tree size: {}", index.tree().size())?;
            writeln!(self.output, "  Tree height: {}", index.tree().height())?;
        }

        Ok(())
    }

    /// Reads and answers queries until `exit` or end of input.
    fn serve(&mut self, context: &QueryContext) -> CliResult<u64> {
        let mut evaluator = QueryEvaluator::new(context);
        let mut queries = 0;

        loop {
            writeln!(self.output)?;
            prompt(&mut self.output, QUERY_PROMPT)?;

            let Some(line) = read_line(&mut self.input)? else {
                break;
            };

            let evaluation = evaluator.evaluate(&line);
            if evaluation.is_terminated() {
                break;
            }
            queries += 1;
            evaluation.write_to(&mut self.output)?;
        }

        self.output.flush()?;
        Ok(queries)
    }
}
