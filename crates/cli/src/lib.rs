use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use qa_core::Pipeline;

/// How a single `ask` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    NoQuestion,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Answered | Outcome::NoQuestion => 0,
            Outcome::Failed => 1,
        }
    }
}

/// Runs one question through the pipeline and prints the result.
///
/// When `question` is `None` a single line is read from `input`. Pipeline
/// failures are reported on `out`; only I/O problems bubble up as `Err`.
pub fn run<R, W>(
    pipeline: &Pipeline,
    question: Option<String>,
    model: &str,
    mut input: R,
    mut out: W,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    let question = match question {
        Some(question) => question,
        None => {
            writeln!(out, "Enter your question:")?;
            out.flush()?;
            let mut line = String::new();
            input
                .read_line(&mut line)
                .context("Failed to read question from stdin")?;
            line
        }
    };

    // Preparing only fails on empty input.
    let prepared = match pipeline.prepare(&question) {
        Ok(prepared) => prepared,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(Outcome::NoQuestion);
        }
    };

    writeln!(out, "\n--- Processed Question ---")?;
    writeln!(out, "{}", prepared.question.processed)?;
    writeln!(out, "\nCalling {model}…")?;
    out.flush()?;

    match pipeline.complete(&prepared, model) {
        Ok(answer) => {
            writeln!(out, "\n--- Answer ---")?;
            writeln!(out, "{answer}")?;
            Ok(Outcome::Answered)
        }
        Err(err) => {
            tracing::debug!(error = %err, "ask failed");
            writeln!(out, "Error: {err}")?;
            Ok(Outcome::Failed)
        }
    }
}
