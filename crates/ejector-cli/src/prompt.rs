//! Confirmation adapters for the eject prompt.

use std::io::{self, BufRead, IsTerminal, Write};

use ejector_core::{
    application::{ApplicationError, ports::Confirmation},
    error::EjectResult,
};
use tracing::debug;

/// Answers "yes" without asking (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, question: &str) -> EjectResult<bool> {
        debug!(question, "Confirmation assumed");
        Ok(true)
    }
}

/// Asks on the terminal, defaulting to "no".
///
/// Uses a `dialoguer` prompt when both stdin and stdout are terminals and
/// the `interactive` feature is on; otherwise reads a single line from
/// stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl Confirmation for TerminalPrompt {
    fn confirm(&self, question: &str) -> EjectResult<bool> {
        let asked = if io::stdin().is_terminal() && io::stdout().is_terminal() {
            interactive(question)
        } else {
            let mut stdout = io::stdout();
            ask(question, &mut io::stdin().lock(), &mut stdout)
        };
        let answer = asked.map_err(|reason| ApplicationError::AdapterFailure {
            name: "prompt",
            reason,
        })?;

        debug!(question, answer, "Confirmation answered");
        Ok(answer)
    }
}

#[cfg(feature = "interactive")]
fn interactive(question: &str) -> Result<bool, String> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "interactive"))]
fn interactive(question: &str) -> Result<bool, String> {
    let mut stdout = io::stdout();
    ask(question, &mut io::stdin().lock(), &mut stdout)
}

/// Line-based prompt. End of input counts as "no".
fn ask(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool, String> {
    write!(output, "? {question} (y/N) ").map_err(|e| e.to_string())?;
    output.flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| e.to_string())?;
    writeln!(output).map_err(|e| e.to_string())?;

    Ok(is_affirmative(&line))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
