//! Line-oriented interactive form session.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use quote_core::flow::{FormAction, FormController};
use quote_core::{DraftStore, Field, QuoteExporter};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::logging;
use crate::render::render_screen;
use crate::utils::parse_assignment;

pub const HELP: &str = "\
Commands:
  <field>=<value>   answer a field on this step, e.g. fullName=Watu Matuze
  next | back       move between steps
  save              save progress
  reset             clear all answers (asks first)
  export            write the quote document (summary step)
  submit            submit the quote request (summary step)
  email             email the quote (summary step)
  show              redraw the current step
  log <level>       change log verbosity
  help              show this text
  quit              leave the session";

const RESET_PROMPT: &str = "Are you sure you want to reset the form? All data will be lost. [y/N] ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit { field: Field, value: String },
    Next,
    Back,
    Save,
    Reset,
    Export,
    Submit,
    Email,
    Show,
    Log(String),
    Help,
    Quit,
}

/// Parses one input line.
///
/// Keywords are case-insensitive. Anything containing `=` is an edit.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let lowered = trimmed.to_ascii_lowercase();

    let command = match lowered.as_str() {
        "next" | "n" => Command::Next,
        "back" | "b" => Command::Back,
        "save" => Command::Save,
        "reset" => Command::Reset,
        "export" | "download" => Command::Export,
        "submit" => Command::Submit,
        "email" => Command::Email,
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => {
            if let Some(level) = lowered.strip_prefix("log ") {
                return Ok(Command::Log(level.trim().to_string()));
            }
            if trimmed.contains('=') {
                let (field, value) = parse_assignment(line).map_err(|e| e.to_string())?;
                return Ok(Command::Edit { field, value });
            }
            return Err(format!("unknown command '{trimmed}', type 'help' for a list"));
        }
    };
    Ok(command)
}

/// Drives a [`FormController`] from text input.
pub struct Session<S: DraftStore, E: QuoteExporter> {
    form: FormController<S>,
    exporter: E,
}

impl<S: DraftStore, E: QuoteExporter> Session<S, E> {
    pub fn new(
        form: FormController<S>,
        exporter: E,
    ) -> Self {
        Self { form, exporter }
    }

    pub fn form(&self) -> &FormController<S> {
        &self.form
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        write!(output, "{}", render_screen(self.form.state()))?;
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                debug!("input closed");
                break;
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(output, "{message}")?;
                    continue;
                }
            };

            if self.form.state().notice.is_some() {
                self.form.dispatch(FormAction::DismissNotice).await;
            }

            match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(output, "{HELP}")?;
                    continue;
                }
                Command::Log(level) => {
                    match logging::set_log_level(&level) {
                        Ok(()) => writeln!(output, "log level set to {level}")?,
                        Err(e) => writeln!(output, "{e:#}")?,
                    }
                    continue;
                }
                Command::Reset => {
                    write!(output, "{RESET_PROMPT}")?;
                    output.flush()?;
                    let answer = lines.next_line().await?.unwrap_or_default();
                    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                        self.form.dispatch(FormAction::Reset).await;
                    } else {
                        writeln!(output, "Reset cancelled.")?;
                    }
                }
                Command::Export | Command::Submit | Command::Email
                    if !self.form.state().step.is_terminal() =>
                {
                    writeln!(output, "Finish the form first; this is available on the summary step.")?;
                    continue;
                }
                Command::Export => {
                    let today = Local::now().date_naive();
                    if let Err(e) = self.form.export(&self.exporter, today).await {
                        warn!(error = %e, "export did not complete");
                    }
                }
                Command::Edit { field, value } => {
                    self.form.dispatch(FormAction::Edit { field, value }).await;
                }
                Command::Next => {
                    self.form.dispatch(FormAction::Next).await;
                }
                Command::Back => {
                    self.form.dispatch(FormAction::Back).await;
                }
                Command::Save => {
                    self.form.dispatch(FormAction::Save).await;
                }
                Command::Submit => {
                    self.form.dispatch(FormAction::Submit).await;
                }
                Command::Email => {
                    self.form.dispatch(FormAction::EmailQuote).await;
                }
                Command::Show => {}
            }

            write!(output, "{}", render_screen(self.form.state()))?;
        }

        Ok(())
    }
}
