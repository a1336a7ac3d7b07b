use std::io::{self, Write};
use std::path::Path;

use parsing::IndexFileError;

use crate::cli::Command;
use crate::session::{ResolveError, SessionError, SourceIndexSession};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Index(#[from] IndexFileError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one PQN could not be resolved.
    Failure,
}

pub fn run(command: &Command, output: &mut impl Write) -> Result<Outcome, CommandError> {
    match command {
        Command::Check { index } => check(index, output),
        Command::Entries { index } => entries(index, output),
        Command::Resolve { gen_dir, pqns } => {
            let session = SourceIndexSession::new(gen_dir);
            resolve(&session, pqns, output)
        }
    }
}

fn check(index: &Path, output: &mut impl Write) -> Result<Outcome, CommandError> {
    let database = parsing::parse_index_file(index)?;
    writeln!(output, "{}: {} entries", index.display(), database.len())?;
    Ok(Outcome::Success)
}

fn entries(index: &Path, output: &mut impl Write) -> Result<Outcome, CommandError> {
    let database = parsing::parse_index_file(index)?;
    for entry in database.entries() {
        writeln!(output, "{entry}")?;
    }
    Ok(Outcome::Success)
}

/// Resolves every PQN, reporting failures in place.
///
/// Errors of the session itself, such as an unreadable index, abort the command.
pub fn resolve(
    session: &SourceIndexSession,
    pqns: &[String],
    output: &mut impl Write,
) -> Result<Outcome, CommandError> {
    let _span = tracing::info_span!("resolve", count = pqns.len()).entered();

    let mut outcome = Outcome::Success;
    for pqn in pqns {
        match session.resolve(pqn) {
            Ok(resolution) => {
                let entry = &resolution.entry;
                let url = entry.repo_relative_url();
                writeln!(output, "{} -> {url}:{}", resolution.complete_pqn, entry.source_line)?;
            }
            Err(ResolveError::Session(error)) => return Err(error.into()),
            Err(error) => {
                tracing::warn!(%pqn, "{}", error.inline_message());
                writeln!(output, "{error}")?;
                if let ResolveError::Ambiguous { candidates, .. } = &error {
                    for candidate in candidates {
                        writeln!(output, "  {candidate}")?;
                    }
                }
                outcome = Outcome::Failure;
            }
        }
    }

    Ok(outcome)
}
