//! Lazily loaded access to the source index of a generated documentation directory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use indexing::IndexEntry;
use parsing::{IndexFileError, ParseError, Pqn};
use resolving::{LookupError, SourceIndexDatabase};
use smol_str::SmolStr;

/// Name of the index document inside the generated documentation directory.
pub const INDEX_FILE_NAME: &str = "index.idx";

const MODULES_DIR_NAME: &str = "modules";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no generated documentation directory configured")]
    NotConfigured,
    #[error(
        "generated documentation directory already in use: {}, cannot switch to {}",
        current.display(),
        requested.display()
    )]
    Reconfigured { current: PathBuf, requested: PathBuf },
    #[error(transparent)]
    Index(#[from] IndexFileError),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("PQN could not be parsed: '{pqn}'.")]
    Malformed {
        pqn: String,
        #[source]
        error: ParseError,
    },
    #[error("PQN is ambiguous: '{pqn}'.")]
    Ambiguous {
        pqn: String,
        /// Complete PQNs of the entries the PQN could refer to.
        candidates: Vec<SmolStr>,
    },
    #[error("PQN not found: '{pqn}'.")]
    NotFound { pqn: String },
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ResolveError {
    /// The short diagnostic placed into the document at the reference.
    pub fn inline_message(&self) -> &'static str {
        match self {
            ResolveError::Malformed { .. } => "PQN malformed",
            ResolveError::Ambiguous { .. } => "Ambiguous PQN",
            ResolveError::NotFound { .. } => "PQN not found",
            ResolveError::Session(_) => "Source index unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub entry: IndexEntry,
    /// The fully qualified name of the entry.
    pub complete_pqn: SmolStr,
}

#[derive(Debug, Default)]
pub struct SourceIndexSession {
    gen_dir: Option<PathBuf>,
    database: OnceLock<Arc<SourceIndexDatabase>>,
}

impl SourceIndexSession {
    pub fn new(gen_dir: impl Into<PathBuf>) -> SourceIndexSession {
        let gen_dir = Some(gen_dir.into());
        let database = OnceLock::new();
        SourceIndexSession { gen_dir, database }
    }

    /// Sets the generated documentation directory.
    ///
    /// Once the index is loaded the directory is fixed: configuring the same
    /// directory again is ignored and any other directory is an error.
    pub fn configure(&mut self, gen_dir: impl Into<PathBuf>) -> Result<(), SessionError> {
        let requested = gen_dir.into();
        if let Some(current) = &self.gen_dir
            && self.is_loaded()
        {
            if *current == requested {
                tracing::debug!(path = %requested.display(), "Directory already configured");
                return Ok(());
            }
            let current = current.clone();
            return Err(SessionError::Reconfigured { current, requested });
        }
        self.gen_dir = Some(requested);
        Ok(())
    }

    /// Forgets the directory and the loaded index.
    pub fn reset(&mut self) {
        self.gen_dir = None;
        self.database = OnceLock::new();
    }

    pub fn gen_dir(&self) -> Option<&Path> {
        self.gen_dir.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.database.get().is_some()
    }

    pub fn index_file(&self) -> Result<PathBuf, SessionError> {
        let gen_dir = self.gen_dir.as_ref().ok_or(SessionError::NotConfigured)?;
        Ok(gen_dir.join(INDEX_FILE_NAME))
    }

    pub fn modules_dir(&self) -> Result<PathBuf, SessionError> {
        let gen_dir = self.gen_dir.as_ref().ok_or(SessionError::NotConfigured)?;
        Ok(gen_dir.join(MODULES_DIR_NAME))
    }

    /// The generated documentation unit that documents `entry`.
    pub fn documentation_file(&self, entry: &IndexEntry) -> Result<PathBuf, SessionError> {
        Ok(self.modules_dir()?.join(&entry.documentation_path))
    }

    /// The index of the configured directory, parsed on first use.
    pub fn database(&self) -> Result<Arc<SourceIndexDatabase>, SessionError> {
        if let Some(database) = self.database.get() {
            return Ok(Arc::clone(database));
        }

        let path = self.index_file()?;
        tracing::info!(path = %path.display(), "Loading source index");
        let database = parsing::parse_index_file(&path)?;

        let database = self.database.get_or_init(|| Arc::new(database));
        Ok(Arc::clone(database))
    }

    pub fn resolve(&self, pqn: &str) -> Result<Resolution, ResolveError> {
        let parsed = Pqn::parse(pqn)
            .map_err(|error| ResolveError::Malformed { pqn: pqn.to_string(), error })?;

        let database = self.database()?;
        let entry = database.get_entry(&parsed).map_err(|error| match error {
            LookupError::NotInIndex => ResolveError::NotFound { pqn: pqn.to_string() },
            LookupError::Ambiguous => {
                let candidates =
                    database.candidates(&parsed).into_iter().map(IndexEntry::to_pqn).collect();
                ResolveError::Ambiguous { pqn: pqn.to_string(), candidates }
            }
        })?;

        let entry = entry.clone();
        let complete_pqn = entry.to_pqn();
        tracing::debug!(%pqn, %complete_pqn, "Resolved");

        Ok(Resolution { entry, complete_pqn })
    }
}
