use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use itertools::Itertools;
use lexing::ElementAndProperty;
use smol_str::{SmolStr, ToSmolStr, format_smolstr};

use crate::EntryError;
use crate::factory::{EntryParts, number, split_once};

/// Marks an absent source line or offset.
pub const NO_LOCATION: i32 = -1;

/// The location an indirection line declares for its entry.
///
/// Only the folder is substituted into [`IndexEntry::true_folder`]; the
/// other fields are kept so the declaration survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueOrigin {
    pub repository: SmolStr,
    pub path: SmolStr,
    pub project: SmolStr,
    pub folder: SmolStr,
}

/// A documented symbol occurrence.
///
/// Identity is decided by [`IndexEntry::hierarchy`] alone.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub repository: SmolStr,
    pub path: SmolStr,
    pub project: SmolStr,
    pub folder: SmolStr,
    pub true_folder: SmolStr,
    /// The package-qualified module, e.g. `n4/format/StructuredText`.
    pub module: SmolStr,
    pub package: SmolStr,
    pub module_name: SmolStr,
    pub extension: SmolStr,
    pub element: SmolStr,
    /// Empty, or `#`/`@` with an optional `<`/`>` accessor marker.
    pub delimiter: SmolStr,
    pub property: SmolStr,
    pub source_line: i32,
    pub offset_start: i32,
    pub offset_end: i32,
    pub true_origin: Option<TrueOrigin>,
    /// Path segments from most general to most specific.
    pub hierarchy: Box<[SmolStr]>,
    /// Location of the generated documentation unit, relative to the
    /// generated documentation directory.
    pub documentation_path: PathBuf,
}

impl IndexEntry {
    /// Builds an entry from its colon-delimited canonical form:
    ///
    /// ```text
    /// repo:path:project:folder:module.ext:element[#property][:line:start:end[:repo:path:project:folder]]
    /// ```
    ///
    /// Unlike index documents, `folder` and `module` already use `/` separators.
    pub fn from_canonical(canonical: &str) -> Result<IndexEntry, EntryError> {
        let fields = canonical.split(':').collect_vec();
        let [repository, path, project, folder, module_file, element_and_property, rest @ ..] =
            fields.as_slice()
        else {
            let canonical = canonical.to_smolstr();
            return Err(EntryError::TooFewFields { canonical, found: fields.len() });
        };

        let (module, extension) = split_once(module_file, '.')?;
        let (package, module_name) = module.rsplit_once('/').unwrap_or(("", module));
        let ElementAndProperty { element, delimiter, property } =
            lexing::unquote_element_and_property(element_and_property);

        let (source_line, offset_start, offset_end) = match rest {
            [] => (NO_LOCATION, NO_LOCATION, NO_LOCATION),
            [line, start, end, ..] => (number(line)?, number(start)?, number(end)?),
            _ => {
                let canonical = canonical.to_smolstr();
                return Err(EntryError::PartialLocation { canonical });
            }
        };

        let true_origin = match rest {
            [] | [_, _, _] => None,
            [_, _, _, repository, path, project, folder, ..] => Some(TrueOrigin {
                repository: repository.to_smolstr(),
                path: path.to_smolstr(),
                project: project.to_smolstr(),
                folder: folder.to_smolstr(),
            }),
            _ => {
                let canonical = canonical.to_smolstr();
                return Err(EntryError::PartialTrueOrigin { canonical });
            }
        };

        let parts = EntryParts {
            repository: repository.to_smolstr(),
            path: path.to_smolstr(),
            project: project.to_smolstr(),
            folder: folder.to_smolstr(),
            package: package.to_smolstr(),
            module_name: module_name.to_smolstr(),
            extension: extension.to_smolstr(),
            element: element.into(),
            delimiter: delimiter.into(),
            property: property.into(),
            source_line,
            offset_start,
            offset_end,
            true_origin,
        };

        Ok(parts.assemble())
    }

    pub fn has_true_folder(&self) -> bool {
        self.true_folder != self.folder
    }

    pub fn has_location(&self) -> bool {
        self.source_line != NO_LOCATION
    }

    /// The fully qualified name of this entry, usable as a PQN.
    pub fn to_pqn(&self) -> SmolStr {
        let IndexEntry { repository, path, project, folder, module, .. } = self;
        let IndexEntry { element, delimiter, property, .. } = self;
        format_smolstr!("{repository}:{path}:{project}:{folder}/{module}:{element}{delimiter}{property}")
    }

    /// The path of the declaring source file inside its repository.
    pub fn repo_relative_url(&self) -> String {
        let IndexEntry { path, project, folder, module, extension, .. } = self;
        format!("{path}/{project}/{folder}/{module}.{extension}")
    }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.repository, self.path, self.project, self.folder)?;
        if self.has_true_folder() {
            write!(f, "(->{})", self.true_folder)?;
        }
        write!(f, ":{}:{}{}{}", self.module, self.element, self.delimiter, self.property)?;
        write!(f, ":{}", self.source_line)
    }
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &IndexEntry) -> bool {
        self.hierarchy == other.hierarchy
    }
}

impl Eq for IndexEntry {}

impl Hash for IndexEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hierarchy.hash(state);
    }
}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &IndexEntry) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &IndexEntry) -> Ordering {
        self.hierarchy.cmp(&other.hierarchy)
    }
}
