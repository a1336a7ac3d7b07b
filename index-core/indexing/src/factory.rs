//! Turns the names enclosing a leaf line of an index document into an [`IndexEntry`].

use std::path::PathBuf;

use smol_str::{SmolStr, ToSmolStr, format_smolstr};

use crate::{EntryError, IndexEntry, NO_LOCATION, TrueOrigin};

/// The number of enclosing names a leaf declaration needs: element,
/// module file, package, `project#folder` and `repository#path`.
pub const NAME_STACK_DEPTH: usize = 5;

/// Everything a leaf line declares besides its enclosing names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub delimiter: SmolStr,
    pub property: SmolStr,
    pub source_line: i32,
    pub offset_start: i32,
    pub offset_end: i32,
    pub true_origin: Option<TrueOrigin>,
}

impl Default for Declaration {
    fn default() -> Declaration {
        Declaration {
            delimiter: SmolStr::default(),
            property: SmolStr::default(),
            source_line: NO_LOCATION,
            offset_start: NO_LOCATION,
            offset_end: NO_LOCATION,
            true_origin: None,
        }
    }
}

/// Builds an entry from a name stack ordered deepest first:
///
/// ```text
/// [element, module.ext, package, project#folder, repository#path, ..]
/// ```
///
/// Dots in the path, folder and package become `/`. Names beyond the
/// fifth are ignored.
pub fn build_entry(
    name_stack: &[SmolStr],
    declaration: &Declaration,
) -> Result<IndexEntry, EntryError> {
    let [element, module_file, package, project_and_folder, repository_and_path, ..] = name_stack
    else {
        let found = name_stack.len();
        return Err(EntryError::Incomplete { expected: NAME_STACK_DEPTH, found });
    };

    let (repository, path) = split_once(repository_and_path, '#')?;
    let (project, folder) = split_once(project_and_folder, '#')?;
    let (module_name, extension) = split_once(module_file, '.')?;

    let parts = EntryParts {
        repository: repository.to_smolstr(),
        path: path.replace('.', "/").to_smolstr(),
        project: project.to_smolstr(),
        folder: folder.replace('.', "/").to_smolstr(),
        package: package.replace('.', "/").to_smolstr(),
        module_name: module_name.to_smolstr(),
        extension: extension.to_smolstr(),
        element: element.clone(),
        delimiter: declaration.delimiter.clone(),
        property: declaration.property.clone(),
        source_line: declaration.source_line,
        offset_start: declaration.offset_start,
        offset_end: declaration.offset_end,
        true_origin: declaration.true_origin.clone(),
    };

    Ok(parts.assemble())
}

pub(crate) fn split_once(name: &str, separator: char) -> Result<(&str, &str), EntryError> {
    name.split_once(separator)
        .ok_or_else(|| EntryError::MissingSeparator { name: name.to_smolstr(), separator })
}

pub(crate) fn number(text: &str) -> Result<i32, EntryError> {
    text.trim().parse().map_err(|_| EntryError::InvalidNumber { text: text.to_smolstr() })
}

/// Normalised fields of an entry, before its derived fields are computed.
pub(crate) struct EntryParts {
    pub(crate) repository: SmolStr,
    pub(crate) path: SmolStr,
    pub(crate) project: SmolStr,
    pub(crate) folder: SmolStr,
    pub(crate) package: SmolStr,
    pub(crate) module_name: SmolStr,
    pub(crate) extension: SmolStr,
    pub(crate) element: SmolStr,
    pub(crate) delimiter: SmolStr,
    pub(crate) property: SmolStr,
    pub(crate) source_line: i32,
    pub(crate) offset_start: i32,
    pub(crate) offset_end: i32,
    pub(crate) true_origin: Option<TrueOrigin>,
}

impl EntryParts {
    pub(crate) fn assemble(self) -> IndexEntry {
        let EntryParts {
            repository,
            path,
            project,
            folder,
            package,
            module_name,
            extension,
            element,
            delimiter,
            property,
            source_line,
            offset_start,
            offset_end,
            true_origin,
        } = self;

        let module = if package.is_empty() {
            module_name.clone()
        } else {
            format_smolstr!("{package}/{module_name}")
        };

        let true_folder = match &true_origin {
            Some(origin) => origin.folder.replace('.', "/").to_smolstr(),
            None => folder.clone(),
        };

        let mut hierarchy = vec![repository.clone(), path.clone(), project.clone()];
        hierarchy.extend(segments(&folder));
        hierarchy.extend(segments(&module));
        hierarchy.push(element.clone());
        if !delimiter.is_empty() {
            hierarchy.push(delimiter.clone());
        }
        if !property.is_empty() {
            hierarchy.push(property.clone());
        }

        let mut documentation_path = PathBuf::new();
        documentation_path.push(format!("{repository}#{}", path.replace('/', ".")));
        documentation_path.push(format!("{project}#{}", folder.replace('/', ".")));
        if !package.is_empty() {
            documentation_path.push(package.replace('/', "."));
        }
        documentation_path.push(format!("{module_name}.adoc"));

        IndexEntry {
            repository,
            path,
            project,
            folder,
            true_folder,
            module,
            package,
            module_name,
            extension,
            element,
            delimiter,
            property,
            source_line,
            offset_start,
            offset_end,
            true_origin,
            hierarchy: hierarchy.into_boxed_slice(),
            documentation_path,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = SmolStr> + '_ {
    path.trim_matches('/').split('/').map(SmolStr::new)
}
