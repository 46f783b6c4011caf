use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{map_cli_source_path, map_cli_source_read, map_cli_source_scan, CliError, LoadedTrees};

const TREE_EXTENSIONS: &[&str] = &[".tree", ".json"];

pub(crate) fn load_trees_by_dir(trees_dir: &str) -> Result<LoadedTrees, CliError> {
    let root = resolve_trees_dir(trees_dir)?;
    let sources = read_tree_sources_from_dir(&root)?;
    tracing::debug!(root = %root.display(), count = sources.len(), "loaded trees");
    Ok(LoadedTrees { root, sources })
}

pub(crate) fn read_tree_file(tree_path: &str) -> Result<String, CliError> {
    let path = absolute_path(tree_path)?;
    if !path.is_file() {
        return Err(CliError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("tree file does not exist: {}", path.display()),
        ));
    }
    fs::read_to_string(&path).map_err(map_cli_source_read)
}

pub(crate) fn resolve_trees_dir(trees_dir: &str) -> Result<PathBuf, CliError> {
    let absolute = absolute_path(trees_dir)?;

    if !absolute.exists() {
        return Err(CliError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("trees-dir does not exist: {}", absolute.display()),
        ));
    }

    if !absolute.is_dir() {
        return Err(CliError::new(
            "CLI_SOURCE_NOT_DIR",
            format!("trees-dir is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

pub(crate) fn read_tree_sources_from_dir(
    trees_dir: &Path,
) -> Result<BTreeMap<String, String>, CliError> {
    let mut sources = BTreeMap::new();

    for entry in WalkDir::new(trees_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let path_str = path.to_string_lossy();
        if !TREE_EXTENSIONS
            .iter()
            .any(|extension| path_str.ends_with(extension))
        {
            continue;
        }

        let relative = path
            .strip_prefix(trees_dir)
            .map_err(map_cli_source_scan)?
            .to_string_lossy()
            .replace('\\', "/");

        let content = fs::read_to_string(path).map_err(map_cli_source_read)?;
        sources.insert(relative, content);
    }

    if sources.is_empty() {
        return Err(CliError::new(
            "CLI_SOURCE_EMPTY",
            format!("No .tree/.json files under {}", trees_dir.display()),
        ));
    }

    Ok(sources)
}

fn absolute_path(raw: &str) -> Result<PathBuf, CliError> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(std::env::current_dir()
        .map_err(map_cli_source_path)?
        .join(path))
}
