//! extdoc — generate class documentation from annotated JavaScript sources.
//!
//! `extdoc -o docs src/*.js` writes `docs/tree.js` (navigation data) and one
//! `docs/<Class.Name>.html` page per documented class.

use anyhow::{bail, Context, Result};
use clap::Parser;
use extdoc::assemble::{assemble, Assembly};
use extdoc::page::PageModel;
use extdoc::tree::NamespaceTree;
use extdoc::{logger, parser, render, Diagnostic};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "extdoc",
    about = "Generate class documentation from annotated JavaScript source files"
)]
struct Cli {
    /// Input files, directories or glob patterns
    files: Vec<String>,

    /// Directory to write the documentation to (created if missing)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Report each file as it is parsed and each page as it is written
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Page format: html (default), json
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Include @private members on class pages
    #[arg(long)]
    show_private: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    if cli.files.is_empty() {
        bail!("no input files given, nothing to document");
    }
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required: the directory to write documentation to")?;
    if output_dir.exists() && !output_dir.is_dir() {
        bail!("output path is not a directory: {}", output_dir.display());
    }

    let renderer = render::create_renderer(&cli.format)?;
    let input_files = expand_inputs(&cli.files)?;
    if input_files.is_empty() {
        bail!("no input files matched");
    }

    // Parse every unit; an unterminated doc comment aborts the run
    let mut units = Vec::with_capacity(input_files.len());
    for path in &input_files {
        info!("Parsing {} ...", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut diags = Vec::new();
        let nodes = parser::parse_unit(&content, &mut diags)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        for diag in &diags {
            warn!("{}: {}", path.display(), diag);
        }
        units.push(nodes);
    }

    let Assembly { classes, orphans } = assemble(units);
    for orphan in orphans {
        warn!(
            "{}",
            Diagnostic::Orphan {
                kind: orphan.kind,
                name: orphan.name,
            }
        );
    }

    // Render everything in memory first so a fatal error leaves no output
    let tree = NamespaceTree::build(&classes);
    let nav = render::nav_script(&tree, &classes)?;

    let mut diags = Vec::new();
    let mut pages = Vec::with_capacity(classes.len());
    for name in classes.keys() {
        let page = PageModel::build(name, &classes, cli.show_private, &mut diags)
            .with_context(|| format!("failed to resolve class {}", name))?;
        let out_path = output_dir.join(format!("{}.{}", name, renderer.file_extension()));
        let output = renderer
            .render(&page)
            .with_context(|| format!("failed to render class {}", name))?;
        pages.push((out_path, output));
    }
    for diag in dedup(diags) {
        warn!("{}", diag);
    }

    if !output_dir.exists() {
        info!("Creating output directory {}", output_dir.display());
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let tree_path = output_dir.join("tree.js");
    fs::write(&tree_path, nav)
        .with_context(|| format!("failed to write {}", tree_path.display()))?;

    for (out_path, output) in pages {
        info!("Writing to {} ...", out_path.display());
        fs::write(&out_path, &output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// File extensions recognized as source files when scanning a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["js"];

/// Expand inputs into file paths, keeping the order given on the command
/// line. Directories are scanned (non-recursive) for supported files;
/// anything else is tried as a glob.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut found: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_supported_extension(p))
                .collect();
            found.sort();
            files.extend(found);
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    Ok(dedup(files))
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Drop repeats, keeping the first occurrence.
fn dedup<T: Clone + Eq + std::hash::Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        assert_eq!(dedup(vec!["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
    }

    #[test]
    fn supported_extension() {
        assert!(has_supported_extension(Path::new("src/Panel.js")));
        assert!(!has_supported_extension(Path::new("README.md")));
        assert!(!has_supported_extension(Path::new("Makefile")));
    }
}
