//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use scandi_core::lang::conventions::SOURCE_EXTENSION;

use crate::backend;
use crate::frontend::ast::ScopeTree;
use crate::frontend::diagnostics::{self, CompileError};
use crate::frontend::{self, FrontendError, SourceUnit, lexer, parser};

use super::{CliError, CliResult, ExitCode};

/// Largest source file the front end accepts (10 MiB).
pub const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

// ============================================================================
// Loading sources
// ============================================================================

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (10 MiB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::io(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::io(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Every `*.scandi` file below `dir`, sorted. Hidden directories are skipped.
pub fn collect_scandi_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current)
            .map_err(|e| CliError::io(format!("Cannot read library directory '{}': {}", current.display(), e)))?;
        for entry in entries.flatten() {
            let entry_path = entry.path();
            if entry_path.is_dir() {
                let hidden = entry_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'));
                if !hidden {
                    pending.push(entry_path);
                }
            } else if entry_path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                files.push(entry_path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Name of the compilation unit for `path`.
///
/// Below a library root the name is the relative path with separators replaced by `.` and the extension dropped
/// (`util/math.scandi` is `util.math`). Anything else is named after its file stem.
pub fn unit_name(root: Option<&Path>, path: &Path) -> String {
    if let Some(relative) = root.and_then(|r| path.strip_prefix(r).ok()) {
        let segments: Vec<String> = relative
            .with_extension("")
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if !segments.is_empty() {
            return segments.join(".");
        }
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load library units (in directory order) followed by the command-line files.
pub fn load_units(files: &[PathBuf], libs: &[PathBuf]) -> CliResult<Vec<SourceUnit>> {
    let mut units = Vec::new();
    for lib in libs {
        for path in collect_scandi_files(lib)? {
            let name = unit_name(Some(lib), &path);
            units.push(SourceUnit::new(name, read_source(&path)?));
        }
    }
    for path in files {
        units.push(SourceUnit::new(unit_name(None, path), read_source(path)?));
    }
    Ok(units)
}

// ============================================================================
// Stages
// ============================================================================

/// Lex and display tokens.
pub fn lex_units(units: &[SourceUnit]) -> CliResult<ExitCode> {
    let mut errors = Vec::new();
    for unit in units {
        match lexer::tokenize(&unit.source, &unit.name) {
            Ok(tokens) => {
                println!("== {} ==", unit.name);
                for token in &tokens {
                    println!("{token}");
                }
            }
            Err(errs) => errors.extend(errs),
        }
    }
    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(render_errors(units, &errors)))
    }
}

/// Parse and display the unresolved scope tree.
pub fn parse_units(units: &[SourceUnit]) -> CliResult<ExitCode> {
    let mut tree = ScopeTree::new();
    let mut errors = Vec::new();
    for unit in units {
        let tokens = match lexer::tokenize(&unit.source, &unit.name) {
            Ok(tokens) => tokens,
            Err(errs) => {
                errors.extend(errs);
                continue;
            }
        };
        let root = tree.root();
        if let Err(err) = parser::parse_into(&tokens, &mut tree, root) {
            errors.push(err);
        }
    }
    if !errors.is_empty() {
        return Err(CliError::failure(render_errors(units, &errors)));
    }
    print!("{tree}");
    Ok(ExitCode::SUCCESS)
}

/// Run the whole front end and write the code-generation trace.
pub fn compile_units(units: &[SourceUnit], output: Option<&Path>) -> CliResult<ExitCode> {
    let program = frontend::compile(units).map_err(|e| CliError::failure(render_failure(units, &e)))?;

    for warning in &program.report.warnings {
        eprintln!("{}", render(units, warning));
    }
    if !program.report.unresolved.is_empty() {
        tracing::info!(
            count = program.report.unresolved.len(),
            "identifiers left for other compilation units"
        );
    }

    let trace = backend::emit_trace(&program.tree);
    match output {
        Some(path) => {
            fs::write(path, trace)
                .map_err(|e| CliError::io(format!("Error writing '{}': {}", path.display(), e)))?;
        }
        None => print!("{trace}"),
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Rendering
// ============================================================================

fn render_failure(units: &[SourceUnit], error: &FrontendError) -> String {
    let mut msg = render_errors(units, error.errors());
    msg.push_str(&format!("\n{error}"));
    msg
}

fn render_errors(units: &[SourceUnit], errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|err| render(units, err))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render against the unit the error points into, falling back to the bare message.
fn render(units: &[SourceUnit], error: &CompileError) -> String {
    match units.iter().find(|u| u.name == error.position.file) {
        Some(unit) => format!("{:?}", diagnostics::to_report(&unit.source, error)),
        None => error.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name_below_library_root() {
        let root = Path::new("lib");
        assert_eq!(unit_name(Some(root), Path::new("lib/util/math.scandi")), "util.math");
        assert_eq!(unit_name(Some(root), Path::new("lib/io.scandi")), "io");
    }

    #[test]
    fn test_unit_name_outside_library_root() {
        assert_eq!(unit_name(None, Path::new("src/main.scandi")), "main");
        assert_eq!(unit_name(Some(Path::new("lib")), Path::new("other/x.scandi")), "x");
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scandi-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_libraries_load_first_with_dotted_names() {
        let dir = scratch_dir("libs");
        let lib = dir.join("lib");
        fs::create_dir_all(lib.join("util")).unwrap();
        fs::create_dir_all(lib.join(".cache")).unwrap();
        fs::write(lib.join("util").join("math.scandi"), "$pi\n").unwrap();
        fs::write(lib.join("io.scandi"), "$out\n").unwrap();
        fs::write(lib.join("notes.txt"), "not a source").unwrap();
        fs::write(lib.join(".cache").join("stale.scandi"), "$stale\n").unwrap();
        let main = dir.join("main.scandi");
        fs::write(&main, "pi out +\n").unwrap();

        let units = load_units(&[main], &[lib]).unwrap();
        let names: Vec<&str> = units.iter().map(|u| &*u.name).collect();
        assert_eq!(names, vec!["io", "util.math", "main"]);
        assert_eq!(units[2].source, "pi out +\n");

        let out = dir.join("main.trace");
        assert_eq!(compile_units(&units, Some(&out)).unwrap(), ExitCode::SUCCESS);
        let trace = fs::read_to_string(&out).unwrap();
        assert!(
            trace.contains("ADD EXPRESSION pi@util.math pi@util.math out@io + ="),
            "{trace}"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_library_is_an_io_error() {
        let dir = scratch_dir("missing");
        let err = load_units(&[], &[dir.join("nope")]).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::IO);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_falls_back_without_source() {
        let err = CompileError::syntax("Empty conditional", scandi_syntax::ast::Position::builtin());
        assert_eq!(render(&[], &err), "syntax error: Empty conditional");
    }
}
