//! Module scaffolding generator
//!
//! Stamps out the standard six-file skeleton for a new service module:
//! routes, controller, service, model, validator, and kafka stubs. The
//! generator only creates files; it never touches the runtime
//! components that a finished module would use.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Stub kinds emitted for every module, in creation order
pub const STUB_KINDS: [&str; 6] = [
    "routes",
    "controller",
    "service",
    "model",
    "validator",
    "kafka",
];

/// Scaffolding errors
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Module \"{0}\" already exists")]
    AlreadyExists(String),

    #[error("Module path must not be empty")]
    EmptyPath,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a successful scaffold run
#[derive(Debug)]
pub struct CreatedModule {
    /// Directory the module was created in
    pub path: PathBuf,
    /// The six stub files, in creation order
    pub files: Vec<PathBuf>,
}

/// Create a module skeleton under `src_root`
///
/// `module_path` is a slash-separated path like `api/users`; the last
/// segment names the module and its singular form (one trailing `s`
/// stripped) names the stub files. Fails if the target directory
/// already exists, so a re-run never clobbers real code.
pub fn create_module(src_root: &Path, module_path: &str) -> Result<CreatedModule, ScaffoldError> {
    let trimmed = module_path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(ScaffoldError::EmptyPath);
    }

    let parts: Vec<&str> = trimmed.split('/').filter(|part| !part.is_empty()).collect();
    let module_folder = *parts.last().ok_or(ScaffoldError::EmptyPath)?;
    let singular = module_folder.strip_suffix('s').unwrap_or(module_folder);

    let target = parts
        .iter()
        .fold(src_root.to_path_buf(), |path, part| path.join(part));
    if target.exists() {
        return Err(ScaffoldError::AlreadyExists(trimmed.to_string()));
    }

    fs::create_dir_all(&target)?;

    let mut files = Vec::with_capacity(STUB_KINDS.len());
    for kind in STUB_KINDS {
        let file_name = format!("{}.{}.rs", singular, kind);
        let file_path = target.join(&file_name);
        fs::write(&file_path, format!("// {}\n", file_name))?;
        files.push(file_path);
    }

    Ok(CreatedModule {
        path: target,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_six_stub_files() {
        let root = TempDir::new().unwrap();
        let created = create_module(root.path(), "api/users").unwrap();

        assert_eq!(created.path, root.path().join("api").join("users"));
        assert_eq!(created.files.len(), 6);
        for kind in STUB_KINDS {
            let stub = created.path.join(format!("user.{}.rs", kind));
            assert!(stub.exists(), "missing stub {:?}", stub);
        }
    }

    #[test]
    fn test_stub_contains_header_comment() {
        let root = TempDir::new().unwrap();
        let created = create_module(root.path(), "orders").unwrap();

        let content = fs::read_to_string(&created.files[0]).unwrap();
        assert_eq!(content, "// order.routes.rs\n");
    }

    #[test]
    fn test_singular_keeps_name_without_trailing_s() {
        let root = TempDir::new().unwrap();
        let created = create_module(root.path(), "api/health").unwrap();

        assert!(created.path.join("health.controller.rs").exists());
    }

    #[test]
    fn test_existing_module_is_refused() {
        let root = TempDir::new().unwrap();
        create_module(root.path(), "api/users").unwrap();

        let result = create_module(root.path(), "api/users");
        assert!(matches!(result, Err(ScaffoldError::AlreadyExists(_))));
    }

    #[test]
    fn test_empty_path_is_refused() {
        let root = TempDir::new().unwrap();
        assert!(matches!(
            create_module(root.path(), ""),
            Err(ScaffoldError::EmptyPath)
        ));
        assert!(matches!(
            create_module(root.path(), "///"),
            Err(ScaffoldError::EmptyPath)
        ));
    }

    #[test]
    fn test_nested_path_created_recursively() {
        let root = TempDir::new().unwrap();
        let created = create_module(root.path(), "api/v2/accounts").unwrap();

        assert!(created.path.ends_with("api/v2/accounts"));
        assert!(created.path.join("account.model.rs").exists());
    }
}
