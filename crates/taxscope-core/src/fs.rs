use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaxScopeError};

/// Top-level directories under the runtime root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Session,
    Logs,
}

impl Scope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Logs => "logs",
        }
    }
}

/// Root-scoped state files. Names are single path segments; anything that
/// could climb out of the root is rejected.
#[derive(Debug, Clone)]
pub struct LocalStateFs {
    root: PathBuf,
}

impl LocalStateFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        for scope in [Scope::Session, Scope::Logs] {
            fs::create_dir_all(self.root.join(scope.as_str()))?;
        }
        Ok(())
    }

    pub fn resolve(&self, scope: Scope, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(scope.as_str()).join(name))
    }

    #[must_use]
    pub fn exists(&self, scope: Scope, name: &str) -> bool {
        self.resolve(scope, name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    pub fn read(&self, scope: Scope, name: &str) -> Result<String> {
        let path = self.resolve(scope, name)?;
        if !path.exists() {
            return Err(TaxScopeError::NotFound(format!(
                "{}/{name}",
                scope.as_str()
            )));
        }
        Ok(fs::read_to_string(path)?)
    }

    pub fn write(&self, scope: Scope, name: &str, content: &str) -> Result<()> {
        let path = self.resolve(scope, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn append(&self, scope: Scope, name: &str, content: &str) -> Result<()> {
        let path = self.resolve(scope, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn remove(&self, scope: Scope, name: &str) -> Result<()> {
        let path = self.resolve(scope, name)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(TaxScopeError::Validation(format!(
            "invalid state file name: {name}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_read_roundtrip_within_scope() {
        let root = tempdir().expect("tempdir");
        let fs = LocalStateFs::new(root.path());
        fs.initialize().expect("initialize");

        fs.write(Scope::Session, "flag.json", "{}").expect("write");
        assert_eq!(fs.read(Scope::Session, "flag.json").expect("read"), "{}");
        assert!(fs.exists(Scope::Session, "flag.json"));
    }

    #[test]
    fn append_accumulates_lines() {
        let root = tempdir().expect("tempdir");
        let fs = LocalStateFs::new(root.path());
        fs.initialize().expect("initialize");

        fs.append(Scope::Logs, "requests.jsonl", "a\n").expect("append");
        fs.append(Scope::Logs, "requests.jsonl", "b\n").expect("append");
        assert_eq!(
            fs.read(Scope::Logs, "requests.jsonl").expect("read"),
            "a\nb\n"
        );
    }

    #[test]
    fn traversal_names_are_rejected() {
        let root = tempdir().expect("tempdir");
        let fs = LocalStateFs::new(root.path());

        assert!(fs.resolve(Scope::Session, "..").is_err());
        assert!(fs.resolve(Scope::Session, "a/b").is_err());
        assert!(fs.resolve(Scope::Session, "").is_err());
    }

    #[test]
    fn remove_is_a_noop_for_missing_files() {
        let root = tempdir().expect("tempdir");
        let fs = LocalStateFs::new(root.path());
        fs.initialize().expect("initialize");

        fs.remove(Scope::Session, "flag.json").expect("remove");
        assert!(fs.read(Scope::Session, "flag.json").is_err());
    }
}
