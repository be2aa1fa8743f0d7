//! The fixed repo-scan ignore list (spec §6): VCS dirs, dependency caches,
//! build outputs, bytecode dirs, virtualenvs, and lockfiles.

const IGNORED_DIR_NAMES: &[&str] = &[
    // VCS
    ".git",
    ".svn",
    ".hg",
    // dependency caches
    "node_modules",
    "vendor",
    ".cargo",
    ".gradle",
    ".m2",
    // build outputs
    "target",
    "build",
    "dist",
    "out",
    "bin",
    "obj",
    // bytecode / tool caches
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".dart_tool",
    // virtualenvs
    ".venv",
    "venv",
    "env",
    // editor metadata
    ".idea",
    ".vscode",
];

const IGNORED_LOCKFILES: &[&str] = &[
    "Cargo.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "Pipfile.lock",
    "go.sum",
    "composer.lock",
];

/// Whether a directory entry name should stop the walker from descending.
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIR_NAMES.contains(&name)
}

/// Whether a file name is a lockfile excluded from the snapshot.
pub fn is_ignored_lockfile(name: &str) -> bool {
    IGNORED_LOCKFILES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_vcs_and_build_dirs() {
        assert!(is_ignored_dir(".git"));
        assert!(is_ignored_dir("node_modules"));
        assert!(is_ignored_dir("target"));
        assert!(!is_ignored_dir("src"));
    }

    #[test]
    fn recognizes_lockfiles() {
        assert!(is_ignored_lockfile("Cargo.lock"));
        assert!(!is_ignored_lockfile("Cargo.toml"));
    }
}
