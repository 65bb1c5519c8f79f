//! Prefix-based skip filtering.

/// Ordered list of relative-path prefixes excluded from an archive.
///
/// Matching is plain string-prefix comparison against paths that are
/// already forward-slash normalized and relative to the source root; no
/// glob or regex semantics.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    prefixes: Vec<String>,
}

impl SkipList {
    pub fn new(prefixes: &[String]) -> Self {
        Self {
            prefixes: prefixes.to_vec(),
        }
    }

    /// Whether `relative_path` is excluded from the backup.
    pub fn should_skip(&self, relative_path: &str) -> bool {
        self.prefixes.iter().any(|p| relative_path.starts_with(p))
    }
}
