//! Completion options

/// Options that shape candidate construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Extension of loadable source files, without the dot.
    /// Stripped from file-tree path candidates.
    pub source_extension: String,
    /// Language tag for fenced code blocks in documentation.
    pub documentation_language: String,
    /// Follow symbolic links while walking the file tree.
    pub follow_symlinks: bool,
    /// Upper bound on path candidates per construct (`None` = unlimited).
    pub max_path_results: Option<usize>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            source_extension: "rb".to_string(),
            documentation_language: "ruby".to_string(),
            follow_symlinks: false,
            max_path_results: None,
        }
    }
}

impl CompletionConfig {
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.source_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_documentation_language(mut self, language: impl Into<String>) -> Self {
        self.documentation_language = language.into();
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_max_path_results(mut self, limit: usize) -> Self {
        self.max_path_results = Some(limit);
        self
    }

    /// `.{source_extension}`
    pub fn dotted_extension(&self) -> String {
        format!(".{}", self.source_extension)
    }
}
