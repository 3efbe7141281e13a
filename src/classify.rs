//! Extension -> category lookup.
//!
//! The table is compiled in and built once; lookups are case-insensitive.
//! Unknown or missing extensions yield `None`, which callers treat as "skip silently".

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Folder a file is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Images,
    Documents,
    Videos,
    Audio,
    Archives,
}

impl Category {
    /// Subfolder name under the destination root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One row of the static table. `extension` is lowercase, without the dot.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub extension: &'static str,
    pub category: Category,
}

const fn rule(extension: &'static str, category: Category) -> CategoryRule {
    CategoryRule { extension, category }
}

pub const DEFAULT_RULES: &[CategoryRule] = &[
    rule("jpg", Category::Images),
    rule("jpeg", Category::Images),
    rule("png", Category::Images),
    rule("gif", Category::Images),
    rule("pdf", Category::Documents),
    rule("docx", Category::Documents),
    rule("txt", Category::Documents),
    rule("mp4", Category::Videos),
    rule("avi", Category::Videos),
    rule("mov", Category::Videos),
    rule("mp3", Category::Audio),
    rule("wav", Category::Audio),
    rule("zip", Category::Archives),
    rule("tar", Category::Archives),
    rule("rar", Category::Archives),
];

static DEFAULT_TABLE: LazyLock<CategoryTable> = LazyLock::new(CategoryTable::builtin);

/// Immutable extension -> category map.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    by_ext: HashMap<&'static str, Category>,
}

impl CategoryTable {
    /// Table built from `DEFAULT_RULES`.
    pub fn builtin() -> Self {
        Self::from_rules(DEFAULT_RULES)
    }

    /// Later rules do not override earlier ones; each extension maps to exactly one category.
    pub fn from_rules(rules: &[CategoryRule]) -> Self {
        let mut by_ext = HashMap::with_capacity(rules.len());
        for r in rules {
            by_ext.entry(r.extension).or_insert(r.category);
        }
        Self { by_ext }
    }

    pub fn len(&self) -> usize {
        self.by_ext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ext.is_empty()
    }

    /// Category for `path` by its final extension, if known.
    pub fn classify(&self, path: &Path) -> Option<Category> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.by_ext.get(ext.as_str()).copied()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

/// Classify against the process-wide built-in table.
pub fn classify(path: &Path) -> Option<Category> {
    DEFAULT_TABLE.classify(path)
}
