//! The aggregated, de-duplicated data extracted from a build log.

use indexmap::IndexSet;
use std::fmt;

/// A bucket that classified command-line values are sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Warning, optimization, debug, standard and architecture flags.
    CompilerFlags,
    /// Header search paths (`-I`).
    IncludeDirs,
    /// Library search paths (`-L`).
    LibraryDirs,
    /// Libraries to link (`-l`).
    Libraries,
    /// Translation units named on the command line.
    Sources,
    /// Preprocessor definitions (`-D`).
    Definitions,
    /// Options passed through to the linker (`-Wl,`).
    LinkerOptions,
    /// Tokens no rule recognized.
    Unrecognized,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::CompilerFlags,
        Category::IncludeDirs,
        Category::LibraryDirs,
        Category::Libraries,
        Category::Sources,
        Category::Definitions,
        Category::LinkerOptions,
        Category::Unrecognized,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::CompilerFlags => "compiler_flags",
            Category::IncludeDirs => "include_dirs",
            Category::LibraryDirs => "library_dirs",
            Category::Libraries => "libraries",
            Category::Sources => "sources",
            Category::Definitions => "definitions",
            Category::LinkerOptions => "linker_options",
            Category::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counters describing how a log was scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read from the log.
    pub lines_read: usize,
    /// Lines dispatched to the GNU classifier.
    pub gnu_lines: usize,
    /// Lines dispatched to the MSVC classifier.
    pub msvc_lines: usize,
    /// Recognized lines dropped because they could not be tokenized.
    pub skipped_lines: usize,
}

impl ScanStats {
    /// Lines that named a known toolchain, including skipped ones.
    pub fn recognized_lines(&self) -> usize {
        self.gnu_lines + self.msvc_lines
    }
}

/// Build data aggregated across every recognized line of a log.
///
/// Each category is an insertion-ordered set: a value is kept only the first
/// time it is seen, and iteration yields values in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRecord {
    buckets: [IndexSet<String>; Category::ALL.len()],
    stats: ScanStats,
}

impl BuildRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `category`.
    ///
    /// Returns `false` if the value was already present.
    pub fn insert(&mut self, category: Category, value: impl Into<String>) -> bool {
        self.buckets[category.index()].insert(value.into())
    }

    /// Values of a category in first-seen order.
    pub fn values(&self, category: Category) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.buckets[category.index()].iter().map(String::as_str)
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.buckets[category.index()].contains(value)
    }

    pub fn len(&self, category: Category) -> usize {
        self.buckets[category.index()].len()
    }

    /// True when no category holds any value.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(IndexSet::is_empty)
    }

    /// Categories holding at least one value.
    pub fn populated(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| !self.buckets[category.index()].is_empty())
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut ScanStats {
        &mut self.stats
    }

    /// Values of a category collected into owned strings.
    pub fn to_vec(&self, category: Category) -> Vec<String> {
        self.buckets[category.index()].iter().cloned().collect()
    }
}
