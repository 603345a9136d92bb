//! Recognized compiler toolchains and their option tables.
//!
//! A log line is attributed to a toolchain by a literal invocation marker.
//! Markers are checked in [`Toolchain::ALL`] order and the first one found
//! wins, so a line is never classified twice.

use crate::error::TokenizeError;
use crate::record::{BuildRecord, Category};
use crate::rules::{classify_tokens, OptionMatcher, OptionRule};
use crate::shell::{split_words, ShellDialect};
use std::sync::LazyLock;

/// Source file suffixes recognized by every toolchain.
pub const SOURCE_SUFFIXES: &[&str] = &[".cpp", ".cc", ".cxx", ".c++", ".c", ".C"];

/// A compiler family whose invocations can be read from a build log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    /// GCC's C++ driver, `g++`.
    Gnu,
    /// The Microsoft C/C++ compiler, `cl`.
    Msvc,
}

impl Toolchain {
    /// Toolchains in marker priority order.
    pub const ALL: [Toolchain; 2] = [Toolchain::Gnu, Toolchain::Msvc];

    /// The literal substring that identifies an invocation of this toolchain.
    pub fn marker(self) -> &'static str {
        match self {
            Toolchain::Gnu => "g++ ",
            Toolchain::Msvc => "cl ",
        }
    }

    pub fn dialect(self) -> ShellDialect {
        match self {
            Toolchain::Gnu => ShellDialect::Posix,
            Toolchain::Msvc => ShellDialect::Windows,
        }
    }

    /// The ordered option rules for the compile part of a command line.
    pub fn rules(self) -> &'static [OptionRule] {
        match self {
            Toolchain::Gnu => &GNU_RULES,
            Toolchain::Msvc => &MSVC_RULES,
        }
    }

    /// Find the toolchain whose marker appears in `line`.
    pub fn detect(line: &str) -> Option<Toolchain> {
        Self::ALL.into_iter().find(|toolchain| line.contains(toolchain.marker()))
    }

    /// The command-line part of `line`: everything after the first marker.
    pub fn command<'a>(self, line: &'a str) -> Option<&'a str> {
        line.split_once(self.marker()).map(|(_, rest)| rest.trim())
    }

    /// Tokenize one log line and classify its tokens into `record`.
    ///
    /// Lines that do not contain this toolchain's marker are left alone. On a
    /// quoting error nothing from the line is recorded.
    pub fn classify_line(self, line: &str, record: &mut BuildRecord) -> Result<(), TokenizeError> {
        let Some(command) = self.command(line) else {
            return Ok(());
        };
        let tokens = split_words(command, self.dialect())?;

        // cl passes everything after `/link` to the linker.
        let link_at = match self {
            Toolchain::Gnu => None,
            Toolchain::Msvc => tokens.iter().position(|token| is_link_separator(token)),
        };
        match link_at {
            Some(at) => {
                classify_tokens(self.rules(), &tokens[..at], record);
                record.insert(Category::Unrecognized, tokens[at].as_str());
                classify_tokens(&MSVC_LINK_RULES, &tokens[at + 1..], record);
            }
            None => classify_tokens(self.rules(), &tokens, record),
        }
        Ok(())
    }
}

fn is_link_separator(token: &str) -> bool {
    token.eq_ignore_ascii_case("/link") || token.eq_ignore_ascii_case("-link")
}

/// g++ options.
///
/// https://gcc.gnu.org/onlinedocs/gcc/Option-Summary.html
static GNU_RULES: LazyLock<Vec<OptionRule>> = LazyLock::new(|| {
    vec![
        OptionRule::new(OptionMatcher::GluedOrSeparate("-I"), Category::IncludeDirs),
        OptionRule::new(OptionMatcher::GluedOrSeparate("-L"), Category::LibraryDirs),
        OptionRule::new(OptionMatcher::GluedOrSeparate("-l"), Category::Libraries),
        OptionRule::new(OptionMatcher::Prefix("-Wl,"), Category::LinkerOptions),
        OptionRule::new(OptionMatcher::GluedOrSeparate("-D"), Category::Definitions),
        // Warnings
        OptionRule::pattern(r"^-W\S+$", Category::CompilerFlags),
        OptionRule::new(OptionMatcher::Exactly("-w"), Category::CompilerFlags),
        // Optimization
        OptionRule::pattern(r"^-O([0-3]|s|g|z|fast)?$", Category::CompilerFlags),
        // Debug info, language standard, target word size, code generation
        OptionRule::pattern(r"^-g(gdb|dwarf(-[2-5])?|[0-3])?$", Category::CompilerFlags),
        OptionRule::new(OptionMatcher::Prefix("-std="), Category::CompilerFlags),
        OptionRule::pattern(r"^-m(32|64)$", Category::CompilerFlags),
        OptionRule::pattern(r"^-f[a-zA-Z]", Category::CompilerFlags),
        OptionRule::new(OptionMatcher::Suffix(SOURCE_SUFFIXES), Category::Sources),
    ]
});

/// cl options. Both `/` and `-` spellings are accepted where cl accepts them.
///
/// https://learn.microsoft.com/en-us/cpp/build/reference/compiler-options-listed-by-category
static MSVC_RULES: LazyLock<Vec<OptionRule>> = LazyLock::new(|| {
    vec![
        OptionRule::new(OptionMatcher::GluedOrSeparate("/I"), Category::IncludeDirs),
        OptionRule::new(OptionMatcher::GluedOrSeparate("-I"), Category::IncludeDirs),
        OptionRule::new(OptionMatcher::GluedOrSeparate("/LIBPATH:"), Category::LibraryDirs),
        OptionRule::new(OptionMatcher::Suffix(&[".lib"]), Category::Libraries),
        OptionRule::new(OptionMatcher::GluedOrSeparate("/D"), Category::Definitions),
        OptionRule::new(OptionMatcher::GluedOrSeparate("-D"), Category::Definitions),
        // Warnings
        OptionRule::pattern(r"^[/-](W[0-4]|Wall|WX-?|w)$", Category::CompilerFlags),
        // Optimization
        OptionRule::pattern(r"^[/-]O([12dgistxy]|b[0-3])-?$", Category::CompilerFlags),
        // Debug info, language standard, exception model, runtime library
        OptionRule::pattern(r"^[/-]Z[7iI]$", Category::CompilerFlags),
        OptionRule::pattern(r"^[/-]std:\S+$", Category::CompilerFlags),
        OptionRule::pattern(r"^[/-]EH[asc-]+$", Category::CompilerFlags),
        OptionRule::pattern(r"^[/-]M[DT]d?$", Category::CompilerFlags),
        OptionRule::new(OptionMatcher::Suffix(SOURCE_SUFFIXES), Category::Sources),
    ]
});

/// link.exe options following `/link` on a cl command line.
///
/// Switches come before the `.lib` suffix so that `/IMPLIB:foo.lib` stays a switch.
///
/// https://learn.microsoft.com/en-us/cpp/build/reference/linker-options
static MSVC_LINK_RULES: LazyLock<Vec<OptionRule>> = LazyLock::new(|| {
    vec![
        OptionRule::new(OptionMatcher::GluedOrSeparate("/LIBPATH:"), Category::LibraryDirs),
        OptionRule::new(OptionMatcher::GluedOrSeparate("-LIBPATH:"), Category::LibraryDirs),
        OptionRule::pattern(r"^[/-]\S", Category::LinkerOptions),
        OptionRule::new(OptionMatcher::Suffix(&[".lib"]), Category::Libraries),
    ]
});
