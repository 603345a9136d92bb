//! Build log to CMakeLists.txt conversion.
//!
//! This crate provides:
//! - Shell-word splitting of logged compiler command lines
//! - Per-toolchain option tables (`g++` and `cl`) and a single-pass classifier
//! - A log scanner aggregating options into a de-duplicated [`BuildRecord`]
//! - CMakeLists.txt generation from the aggregated record
//! - Generator configuration (`logmake.toml`)
//!
//! # Example
//!
//! ```
//! use logmake_build::{generate_cmake, scan_str, Category, GeneratorConfig};
//!
//! let record = scan_str("g++ -Wall -O2 -Imyinc -lfoo main.cpp\n");
//! assert_eq!(record.to_vec(Category::Sources), vec!["main.cpp"]);
//!
//! let cmake = generate_cmake(&record, &GeneratorConfig::default());
//! assert!(cmake.contains("include_directories(\n    myinc\n)"));
//! ```

mod cmake;
mod config;
mod error;
mod record;
mod rules;
mod scanner;
mod shell;
mod toolchain;

pub use cmake::{format_value, generate_cmake, write_cmake, BlockKind, BLOCKS};
pub use config::{GeneratorConfig, ProjectConfig};
pub use error::{BuildError, Result, TokenizeError};
pub use record::{BuildRecord, Category, ScanStats};
pub use rules::{classify_tokens, OptionMatcher, OptionRule, RuleMatch};
pub use scanner::{scan_log, scan_reader, scan_str};
pub use shell::{split_words, ShellDialect};
pub use toolchain::{Toolchain, SOURCE_SUFFIXES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_to_cmake() {
        let log = "\
[1/2] g++ -Wall -O2 -Imyinc -lfoo main.cpp
[2/2] g++ -Wall -I myinc -lbar util.cpp -I
";
        let record = scan_str(log);

        assert_eq!(record.to_vec(Category::CompilerFlags), vec!["-Wall", "-O2"]);
        assert_eq!(record.to_vec(Category::IncludeDirs), vec!["myinc"]);
        assert_eq!(record.to_vec(Category::Libraries), vec!["foo", "bar"]);
        assert_eq!(record.to_vec(Category::Sources), vec!["main.cpp", "util.cpp"]);
        assert!(record.to_vec(Category::Unrecognized).is_empty());

        let cmake = generate_cmake(&record, &GeneratorConfig::default());
        assert!(cmake.starts_with("cmake_minimum_required(VERSION 3.10)\nproject(MyProject)\n\n"));
        assert!(cmake.contains("target_link_libraries(MyExecutable\n    foo\n    bar\n)\n"));
        assert!(!cmake.contains("Unrecognized"));
    }
}
