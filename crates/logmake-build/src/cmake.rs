//! CMakeLists.txt generation.
//!
//! The document is a fixed header followed by one block per non-empty
//! category of the [`BuildRecord`]. Blocks always appear in the order of
//! [`BLOCKS`], whatever order the categories were populated in.

use crate::config::GeneratorConfig;
use crate::error::{BuildError, Result};
use crate::record::{BuildRecord, Category};
use std::path::Path;

/// How a block is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A directory-wide command: `include_directories(`.
    Command(&'static str),
    /// A command taking the executable target first: `add_executable(app`.
    TargetCommand(&'static str),
    /// A comment listing values CMake has no place for.
    Comment(&'static str),
}

/// Canonical block order.
pub const BLOCKS: [(Category, BlockKind); 8] = [
    (Category::IncludeDirs, BlockKind::Command("include_directories")),
    (Category::Definitions, BlockKind::Command("add_compile_definitions")),
    (Category::CompilerFlags, BlockKind::Command("add_compile_options")),
    (Category::LibraryDirs, BlockKind::Command("link_directories")),
    (Category::LinkerOptions, BlockKind::Command("add_link_options")),
    (Category::Sources, BlockKind::TargetCommand("add_executable")),
    (Category::Libraries, BlockKind::TargetCommand("target_link_libraries")),
    (Category::Unrecognized, BlockKind::Comment("Unrecognized options:")),
];

const INDENT: &str = "    ";

/// Quote a value for use as a CMake argument.
///
/// Embedded double quotes are escaped; values containing a space are wrapped
/// in double quotes.
pub fn format_value(value: &str) -> String {
    let escaped = value.replace('"', "\\\"");
    if escaped.contains(' ') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// Render the CMakeLists.txt content for `record`.
pub fn generate_cmake(record: &BuildRecord, config: &GeneratorConfig) -> String {
    let project = &config.project;
    let mut out = String::new();

    out.push_str(&format!(
        "cmake_minimum_required(VERSION {})\n",
        project.cmake_minimum_version
    ));
    out.push_str(&format!("project({})\n\n", format_value(&project.name)));

    for (category, kind) in BLOCKS {
        if record.len(category) == 0 {
            continue;
        }

        match kind {
            BlockKind::Command(command) => {
                out.push_str(&format!("{}(\n", command));
                for value in record.values(category) {
                    out.push_str(&format!("{}{}\n", INDENT, format_value(value)));
                }
                out.push_str(")\n");
            }
            BlockKind::TargetCommand(command) => {
                out.push_str(&format!("{}({}\n", command, format_value(&project.target)));
                for value in record.values(category) {
                    out.push_str(&format!("{}{}\n", INDENT, format_value(value)));
                }
                out.push_str(")\n");
            }
            BlockKind::Comment(heading) => {
                out.push_str(&format!("# {}\n", heading));
                for value in record.values(category) {
                    out.push_str(&format!("#{}{}\n", INDENT, format_value(value)));
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Write generated content to `path`, replacing anything already there.
pub fn write_cmake(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| BuildError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_str;

    const HEADER: &str = "cmake_minimum_required(VERSION 3.10)\nproject(MyProject)\n\n";

    #[test]
    fn test_empty_record_renders_header_only() {
        let content = generate_cmake(&BuildRecord::new(), &GeneratorConfig::default());
        assert_eq!(content, HEADER);
    }

    #[test]
    fn test_no_invocations_renders_header_only() {
        let record = scan_str("checking whether the C compiler works... yes\n");
        assert_eq!(generate_cmake(&record, &GeneratorConfig::default()), HEADER);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value("/usr/include"), "/usr/include");
        assert_eq!(format_value("/opt/my sdk"), "\"/opt/my sdk\"");
        assert_eq!(format_value(r#"MSG="hi""#), r#"MSG=\"hi\""#);
        assert_eq!(format_value(r#"MSG="hi there""#), r#""MSG=\"hi there\"""#);
    }

    #[test]
    fn test_comment_values_are_escaped() {
        let mut record = BuildRecord::new();
        record.insert(Category::Unrecognized, r#"-o"x"#);
        record.insert(Category::Unrecognized, "--name=a b");

        let content = generate_cmake(&record, &GeneratorConfig::default());
        assert!(content.ends_with(
            "# Unrecognized options:\n#     -o\\\"x\n#     \"--name=a b\"\n\n"
        ));
    }

    #[test]
    fn test_full_document() {
        let record = scan_str(
            "g++ -Wall -O2 -Imyinc -I\"/opt/my sdk\" -DNDEBUG -c main.cpp\n\
             g++ main.o -L/opt/lib -lfoo -Wl,--as-needed -o app\n",
        );
        let config = GeneratorConfig::default().with_project_name("demo").with_target("app");

        insta::assert_snapshot!(generate_cmake(&record, &config), @r#"
        cmake_minimum_required(VERSION 3.10)
        project(demo)

        include_directories(
            myinc
            "/opt/my sdk"
        )

        add_compile_definitions(
            NDEBUG
        )

        add_compile_options(
            -Wall
            -O2
        )

        link_directories(
            /opt/lib
        )

        add_link_options(
            -Wl,--as-needed
        )

        add_executable(app
            main.cpp
        )

        target_link_libraries(app
            foo
        )

        # Unrecognized options:
        #     -c
        #     main.o
        #     -o
        #     app
        "#);
    }

    #[test]
    fn test_blocks_follow_canonical_order() {
        // Populate in reverse canonical order.
        let mut record = BuildRecord::new();
        record.insert(Category::Libraries, "m");
        record.insert(Category::Sources, "b.cpp");
        record.insert(Category::CompilerFlags, "-O1");
        record.insert(Category::IncludeDirs, "inc");

        let content = generate_cmake(&record, &GeneratorConfig::default());
        let openers: Vec<&str> = content
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with(' ') && *line != ")")
            .skip(2)
            .collect();

        assert_eq!(
            openers,
            vec![
                "include_directories(",
                "add_compile_options(",
                "add_executable(MyExecutable",
                "target_link_libraries(MyExecutable",
            ]
        );
    }

    #[test]
    fn test_block_count_matches_populated_categories() {
        let mut record = BuildRecord::new();
        for (n, category) in Category::ALL.into_iter().enumerate() {
            record.insert(category, format!("value{}", n));

            let content = generate_cmake(&record, &GeneratorConfig::default());
            let blocks = content.split("\n\n").filter(|block| !block.trim().is_empty()).count();
            // The header is one block of its own.
            assert_eq!(blocks, record.populated().count() + 1);
        }
    }

    #[test]
    fn test_write_cmake() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CMakeLists.txt");
        std::fs::write(&path, "stale content that is longer than the header\n".repeat(4)).unwrap();

        write_cmake(&path, HEADER).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), HEADER);

        let unwritable = dir.path().join("no-such-dir").join("CMakeLists.txt");
        assert!(matches!(
            write_cmake(&unwritable, HEADER),
            Err(BuildError::WriteOutput { .. })
        ));
    }
}
