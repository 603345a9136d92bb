//! Build log scanning.
//!
//! Reads a log line by line, hands each line that names a known toolchain to
//! that toolchain's classifier, and aggregates everything into one
//! [`BuildRecord`].

use crate::error::{BuildError, Result};
use crate::record::BuildRecord;
use crate::toolchain::Toolchain;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Scan the build log at `path`.
///
/// The file is read as UTF-8. Any failure to open or read it aborts the scan
/// and no record is returned.
pub fn scan_log(path: &Path) -> Result<BuildRecord> {
    let file = File::open(path).map_err(|source| BuildError::ReadLog {
        path: path.to_path_buf(),
        source,
    })?;

    scan_reader(BufReader::new(file)).map_err(|source| BuildError::ReadLog {
        path: path.to_path_buf(),
        source,
    })
}

/// Scan a build log from any buffered reader.
///
/// Lines without a recognized invocation marker are ignored. Lines whose
/// quoting is malformed are skipped with a warning; scanning continues.
pub fn scan_reader<R: BufRead>(reader: R) -> std::io::Result<BuildRecord> {
    let mut record = BuildRecord::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        record.stats_mut().lines_read += 1;

        let Some(toolchain) = Toolchain::detect(&line) else {
            continue;
        };

        match toolchain {
            Toolchain::Gnu => record.stats_mut().gnu_lines += 1,
            Toolchain::Msvc => record.stats_mut().msvc_lines += 1,
        }

        debug!(line = line_number, ?toolchain, "compiler invocation");
        if let Err(e) = toolchain.classify_line(&line, &mut record) {
            warn!(line = line_number, "skipping line: {}", e);
            record.stats_mut().skipped_lines += 1;
        }
    }

    Ok(record)
}

/// Scan an in-memory log.
pub fn scan_str(log: &str) -> BuildRecord {
    // Reading valid UTF-8 from memory cannot fail.
    scan_reader(log.as_bytes()).unwrap_or_default()
}
