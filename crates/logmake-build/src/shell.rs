//! Shell-word splitting for logged command lines.
//!
//! No expansion is performed: variables, globs and substitutions are kept
//! as literal text. Only quoting and escaping are interpreted.

use crate::error::TokenizeError;

/// How backslashes are treated when splitting a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    /// POSIX shell rules: a backslash escapes the next character.
    Posix,
    /// Windows command lines: backslashes are path separators and stay literal.
    Windows,
}

/// Split a command line into words.
///
/// Single- and double-quoted text becomes part of the current word with the
/// quotes removed, so `-I"/opt/my lib"` is the single word `-I/opt/my lib`.
/// Unquoted whitespace separates words. An empty pair of quotes yields an
/// empty word.
pub fn split_words(line: &str, dialect: ShellDialect) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut current = String::new();
    // Tracks whether `current` holds a word, which may legitimately be empty ("").
    let mut in_word = false;
    let mut chars = line.char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((_, ch)) => current.push(ch),
                        None => {
                            return Err(TokenizeError::UnterminatedQuote { quote: '\'', offset })
                        }
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) if dialect == ShellDialect::Posix => match chars.next() {
                            Some((_, esc @ ('"' | '\\' | '$' | '`'))) => current.push(esc),
                            Some((_, '\n')) => {}
                            Some((_, other)) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => {
                                return Err(TokenizeError::UnterminatedQuote { quote: '"', offset })
                            }
                        },
                        Some((_, ch)) => current.push(ch),
                        None => {
                            return Err(TokenizeError::UnterminatedQuote { quote: '"', offset })
                        }
                    }
                }
            }
            '\\' if dialect == ShellDialect::Posix => match chars.next() {
                // line continuation
                Some((_, '\n')) => {}
                Some((_, ch)) => {
                    in_word = true;
                    current.push(ch);
                }
                None => return Err(TokenizeError::TrailingEscape),
            },
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}
