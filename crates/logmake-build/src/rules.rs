//! Ordered option rules and the single-pass token classifier.
//!
//! A toolchain is described by a table of [`OptionRule`]s. Each token of a
//! command line is tested against the table in order and the first rule that
//! matches decides the token's [`Category`]. Tokens no rule matches are
//! recorded as [`Category::Unrecognized`].

use crate::record::{BuildRecord, Category};
use regex::Regex;
use tracing::trace;

/// How a rule recognizes a token and where the recorded value comes from.
#[derive(Debug)]
pub enum OptionMatcher {
    /// An option whose value is glued to it (`-Ipath`) or is the next token
    /// (`-I path`). Only the value is recorded.
    GluedOrSeparate(&'static str),
    /// A token starting with the prefix, recorded whole.
    Prefix(&'static str),
    /// A token equal to the literal, recorded whole.
    Exactly(&'static str),
    /// A token matching the regex, recorded whole.
    Pattern(Regex),
    /// A token ending with one of the suffixes, recorded whole.
    Suffix(&'static [&'static str]),
}

/// The outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// The value to record, absent when an option is missing its argument.
    pub value: Option<String>,
    /// How many tokens the match used up, including the option itself.
    pub consumed: usize,
}

impl RuleMatch {
    fn whole(token: &str) -> Self {
        Self {
            value: Some(token.to_string()),
            consumed: 1,
        }
    }
}

impl OptionMatcher {
    /// Test the first of `tokens` against this matcher.
    ///
    /// An empty slice never matches.
    pub fn apply(&self, tokens: &[String]) -> Option<RuleMatch> {
        let token = tokens.first()?.as_str();
        match self {
            OptionMatcher::GluedOrSeparate(prefix) => {
                let rest = token.strip_prefix(prefix)?;
                if !rest.is_empty() {
                    return Some(RuleMatch {
                        value: Some(rest.to_string()),
                        consumed: 1,
                    });
                }
                match tokens.get(1) {
                    Some(next) => Some(RuleMatch {
                        value: (!next.is_empty()).then(|| next.clone()),
                        consumed: 2,
                    }),
                    None => Some(RuleMatch {
                        value: None,
                        consumed: 1,
                    }),
                }
            }
            OptionMatcher::Prefix(prefix) => {
                token.starts_with(prefix).then(|| RuleMatch::whole(token))
            }
            OptionMatcher::Exactly(literal) => (token == *literal).then(|| RuleMatch::whole(token)),
            OptionMatcher::Pattern(regex) => regex.is_match(token).then(|| RuleMatch::whole(token)),
            OptionMatcher::Suffix(suffixes) => suffixes
                .iter()
                .any(|suffix| token.len() > suffix.len() && token.ends_with(suffix))
                .then(|| RuleMatch::whole(token)),
        }
    }
}

/// A matcher paired with the category its values are recorded under.
#[derive(Debug)]
pub struct OptionRule {
    pub matcher: OptionMatcher,
    pub category: Category,
}

impl OptionRule {
    pub fn new(matcher: OptionMatcher, category: Category) -> Self {
        Self { matcher, category }
    }

    /// Shorthand for a [`OptionMatcher::Pattern`] rule.
    ///
    /// Panics if `pattern` is not a valid regex; rule tables are static.
    pub fn pattern(pattern: &str, category: Category) -> Self {
        let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("invalid rule pattern {pattern}: {e}"));
        Self::new(OptionMatcher::Pattern(regex), category)
    }
}

/// Classify every token of one command line into `record`.
///
/// Empty tokens are ignored. A token that takes its value from the following
/// token consumes it, so the value is never classified on its own.
pub fn classify_tokens(rules: &[OptionRule], tokens: &[String], record: &mut BuildRecord) {
    let mut i = 0;
    while i < tokens.len() {
        let remaining = &tokens[i..];
        if remaining[0].is_empty() {
            i += 1;
            continue;
        }

        let (category, matched) = rules
            .iter()
            .find_map(|rule| rule.matcher.apply(remaining).map(|m| (rule.category, m)))
            .unwrap_or_else(|| (Category::Unrecognized, RuleMatch::whole(&remaining[0])));

        match matched.value {
            Some(value) => {
                trace!(%category, %value, "classified token");
                record.insert(category, value);
            }
            None => trace!(token = %remaining[0], "option without a value"),
        }
        i += matched.consumed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_glued_or_separate() {
        let matcher = OptionMatcher::GluedOrSeparate("-I");

        let glued = matcher.apply(&tokens(&["-I/usr/include", "x"])).unwrap();
        assert_eq!(glued.value.as_deref(), Some("/usr/include"));
        assert_eq!(glued.consumed, 1);

        let separate = matcher.apply(&tokens(&["-I", "/usr/include"])).unwrap();
        assert_eq!(separate.value.as_deref(), Some("/usr/include"));
        assert_eq!(separate.consumed, 2);

        let bare = matcher.apply(&tokens(&["-I"])).unwrap();
        assert_eq!(bare.value, None);
        assert_eq!(bare.consumed, 1);

        assert!(matcher.apply(&tokens(&["-L/lib"])).is_none());
        assert!(matcher.apply(&[]).is_none());
        assert!(OptionMatcher::Suffix(&[".cpp"]).apply(&[]).is_none());
    }

    #[test]
    fn test_whole_token_matchers() {
        let toks = tokens(&["-Wl,--as-needed"]);
        assert!(OptionMatcher::Prefix("-Wl,").apply(&toks).is_some());
        assert!(OptionMatcher::Exactly("-Wl").apply(&toks).is_none());

        let suffix = OptionMatcher::Suffix(&[".cpp", ".c"]);
        assert_eq!(
            suffix.apply(&tokens(&["src/main.cpp"])).unwrap().value.as_deref(),
            Some("src/main.cpp")
        );
        assert!(suffix.apply(&tokens(&[".cpp"])).is_none());
        assert!(suffix.apply(&tokens(&["main.o"])).is_none());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            OptionRule::new(OptionMatcher::Prefix("-Wl,"), Category::LinkerOptions),
            OptionRule::pattern(r"^-W\S+$", Category::CompilerFlags),
        ];
        let mut record = BuildRecord::new();
        classify_tokens(&rules, &tokens(&["-Wl,-rpath,/opt", "-Wextra", "main.o"]), &mut record);

        assert_eq!(record.to_vec(Category::LinkerOptions), vec!["-Wl,-rpath,/opt"]);
        assert_eq!(record.to_vec(Category::CompilerFlags), vec!["-Wextra"]);
        assert_eq!(record.to_vec(Category::Unrecognized), vec!["main.o"]);
    }

    #[test]
    fn test_separated_value_is_consumed() {
        let rules = vec![OptionRule::new(OptionMatcher::GluedOrSeparate("-L"), Category::LibraryDirs)];
        let mut record = BuildRecord::new();
        classify_tokens(&rules, &tokens(&["-L", "/opt/lib", "-L"]), &mut record);

        assert_eq!(record.to_vec(Category::LibraryDirs), vec!["/opt/lib"]);
        assert!(record.to_vec(Category::Unrecognized).is_empty());
    }

    #[test]
    fn test_empty_tokens_are_skipped() {
        let mut record = BuildRecord::new();
        classify_tokens(&[], &tokens(&["", "x", ""]), &mut record);
        assert_eq!(record.to_vec(Category::Unrecognized), vec!["x"]);
    }
}
