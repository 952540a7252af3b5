//! Split a raw command line into tokens.
//!
//! The quoting rules follow the Microsoft C/C++ runtime (the same rules `CommandLineToArgvW` uses):
//! * Tokens are separated by runs of space or tab outside of quotes.
//! * `2n` backslashes followed by `"` produce `n` backslashes, and the `"` toggles quoting.
//! * `2n + 1` backslashes followed by `"` produce `n` backslashes and a literal `"`.
//! * Backslashes anywhere else are literal.
//!
//! ```
//! # use argvgram_engine as argvgram;
//! use argvgram::split;
//!
//! let tokens: Vec<String> = split(r#"copy "my file.txt" a\\\"b C:\dir\"#).collect();
//! assert_eq!(tokens, vec!["copy", "my file.txt", r#"a\"b"#, r"C:\dir\"]);
//! ```

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';

/// Split `line` into command line tokens.
///
/// The result is lazy; tokens are produced as the iterator advances.
/// A clone replays the remaining tokens from the same position.
pub fn split(line: &str) -> Split<'_> {
    Split::new(line)
}

/// The token iterator produced by [`split`].
#[derive(Debug, Clone)]
pub struct Split<'a> {
    line: &'a str,
    position: usize,
}

impl<'a> Split<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, position: 0 }
    }

    fn byte(&self) -> Option<u8> {
        self.line.as_bytes().get(self.position).copied()
    }

    fn skip_blanks(&mut self) {
        while let Some(b' ' | b'\t') = self.byte() {
            self.position += 1;
        }
    }

    // All the special characters are ascii, so every boundary we slice at is a char boundary.
    fn read_token(&mut self) -> String {
        let bytes = self.line.as_bytes();
        let mut token = String::default();
        let mut quoted = false;
        let mut segment_start = self.position;

        while self.position < bytes.len() {
            match bytes[self.position] {
                b' ' | b'\t' if !quoted => break,
                QUOTE => {
                    token.push_str(&self.line[segment_start..self.position]);
                    self.position += 1;
                    segment_start = self.position;
                    quoted = !quoted;
                }
                BACKSLASH => {
                    token.push_str(&self.line[segment_start..self.position]);
                    let run_start = self.position;

                    while self.position < bytes.len() && bytes[self.position] == BACKSLASH {
                        self.position += 1;
                    }

                    let run = self.position - run_start;

                    if self.byte() == Some(QUOTE) {
                        push_backslashes(&mut token, run / 2);
                        self.position += 1;

                        if run % 2 == 1 {
                            token.push('"');
                        } else {
                            quoted = !quoted;
                        }
                    } else {
                        push_backslashes(&mut token, run);
                    }

                    segment_start = self.position;
                }
                _ => {
                    self.position += 1;
                }
            }
        }

        token.push_str(&self.line[segment_start..self.position]);
        token
    }
}

fn push_backslashes(token: &mut String, count: usize) {
    token.extend(std::iter::repeat('\\').take(count));
}

impl<'a> Iterator for Split<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_blanks();

        if self.position >= self.line.len() {
            return None;
        }

        let token = self.read_token();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Split token '{token}', resuming at byte {}.", self.position);
        }

        Some(token)
    }
}

impl<'a> std::iter::FusedIterator for Split<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn tokens(line: &str) -> Vec<String> {
        split(line).collect()
    }

    #[rstest]
    #[case("", vec![])]
    #[case(" \t  ", vec![])]
    #[case("a", vec!["a"])]
    #[case(" a", vec!["a"])]
    #[case("a ", vec!["a"])]
    #[case("a  \t b", vec!["a", "b"])]
    #[case(r"a\", vec![r"a\"])]
    #[case(r#"a\""#, vec![r#"a""#])]
    #[case(r#"a\" b"#, vec![r#"a""#, "b"])]
    #[case(r#"a \"b"#, vec!["a", r#""b"#])]
    #[case(r#""""#, vec![""])]
    #[case(r#"a "" b"#, vec!["a", "", "b"])]
    #[case(r#""unterminated quote"#, vec!["unterminated quote"])]
    #[case("日本 語", vec!["日本", "語"])]
    fn split_basic(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tokens(line), expected);
    }

    #[rstest]
    #[case(r#""a b c" d e"#, vec!["a b c", "d", "e"])]
    #[case(r#""abc" d e"#, vec!["abc", "d", "e"])]
    #[case(r#"a\\b d"e f"g h"#, vec![r"a\\b", "de fg", "h"])]
    #[case(r#"a\\\"b c d"#, vec![r#"a\"b"#, "c", "d"])]
    #[case(r#"a\\\\"b c" d e"#, vec![r"a\\b c", "d", "e"])]
    #[case(r#""ab\"c" "\\" d"#, vec![r#"ab"c"#, r"\", "d"])]
    #[case(r#"a\\\b d"e f"g h"#, vec![r"a\\\b", "de fg", "h"])]
    fn split_microsoft_examples(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tokens(line), expected);
    }

    #[test]
    fn split_escaped_quote() {
        // One backslash before a quote: escaped quote, no backslash survives.
        assert_eq!(tokens("a\\\"b"), vec!["a\"b"]);
        // Two backslashes, no quote following: untouched.
        assert_eq!(tokens("a\\\\b"), vec!["a\\\\b"]);
    }

    #[test]
    fn split_backslash_parity() {
        for n in 0..16 {
            let even = format!("x{}\"y z\"", "\\".repeat(2 * n));
            assert_eq!(tokens(&even), vec![format!("x{}y z", "\\".repeat(n))]);

            let odd = format!("x{}\"y z", "\\".repeat(2 * n + 1));
            assert_eq!(
                tokens(&odd),
                vec![format!("x{}\"y", "\\".repeat(n)), "z".to_string()]
            );
        }
    }

    #[test]
    fn split_join_clean_tokens() {
        for _ in 0..100 {
            let count = thread_rng().gen_range(0..10);
            let expected: Vec<String> = (0..count)
                .map(|_| {
                    let length = thread_rng().gen_range(1..12);
                    thread_rng()
                        .sample_iter(&Alphanumeric)
                        .take(length)
                        .map(char::from)
                        .collect()
                })
                .collect();

            assert_eq!(tokens(&expected.join(" ")), expected);
        }
    }

    #[test]
    fn split_restartable() {
        let mut split = split("a b c");
        assert_eq!(split.next(), Some("a".to_string()));
        let fork = split.clone();
        assert_eq!(split.collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(fork.collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn split_fused() {
        let mut split = split("a");
        assert_eq!(split.next(), Some("a".to_string()));
        assert_eq!(split.next(), None);
        assert_eq!(split.next(), None);
    }
}
