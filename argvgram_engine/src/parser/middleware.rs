use std::env;
use std::ffi::OsString;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::grammar::Grammar;
use crate::parser::machine::ParseState;
use crate::parser::ParseError;
use crate::prelude::Destination;
use crate::tokenizer::split;

impl Grammar {
    /// Parse `tokens` into `destination`.
    ///
    /// On failure, the parse stops immediately; changes already made to `destination` are kept.
    ///
    /// ### Example
    /// ```
    /// # use argvgram_engine as argvgram;
    /// use argvgram::prelude::*;
    /// use argvgram::{Catalog, Grammar, OptionSlot, Scalar};
    ///
    /// #[derive(Debug, Default)]
    /// struct Args {
    ///     count: u32,
    /// }
    ///
    /// impl Destination for Args {
    ///     fn catalog() -> Catalog<Self> {
    ///         Catalog::new().option(OptionSlot::new(Scalar::new(|d: &mut Args| &mut d.count)).short('c'))
    ///     }
    /// }
    ///
    /// let mut args = Args::default();
    /// Grammar::posix().parse(&mut args, &["-c", "3"]).unwrap();
    /// assert_eq!(args.count, 3);
    /// ```
    pub fn parse<D, S>(&self, destination: &mut D, tokens: &[S]) -> Result<(), ParseError>
    where
        D: Destination,
        S: AsRef<str>,
    {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Parsing {n} tokens into {d}.",
                n = tokens.len(),
                d = std::any::type_name::<D>()
            );
        }

        ParseState::new(self, destination)?.consume(&tokens)
    }

    /// Parse `tokens` into a default constructed destination.
    pub fn parse_into<D, S>(&self, tokens: &[S]) -> Result<D, ParseError>
    where
        D: Destination + Default,
        S: AsRef<str>,
    {
        let mut destination = D::default();
        self.parse(&mut destination, tokens)?;
        Ok(destination)
    }

    /// Split a raw command `line` (see [`split`]), and parse the tokens into `destination`.
    pub fn parse_line<D>(&self, destination: &mut D, line: &str) -> Result<(), ParseError>
    where
        D: Destination,
    {
        let tokens: Vec<String> = split(line).collect();
        self.parse(destination, &tokens)
    }

    /// Split a raw command `line` (see [`split`]), and parse the tokens into a default constructed destination.
    pub fn parse_line_into<D>(&self, line: &str) -> Result<D, ParseError>
    where
        D: Destination + Default,
    {
        let mut destination = D::default();
        self.parse_line(&mut destination, line)?;
        Ok(destination)
    }

    /// Parse operating system strings into `destination`.
    ///
    /// Every token must be valid unicode, otherwise the parse fails before any token is consumed.
    pub fn parse_os<D, I>(&self, destination: &mut D, tokens: I) -> Result<(), ParseError>
    where
        D: Destination,
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                token.into().into_string().map_err(|invalid| {
                    ParseError::InvalidInput(format!(
                        "token #{index} '{t}' is not valid unicode",
                        t = invalid.to_string_lossy()
                    ))
                })
            })
            .collect::<Result<Vec<String>, ParseError>>()?;
        self.parse(destination, &tokens)
    }

    /// Parse the program's command line arguments (without the program name) into a default constructed destination.
    pub fn parse_env<D>(&self) -> Result<D, ParseError>
    where
        D: Destination + Default,
    {
        let mut destination = D::default();
        self.parse_os(&mut destination, env::args_os().skip(1))?;
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::test::*;

    #[test]
    fn parse_strings() {
        // Setup
        let tokens = vec!["-s".to_string(), "a b".to_string(), "c".to_string()];
        let mut input = Input::default();

        // Execute
        Grammar::posix().parse(&mut input, &tokens).unwrap();

        // Verify
        assert_eq!(input.string, "a b");
        assert_eq!(input.first, "c");
    }

    #[test]
    fn parse_into() {
        let input: Input = Grammar::gnu().parse_into(&["c", "--int", "4"]).unwrap();
        assert_eq!(input.first, "c");
        assert_eq!(input.integer, 4);
    }

    #[test]
    fn parse_into_empty() {
        let input: Input = Grammar::gnu().parse_into::<Input, &str>(&[]).unwrap();
        assert_eq!(input, Input::default());
    }

    #[test]
    fn parse_line() {
        // Setup
        let mut input = Input::default();

        // Execute
        Grammar::posix()
            .parse_line(&mut input, r#"-s "a b" -bv c:\dir\ 7 a\"b"#)
            .unwrap();

        // Verify
        assert_eq!(input.string, "a b");
        assert!(input.boolean);
        assert!(input.verbose);
        assert_eq!(input.first, r"c:\dir\");
        assert_eq!(input.second, Some(7));
        assert_eq!(input.rest, vec![r#"a"b"#]);
    }

    #[test]
    fn parse_line_escapes() {
        let input: Input = Grammar::gnu()
            .parse_line_into(r#"a\"b 2 a\\b "x \"y\" z""#)
            .unwrap();
        assert_eq!(input.first, r#"a"b"#);
        assert_eq!(input.second, Some(2));
        assert_eq!(input.rest, vec![r"a\\b", r#"x "y" z"#]);
    }

    #[test]
    fn parse_line_failure() {
        let error = Grammar::gnu().parse_line_into::<Input>("-i ten").unwrap_err();
        assert_matches!(error, ParseError::Conversion { raw, .. } => {
            assert_eq!(raw, "ten");
        });
    }

    #[test]
    fn parse_os() {
        let mut input = Input::default();
        Grammar::gnu()
            .parse_os(&mut input, vec![OsString::from("-b"), OsString::from("x")])
            .unwrap();
        assert!(input.boolean);
        assert_eq!(input.first, "x");
    }

    #[cfg(unix)]
    #[test]
    fn parse_os_invalid() {
        use std::os::unix::ffi::OsStringExt;

        // Setup
        let mut input = Input::default();
        let tokens = vec![
            OsString::from("-b"),
            OsString::from_vec(vec![b'a', 0xff, b'b']),
        ];

        // Execute
        let error = Grammar::gnu().parse_os(&mut input, tokens).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::InvalidInput(message) => {
            assert_eq!(message, "token #1 'a\u{FFFD}b' is not valid unicode");
        });
        assert!(!input.boolean);
    }
}
