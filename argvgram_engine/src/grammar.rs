use std::sync::OnceLock;

use crate::parser::ConfigError;

static POSIX: OnceLock<Grammar> = OnceLock::new();
static GNU: OnceLock<Grammar> = OnceLock::new();
static WINDOWS: OnceLock<Grammar> = OnceLock::new();

/// The grammar with which to classify command line tokens.
///
/// A `Grammar` is immutable once built, and may be shared freely across parses (and threads).
/// Use one of the presets ([`Grammar::posix`], [`Grammar::gnu`], [`Grammar::windows`]), or configure a custom grammar via [`Grammar::builder`].
///
/// ### Example
/// ```
/// # use argvgram_engine as argvgram;
/// use argvgram::Grammar;
///
/// let grammar = Grammar::builder()
///     .short_prefix("-")
///     .long_prefix("--")
///     .long_options(true)
///     .assign_character('=')
///     .build()
///     .unwrap();
///
/// assert!(grammar.long_option_enabled());
/// assert_eq!(grammar.long_option_assign_characters(), &['=']);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grammar {
    long_option_enabled: bool,
    non_separated_short_argument_enabled: bool,
    intermixed_operands_enabled: bool,
    combined_short_flags_enabled: bool,
    sub_command_enabled: bool,
    short_option_prefixes: Vec<String>,
    long_option_prefixes: Vec<String>,
    operand_delimiters: Vec<String>,
    long_option_assign_characters: Vec<char>,
}

impl Grammar {
    /// Start configuring a custom grammar.
    /// Every switch starts disabled, and every set starts empty.
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// The POSIX `getopt` convention.
    ///
    /// Short options only (`-a`), combinable (`-abc`), with attached arguments (`-ofile`).
    /// The first operand ends option processing.
    pub fn posix() -> &'static Grammar {
        POSIX.get_or_init(|| Grammar {
            long_option_enabled: false,
            non_separated_short_argument_enabled: true,
            intermixed_operands_enabled: false,
            combined_short_flags_enabled: true,
            sub_command_enabled: false,
            short_option_prefixes: vec!["-".to_string()],
            long_option_prefixes: vec!["--".to_string()],
            operand_delimiters: Vec::default(),
            long_option_assign_characters: Vec::default(),
        })
    }

    /// The GNU `getopt_long` convention.
    ///
    /// POSIX short options, plus long options (`--output file`, `--output=file`), intermixed operands, and the `--` delimiter.
    pub fn gnu() -> &'static Grammar {
        GNU.get_or_init(|| Grammar {
            long_option_enabled: true,
            non_separated_short_argument_enabled: true,
            intermixed_operands_enabled: true,
            combined_short_flags_enabled: true,
            sub_command_enabled: false,
            short_option_prefixes: vec!["-".to_string()],
            long_option_prefixes: vec!["--".to_string()],
            operand_delimiters: vec!["--".to_string()],
            long_option_assign_characters: vec!['='],
        })
    }

    /// The Windows `/flag` convention.
    ///
    /// Both short and long options use the `/` prefix.
    /// Short options cannot be combined, and their arguments must be a separate token.
    pub fn windows() -> &'static Grammar {
        WINDOWS.get_or_init(|| Grammar {
            long_option_enabled: true,
            non_separated_short_argument_enabled: false,
            intermixed_operands_enabled: true,
            combined_short_flags_enabled: false,
            sub_command_enabled: false,
            short_option_prefixes: vec!["/".to_string()],
            long_option_prefixes: vec!["/".to_string()],
            operand_delimiters: Vec::default(),
            long_option_assign_characters: Vec::default(),
        })
    }

    /// Whether long options (ex: `--output`) are recognized.
    pub fn long_option_enabled(&self) -> bool {
        self.long_option_enabled
    }

    /// Whether a short option argument may be attached to its option (ex: `-ofile`).
    pub fn non_separated_short_argument_enabled(&self) -> bool {
        self.non_separated_short_argument_enabled
    }

    /// Whether options and operands may interleave.
    /// When disabled, the first operand turns every later token into an operand.
    pub fn intermixed_operands_enabled(&self) -> bool {
        self.intermixed_operands_enabled
    }

    /// Whether several flag options may share one token (ex: `-bv`).
    pub fn combined_short_flags_enabled(&self) -> bool {
        self.combined_short_flags_enabled
    }

    /// Whether sub-command names are recognized.
    pub fn sub_command_enabled(&self) -> bool {
        self.sub_command_enabled
    }

    /// The prefixes which introduce a short option.
    pub fn short_option_prefixes(&self) -> &[String] {
        &self.short_option_prefixes
    }

    /// The prefixes which introduce a long option.
    pub fn long_option_prefixes(&self) -> &[String] {
        &self.long_option_prefixes
    }

    /// The tokens which end option processing.
    pub fn operand_delimiters(&self) -> &[String] {
        &self.operand_delimiters
    }

    /// The characters which attach an argument to a long option (ex: `=` in `--output=file`).
    pub fn long_option_assign_characters(&self) -> &[char] {
        &self.long_option_assign_characters
    }

    pub(crate) fn is_operand_delimiter(&self, token: &str) -> bool {
        self.operand_delimiters.iter().any(|d| d == token)
    }

    /// The body of a short option token, if `token` has that shape.
    pub(crate) fn short_body<'t>(&self, token: &'t str) -> Option<&'t str> {
        strip_longest(&self.short_option_prefixes, token)
    }

    /// The body of a long option token, if long options are enabled and `token` has that shape.
    pub(crate) fn long_body<'t>(&self, token: &'t str) -> Option<&'t str> {
        if self.long_option_enabled {
            strip_longest(&self.long_option_prefixes, token)
        } else {
            None
        }
    }
}

// The body must be non-empty; a bare prefix (ex: `-`) is not an option.
fn strip_longest<'t>(prefixes: &[String], token: &'t str) -> Option<&'t str> {
    prefixes
        .iter()
        .filter(|prefix| token.starts_with(prefix.as_str()))
        .max_by_key(|prefix| prefix.len())
        .map(|prefix| &token[prefix.len()..])
        .filter(|body| !body.is_empty())
}

/// Configure a custom [`Grammar`].
///
/// Start from scratch with [`Grammar::builder`], or from an existing grammar via `GrammarBuilder::from`.
///
/// ### Example
/// ```
/// # use argvgram_engine as argvgram;
/// use argvgram::{Grammar, GrammarBuilder};
///
/// let grammar = GrammarBuilder::from(Grammar::gnu())
///     .sub_commands(true)
///     .build()
///     .unwrap();
///
/// assert!(grammar.sub_command_enabled());
/// assert!(!Grammar::gnu().sub_command_enabled());
/// ```
#[derive(Debug, Default, Clone)]
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl From<&Grammar> for GrammarBuilder {
    fn from(value: &Grammar) -> Self {
        Self {
            grammar: value.clone(),
        }
    }
}

impl GrammarBuilder {
    /// Enable/disable long options.
    pub fn long_options(mut self, enabled: bool) -> Self {
        self.grammar.long_option_enabled = enabled;
        self
    }

    /// Enable/disable attached short option arguments (ex: `-ofile`).
    pub fn non_separated_short_arguments(mut self, enabled: bool) -> Self {
        self.grammar.non_separated_short_argument_enabled = enabled;
        self
    }

    /// Enable/disable interleaving of options and operands.
    pub fn intermixed_operands(mut self, enabled: bool) -> Self {
        self.grammar.intermixed_operands_enabled = enabled;
        self
    }

    /// Enable/disable combined flag tokens (ex: `-bv`).
    pub fn combined_short_flags(mut self, enabled: bool) -> Self {
        self.grammar.combined_short_flags_enabled = enabled;
        self
    }

    /// Enable/disable sub-commands.
    pub fn sub_commands(mut self, enabled: bool) -> Self {
        self.grammar.sub_command_enabled = enabled;
        self
    }

    /// Add a short option prefix.
    /// Repeats are ignored.
    pub fn short_prefix(mut self, prefix: impl Into<String>) -> Self {
        insert_unique(&mut self.grammar.short_option_prefixes, prefix.into());
        self
    }

    /// Add a long option prefix.
    /// Repeats are ignored.
    pub fn long_prefix(mut self, prefix: impl Into<String>) -> Self {
        insert_unique(&mut self.grammar.long_option_prefixes, prefix.into());
        self
    }

    /// Add an operand delimiter.
    /// Repeats are ignored.
    pub fn operand_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        insert_unique(&mut self.grammar.operand_delimiters, delimiter.into());
        self
    }

    /// Add a long option assign character.
    /// Repeats are ignored.
    pub fn assign_character(mut self, character: char) -> Self {
        insert_unique(&mut self.grammar.long_option_assign_characters, character);
        self
    }

    /// Remove every short option prefix.
    pub fn clear_short_prefixes(mut self) -> Self {
        self.grammar.short_option_prefixes.clear();
        self
    }

    /// Remove every long option prefix.
    pub fn clear_long_prefixes(mut self) -> Self {
        self.grammar.long_option_prefixes.clear();
        self
    }

    /// Remove every operand delimiter.
    pub fn clear_operand_delimiters(mut self) -> Self {
        self.grammar.operand_delimiters.clear();
        self
    }

    /// Remove every long option assign character.
    pub fn clear_assign_characters(mut self) -> Self {
        self.grammar.long_option_assign_characters.clear();
        self
    }

    /// Build the grammar.
    /// This finalizes the configuration and checks for errors (ex: an empty prefix).
    pub fn build(self) -> Result<Grammar, ConfigError> {
        let grammar = self.grammar;
        reject_empty("short option prefix", &grammar.short_option_prefixes)?;
        reject_empty("long option prefix", &grammar.long_option_prefixes)?;
        reject_empty("operand delimiter", &grammar.operand_delimiters)?;
        Ok(grammar)
    }
}

fn insert_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn reject_empty(context: &str, items: &[String]) -> Result<(), ConfigError> {
    if items.iter().any(String::is_empty) {
        Err(ConfigError(format!("The {context} cannot be empty.")))
    } else {
        Ok(())
    }
}
