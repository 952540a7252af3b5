//! Derive Api for `argvgram` configuration.
//!
//! ### Getting Started
//! Use the derive Api by instrumenting a struct `S` with `#[derive(Destination)]`.
//! This will implement [`Destination`](crate::prelude::Destination) for `S`, so that `S` may be parsed into via any [`Grammar`](crate::Grammar).
//! Only the fields carrying an `#[argv(..)]` attribute are bound; the rest are left untouched.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_transfer_d.rs")]
//! ```
//!
//! ### Slot Configuration
//! * `#[argv(short = C)]` and/or `#[argv(long = "NAME")]` bind an option slot.
//! `C` must be a char value (ex: `'c'`).
//! * `#[argv(operand = N)]` binds the operand slot at position `N` (starting from 0).
//! * `#[argv(rest)]` binds the rest slot.
//! The field must be a `Vec`, `VecDeque`, `LinkedList`, `HashSet`, or `BTreeSet` of `String`; any other type fails the parse once a surplus operand arrives.
//! * `#[argv(command = ("NAME", S))]` binds a sub-command slot, which parses the remaining tokens into a default `S`.
//! Repeat the attribute to bind several sub-commands to the same field.
//! The field is assigned via `From<S>`, wrapped in `Some(..)` for `Option<..>` fields.
//! * `#[argv(converter = EXPR)]` overrides the [`Converter`](crate::prelude::Converter) of an option/operand slot.
//!
//! The field binding is inferred from the field type:
//! ```console
//! Type        | Option slot            | Operand slot
//! ----------------------------------------------------------
//! bool        | Switch::new(.., true)  | Scalar::new(..)
//! Option<T>   | Optional::new(..)      | Optional::new(..)
//! T           | Scalar::new(..)        | Scalar::new(..)
//! ```
//!
//! A partial example of these rules is provided as follows:
//! ```
//! use argvgram::derive::*;
//! use argvgram::prelude::*;
//! use argvgram::Grammar;
//!
//! #[derive(Debug, Default, PartialEq, Destination)]
//! struct Add {
//!     #[argv(short = 'f')]
//!     force: bool,
//!     #[argv(rest)]
//!     paths: Vec<String>,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Destination)]
//! struct Tool {
//!     #[argv(short = 'v', long = "verbose")]
//!     verbose: bool,
//!     #[argv(long = "level", converter = |token: &str| token.parse::<u8>().map(|l| l.min(3)))]
//!     level: u8,
//!     #[argv(command = ("add", Add))]
//!     add: Option<Add>,
//! }
//!
//! let grammar = Grammar::builder()
//!     .short_prefix("-")
//!     .long_prefix("--")
//!     .long_options(true)
//!     .sub_commands(true)
//!     .build()
//!     .unwrap();
//! let tool: Tool = grammar.parse_line_into("-v --level 9 add -f a b").unwrap();
//! assert_eq!(
//!     tool,
//!     Tool {
//!         verbose: true,
//!         level: 3,
//!         add: Some(Add {
//!             force: true,
//!             paths: vec!["a".to_string(), "b".to_string()],
//!         }),
//!     }
//! );
//! ```
pub use argvgram_derive::*;
