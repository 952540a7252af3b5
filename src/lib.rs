//! `argvgram` is a configurable command line parsing engine for Rust.
//!
//! Command line conventions differ between platforms and tool families.
//! Rather than pick one, `argvgram` parses according to a [`Grammar`], which describes the convention to follow.
//! Three grammars are provided out of the box:
//! * [`Grammar::posix`]: the POSIX `getopt` convention (`-a`, `-abc`, `-ofile`; the first operand ends option processing).
//! * [`Grammar::gnu`]: the GNU `getopt_long` convention (POSIX, plus `--output file`, `--output=file`, intermixed operands, and the `--` delimiter).
//! * [`Grammar::windows`]: the Windows `/flag` convention (`/a`, `/output file`).
//!
//! Custom grammars are configured via [`Grammar::builder`], or by starting from a preset with [`GrammarBuilder::from`].
//!
//! # Usage
//! This page includes a demo on using `argvgram`.
//! More examples are outlined in [the source](https://github.com/argvgram/argvgram/tree/main/demos).
//!
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/demo_transfer_d.rs")]
//! ```
//! or equivalently via builder Api (this page):
//! ```no_run
#![doc = include_str!("../demos/demo_transfer_b.rs")]
//! ```
//!
//! Both of these generate the same Cli program:
//! ```console
//! $ demo_transfer -r --buffer=4096 a.txt b/ c/
//! Transfer { recursive: true, buffer: Some(4096), source: "a.txt", targets: ["b/", "c/"] }
//!
//! $ demo_transfer -b big a.txt
//! Parse error: option 'buffer' cannot convert 'big' - expected usize, invalid digit found in string.
//!
//! $ demo_transfer -x a.txt
//! Parse error: unknown option 'x'.
//! ```
//!
//! # Derive Api
//! We recommend using the [derive Api](./derive/index.html) to declare your destination.
//! The next section explains the structure and semantics of `argvgram` using the builder Api, which applies to both builder and derive Apis.
//!
//! # Builder Api
//! A destination is any type implementing [`Destination`](prelude::Destination).
//! Its [`Catalog`] binds fields of the destination to *slots*:
//! * [`OptionSlot`]: matched by a short key (ex: `-o`) and/or a long key (ex: `--output`).
//! * [`OperandSlot`]: matched by position among the operands.
//! * [`RestSlot`]: receives every operand beyond the operand slots, in order.
//! * [`SubCommandSlot`]: matched by name; the remaining tokens are parsed into a child destination.
//!
//! Each option/operand slot takes a *field* which specifies how the value is written into the destination:
//! ```console
//! Field        | Argument | Effect
//! ----------------------------------------------------
//! Scalar<T>    | 1        | field = convert(VALUE)
//! Optional<T>  | 1        | field = Some(convert(VALUE))
//! Switch<T>    | 0        | field = target
//! ```
//!
//! Values are converted via [`std::str::FromStr`] by default.
//! Any field may override its conversion with a [`Converter`](prelude::Converter), including a plain closure `|token: &str| -> Result<T, E>`.
//!
//! ### Parsing
//! Parse a slice of tokens via [`Grammar::parse`]/[`Grammar::parse_into`], a single raw command line via [`Grammar::parse_line`]/[`Grammar::parse_line_into`], or the program arguments via [`Grammar::parse_env`].
//! Raw command lines are split following the Microsoft C/C++ quoting rules (see [`split`]).
//!
//! Each token is classified in the following order:
//! 1. An operand delimiter (ex: `--`), after which every token is an operand.
//! 2. A short option, then a long option.
//! When the short interpretation fails and the token also has the long shape, the long interpretation is used.
//! 3. A sub-command name (when sub-commands are enabled).
//! 4. An operand.
//!
//! Parse failures are reported as a [`ParseError`].
//! A failure stops the parse; changes already made to the destination are kept.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while parsing.
pub mod derive;
pub use argvgram_engine::*;
