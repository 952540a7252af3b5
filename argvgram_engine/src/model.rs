/// The identity of a slot, used to describe where a parse failure occurred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotName {
    /// An option, named by its long key when declared (otherwise its short key).
    Option(String),
    /// An operand, named by its position.
    Operand(usize),
}

impl std::fmt::Display for SlotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotName::Option(name) => write!(f, "option '{name}'"),
            SlotName::Operand(position) => write!(f, "operand #{position}"),
        }
    }
}

/// The ways in which an option token may be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// Several short flags were combined, but the grammar forbids it.
    CombinedFlags,
    /// A value option was combined with flags in a single token.
    CombinedValue,
    /// A short option argument was attached, but the grammar forbids it.
    AttachedArgument,
    /// The option requires an argument, but none was provided.
    MissingArgument,
    /// A flag option was given an argument.
    UnexpectedArgument,
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Malformed::CombinedFlags => "short options cannot be combined",
            Malformed::CombinedValue => "an option taking an argument cannot be combined",
            Malformed::AttachedArgument => "the argument must be a separate token",
            Malformed::MissingArgument => "an argument must be specified",
            Malformed::UnexpectedArgument => "the option does not take an argument",
        };
        write!(f, "{message}")
    }
}
