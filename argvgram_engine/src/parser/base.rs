use thiserror::Error;

use crate::api::InvalidConversion;
use crate::model::{Malformed, SlotName};

/// The grammar configuration is invalid (ex: an empty prefix).
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// The slot table of a destination is inconsistent (ex: an operand position declared twice).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Catalog error: {0}")]
pub struct CatalogError(pub(crate) String);

/// The failure of a parse.
///
/// A failure aborts the parse immediately; changes made to the destination before the failure are kept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token cannot be represented as a string.
    #[error("Parse error: invalid input - {0}.")]
    InvalidInput(String),

    /// An option token which matches no option slot.
    #[error("Parse error: unknown option '{option}'.")]
    UnknownOption {
        /// The option body, without the prefix.
        option: String,
    },

    /// An option token which does not follow the grammar.
    #[error("Parse error: malformed option '{option}' - {reason}.")]
    MalformedOption {
        /// The option body, without the prefix.
        option: String,
        /// The reason.
        reason: Malformed,
    },

    /// A raw value which the slot's converter rejected.
    #[error("Parse error: {slot} cannot convert '{raw}' - {message}.")]
    Conversion {
        /// The slot the value was destined for.
        slot: SlotName,
        /// The raw value.
        raw: String,
        /// The converter's description of the failure.
        message: String,
    },

    /// An operand beyond the declared operand slots, with no rest slot to receive it.
    #[error("Parse error: too many operands, starting from '{operand}'.")]
    TooManyOperands {
        /// The surplus operand.
        operand: String,
    },

    /// A rest slot whose field cannot collect strings.
    #[error("Parse error: rest field '{field}' of type {type_name} cannot collect strings.")]
    InvalidRestSlot {
        /// The field name.
        field: String,
        /// The field type.
        type_name: &'static str,
    },

    /// The slot table of a destination is inconsistent.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ParseError {
    pub(crate) fn from_conversion(slot: SlotName, error: InvalidConversion) -> Self {
        ParseError::Conversion {
            slot,
            message: format!("expected {t}, {m}", t = error.type_name, m = error.message),
            raw: error.token,
        }
    }

    pub(crate) fn unknown(option: &str) -> Self {
        ParseError::UnknownOption {
            option: option.to_string(),
        }
    }

    pub(crate) fn malformed(option: &str, reason: Malformed) -> Self {
        ParseError::MalformedOption {
            option: option.to_string(),
            reason,
        }
    }
}

/// Behaviour to capture an implicit generic type T into a destination D from an input `&str`.
///
/// We use this at the middle/top of the catalog object graph so that fields of different types may all live in a single catalog.
pub(crate) trait AnonymousBinding<D> {
    /// Declare that the slot has been matched.
    fn matched(&self, destination: &mut D);

    /// Capture a value anonymously for this slot.
    fn capture(&self, destination: &mut D, token: &str) -> Result<(), InvalidConversion>;

    /// Whether the slot is a flag (takes no argument).
    fn is_flag(&self) -> bool;
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ParseError::InvalidInput("token #0".to_string()), "Parse error: invalid input - token #0.")]
    #[case(ParseError::unknown("x"), "Parse error: unknown option 'x'.")]
    #[case(
        ParseError::malformed("bs", Malformed::CombinedValue),
        "Parse error: malformed option 'bs' - an option taking an argument cannot be combined."
    )]
    #[case(
        ParseError::TooManyOperands { operand: "c".to_string() },
        "Parse error: too many operands, starting from 'c'."
    )]
    #[case(
        ParseError::from(CatalogError("abc".to_string())),
        "Catalog error: abc"
    )]
    fn parse_error_display(#[case] error: ParseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn conversion_error() {
        // Setup
        let conversion = InvalidConversion {
            token: "x".to_string(),
            type_name: "u32",
            message: "invalid digit found in string".to_string(),
        };

        // Execute
        let error = ParseError::from_conversion(SlotName::Operand(1), conversion);

        // Verify
        assert_eq!(
            error.to_string(),
            "Parse error: operand #1 cannot convert 'x' - expected u32, invalid digit found in string."
        );
        assert_matches!(error, ParseError::Conversion { raw, .. } => {
            assert_eq!(raw, "x");
        });
    }
}
