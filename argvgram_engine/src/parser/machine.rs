#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::Catalog;
use crate::grammar::Grammar;
use crate::model::Malformed;
use crate::parser::ParseError;
use crate::prelude::Destination;

/// The state of one parse, over one destination.
/// Each sub-command parse runs in its own state.
pub(crate) struct ParseState<'p, D> {
    grammar: &'p Grammar,
    destination: &'p mut D,
    catalog: Catalog<D>,
    index: usize,
    operand_position: usize,
    rest_count: usize,
    operands_only: bool,
}

impl<'p, D: Destination> ParseState<'p, D> {
    pub(crate) fn new(grammar: &'p Grammar, destination: &'p mut D) -> Result<Self, ParseError> {
        let catalog = D::catalog();
        catalog.validate()?;

        Ok(Self {
            grammar,
            destination,
            catalog,
            index: 0,
            operand_position: 0,
            rest_count: 0,
            operands_only: false,
        })
    }

    pub(crate) fn consume(mut self, tokens: &[&str]) -> Result<(), ParseError> {
        while let Some(token) = tokens.get(self.index).copied() {
            if !self.operands_only {
                if self.grammar.is_operand_delimiter(token) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Delimiter '{token}' at #{i}, only operands follow.", i = self.index);
                    }

                    self.operands_only = true;
                    self.index += 1;
                    continue;
                }

                let next = tokens.get(self.index + 1).copied();

                if let Some(consumed) = self.option(token, next)? {
                    self.index += consumed;
                    continue;
                }
            }

            if self.grammar.sub_command_enabled() {
                if let Some(slot) = self.catalog.command_named(token) {
                    let remaining = &tokens[self.index + 1..];
                    return slot.dispatch(self.grammar, self.destination, remaining);
                }
            }

            self.operand(token)?;
            self.index += 1;
        }

        Ok(())
    }

    // Returns the number of tokens consumed, or None when the token is not option-shaped.
    fn option(&mut self, token: &str, next: Option<&str>) -> Result<Option<usize>, ParseError> {
        let long = self.grammar.long_body(token);

        if let Some(body) = self.grammar.short_body(token) {
            match self.short_option(body, next) {
                Ok(consumed) => return Ok(Some(consumed)),
                Err(error) => match long {
                    Some(long) => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Short option '{body}' failed ({error}), retrying as long option '{long}'.");
                        }

                        return self.long_option(long, next).map(Some);
                    }
                    None => return Err(error),
                },
            }
        }

        match long {
            Some(long) => self.long_option(long, next).map(Some),
            None => Ok(None),
        }
    }

    fn short_option(&mut self, body: &str, next: Option<&str>) -> Result<usize, ParseError> {
        let mut characters = body.chars();
        let key = characters
            .next()
            .ok_or_else(|| ParseError::unknown(body))?;
        let attached = characters.as_str();
        let slot = self
            .catalog
            .short(key)
            .ok_or_else(|| ParseError::unknown(body))?;

        if slot.is_flag() {
            if !attached.is_empty() {
                return self.combined_flags(body);
            }

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Matched short flag '{key}'.");
            }

            slot.matched(self.destination);
            return Ok(1);
        }

        if attached.is_empty() {
            let argument = separated_argument(body, next)?;
            slot.capture(self.destination, argument)?;
            Ok(2)
        } else if self.grammar.non_separated_short_argument_enabled() {
            slot.capture(self.destination, attached)?;
            Ok(1)
        } else {
            Err(ParseError::malformed(body, Malformed::AttachedArgument))
        }
    }

    // Every flag is resolved before any is set.
    fn combined_flags(&mut self, body: &str) -> Result<usize, ParseError> {
        if !self.grammar.combined_short_flags_enabled() {
            return Err(ParseError::malformed(body, Malformed::CombinedFlags));
        }

        let mut slots = Vec::default();

        for key in body.chars() {
            let slot = self
                .catalog
                .short(key)
                .ok_or_else(|| ParseError::unknown(&key.to_string()))?;

            if !slot.is_flag() {
                return Err(ParseError::malformed(
                    &key.to_string(),
                    Malformed::CombinedValue,
                ));
            }

            slots.push(slot);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched combined short flags '{body}'.");
        }

        for slot in slots {
            slot.matched(self.destination);
        }

        Ok(1)
    }

    fn long_option(&mut self, body: &str, next: Option<&str>) -> Result<usize, ParseError> {
        let (slot, inline) = self
            .catalog
            .long(body, self.grammar.long_option_assign_characters())
            .ok_or_else(|| ParseError::unknown(body))?;

        match (slot.is_flag(), inline) {
            (true, None) => {
                slot.matched(self.destination);
                Ok(1)
            }
            (true, Some(_)) => Err(ParseError::malformed(body, Malformed::UnexpectedArgument)),
            (false, Some(argument)) => {
                slot.capture(self.destination, argument)?;
                Ok(1)
            }
            (false, None) => {
                let argument = separated_argument(body, next)?;
                slot.capture(self.destination, argument)?;
                Ok(2)
            }
        }
    }

    fn operand(&mut self, token: &str) -> Result<(), ParseError> {
        if !self.grammar.intermixed_operands_enabled() {
            self.operands_only = true;
        }

        if let Some(slot) = self.catalog.operand_at(self.operand_position) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Operand '{token}' at position {p}.", p = self.operand_position);
            }

            slot.capture(self.destination, token)?;
        } else if let Some(slot) = self.catalog.rest_slot() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Operand '{token}' into the rest slot.");
            }

            slot.assign(self.destination, token, self.rest_count == 0)?;
            self.rest_count += 1;
        } else {
            return Err(ParseError::TooManyOperands {
                operand: token.to_string(),
            });
        }

        self.operand_position += 1;
        Ok(())
    }
}

fn separated_argument<'t>(option: &str, next: Option<&'t str>) -> Result<&'t str, ParseError> {
    next.filter(|argument| !argument.is_empty())
        .ok_or_else(|| ParseError::malformed(option, Malformed::MissingArgument))
}
