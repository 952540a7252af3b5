//! Traits which, typically, may be imported without concern: `use argvgram::prelude::*`.

use crate::api::Catalog;

/// Behaviour for a type that can be parsed into.
///
/// The [`Catalog`] declares which fields of the type are bound to options, operands, and sub-commands.
/// It is requested once per parse of each destination (including each sub-command destination).
///
/// Typically implemented via `#[derive(Destination)]`, but may be implemented by hand.
pub trait Destination: Sized + 'static {
    /// The slot table for this destination type.
    fn catalog() -> Catalog<Self>;
}

/// Behaviour to convert a raw token into a value of type `T`.
// Needs to be imported in order to implement a custom `Converter`.
pub trait Converter<T> {
    /// Convert the raw `token`, describing the failure when it cannot be converted.
    fn convert(&self, token: &str) -> Result<T, String>;
}

impl<T, E, F> Converter<T> for F
where
    F: Fn(&str) -> Result<T, E>,
    E: std::fmt::Display,
{
    fn convert(&self, token: &str) -> Result<T, String> {
        self(token).map_err(|error| error.to_string())
    }
}
