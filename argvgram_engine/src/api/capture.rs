use thiserror::Error;

use crate::parser::AnonymousBinding;

/// Marker trait for bindings that can formulate an option slot.
pub trait OptionField {}

/// Marker trait for bindings that can formulate an operand slot.
pub trait OperandField {}

/// Behaviour to capture an explicit generic type T into a destination D from an input `&str`.
///
/// We use this at the bottom of the catalog object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait GenericBinding<D, T> {
    /// Declare that the slot has been matched.
    fn matched(&self, destination: &mut D);

    /// Convert and capture a value into the generic type T for this slot.
    fn capture(&self, destination: &mut D, token: &str) -> Result<(), InvalidConversion>;

    /// Whether the binding is a flag (takes no argument).
    fn is_flag(&self) -> bool;
}

/// The failure of a [`Converter`](crate::prelude::Converter), before the engine attaches the slot identity.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_name}: {message}.")]
pub struct InvalidConversion {
    /// The raw token.
    pub token: String,
    /// The target type.
    pub type_name: &'static str,
    /// The converter's description of the failure.
    pub message: String,
}

pub(crate) struct AnonymousCapture<D, T> {
    field: Box<dyn GenericBinding<D, T>>,
}

impl<D, T> AnonymousCapture<D, T> {
    pub(crate) fn bind(field: impl GenericBinding<D, T> + 'static) -> Self {
        Self {
            field: Box::new(field),
        }
    }
}

impl<D, T> AnonymousBinding<D> for AnonymousCapture<D, T> {
    fn matched(&self, destination: &mut D) {
        self.field.matched(destination);
    }

    fn capture(&self, destination: &mut D, token: &str) -> Result<(), InvalidConversion> {
        self.field.capture(destination, token)
    }

    fn is_flag(&self) -> bool {
        self.field.is_flag()
    }
}
