use std::fmt::Display;
use std::str::FromStr;

use crate::api::capture::*;
use crate::prelude::Converter;

/// The default [`Converter`], via [`FromStr`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FromStrConverter;

impl<T> Converter<T> for FromStrConverter
where
    T: FromStr,
    T::Err: Display,
{
    fn convert(&self, token: &str) -> Result<T, String> {
        T::from_str(token).map_err(|error| error.to_string())
    }
}

fn convert<T>(converter: &dyn Converter<T>, token: &str) -> Result<T, InvalidConversion> {
    converter.convert(token).map_err(|message| InvalidConversion {
        token: token.to_string(),
        type_name: std::any::type_name::<T>(),
        message,
    })
}

/// A field that takes a single value.
///
/// The field is reached through `access`, a non-capturing accessor into the destination (ex: `|d: &mut Args| &mut d.count`).
pub struct Scalar<D, T> {
    access: fn(&mut D) -> &mut T,
    converter: Box<dyn Converter<T>>,
}

impl<D, T> OptionField for Scalar<D, T> {}
impl<D, T> OperandField for Scalar<D, T> {}

impl<D, T: 'static> Scalar<D, T> {
    /// Create a scalar field, converted via [`FromStr`].
    pub fn new(access: fn(&mut D) -> &mut T) -> Self
    where
        T: FromStr,
        T::Err: Display,
    {
        Self::with_converter(access, FromStrConverter)
    }

    /// Create a scalar field with a specific converter.
    pub fn with_converter(
        access: fn(&mut D) -> &mut T,
        converter: impl Converter<T> + 'static,
    ) -> Self {
        Self {
            access,
            converter: Box::new(converter),
        }
    }

    /// Override the converter.
    pub fn converter(mut self, converter: impl Converter<T> + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }
}

impl<D, T> GenericBinding<D, T> for Scalar<D, T> {
    fn matched(&self, _destination: &mut D) {
        // Do nothing.
    }

    fn capture(&self, destination: &mut D, token: &str) -> Result<(), InvalidConversion> {
        let value = convert(self.converter.as_ref(), token)?;
        *(self.access)(destination) = value;
        Ok(())
    }

    fn is_flag(&self) -> bool {
        false
    }
}

/// A field that takes no value; matching it assigns the `target`.
pub struct Switch<D, T> {
    access: fn(&mut D) -> &mut T,
    target: T,
}

impl<D, T> OptionField for Switch<D, T> {}

impl<D, T> Switch<D, T> {
    /// Create a switch field.
    pub fn new(access: fn(&mut D) -> &mut T, target: T) -> Self {
        Self { access, target }
    }
}

impl<D, T: Clone> GenericBinding<D, T> for Switch<D, T> {
    fn matched(&self, destination: &mut D) {
        *(self.access)(destination) = self.target.clone();
    }

    fn capture(&self, _destination: &mut D, _token: &str) -> Result<(), InvalidConversion> {
        unreachable!("internal error - must not capture on a Switch");
    }

    fn is_flag(&self) -> bool {
        true
    }
}

/// A field that maps down to [`Option`], taking a single value.
pub struct Optional<D, T> {
    access: fn(&mut D) -> &mut Option<T>,
    converter: Box<dyn Converter<T>>,
}

impl<D, T> OptionField for Optional<D, T> {}
impl<D, T> OperandField for Optional<D, T> {}

impl<D, T: 'static> Optional<D, T> {
    /// Create an optional field, converted via [`FromStr`].
    pub fn new(access: fn(&mut D) -> &mut Option<T>) -> Self
    where
        T: FromStr,
        T::Err: Display,
    {
        Self::with_converter(access, FromStrConverter)
    }

    /// Create an optional field with a specific converter.
    pub fn with_converter(
        access: fn(&mut D) -> &mut Option<T>,
        converter: impl Converter<T> + 'static,
    ) -> Self {
        Self {
            access,
            converter: Box::new(converter),
        }
    }

    /// Override the converter.
    pub fn converter(mut self, converter: impl Converter<T> + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }
}

impl<D, T> GenericBinding<D, T> for Optional<D, T> {
    fn matched(&self, _destination: &mut D) {
        // Do nothing.
    }

    fn capture(&self, destination: &mut D, token: &str) -> Result<(), InvalidConversion> {
        let value = convert(self.converter.as_ref(), token)?;
        (self.access)(destination).replace(value);
        Ok(())
    }

    fn is_flag(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct Target {
        count: u32,
        verbose: bool,
        name: Option<String>,
    }

    #[test]
    fn from_str_converter() {
        let value: Result<u32, String> = FromStrConverter.convert("5");
        assert_eq!(value, Ok(5));

        let value: Result<u32, String> = FromStrConverter.convert("five");
        assert_eq!(value, Err("invalid digit found in string".to_string()));
    }

    #[test]
    fn closure_converter() {
        let converter = |token: &str| token.parse::<u32>().map(|value| value * 10);
        assert_eq!(converter.convert("5"), Ok(50));
        assert!(converter.convert("x").is_err());
    }

    #[test]
    fn scalar_capture() {
        // Setup
        let mut target = Target::default();
        let scalar = Scalar::new(|d: &mut Target| &mut d.count);

        // Execute
        scalar.capture(&mut target, "5").unwrap();

        // Verify
        assert_eq!(target.count, 5);
        assert!(!scalar.is_flag());
    }

    #[rstest]
    #[case("-1")]
    #[case("x")]
    #[case("")]
    fn scalar_capture_invalid(#[case] token: &str) {
        // Setup
        let mut target = Target {
            count: 3,
            ..Target::default()
        };
        let scalar = Scalar::new(|d: &mut Target| &mut d.count);

        // Execute
        let error = scalar.capture(&mut target, token).unwrap_err();

        // Verify
        assert_eq!(error.token, token);
        assert_eq!(error.type_name, "u32");
        assert_eq!(target.count, 3);
    }

    #[test]
    fn scalar_converter() {
        // Setup
        let mut target = Target::default();
        let scalar = Scalar::new(|d: &mut Target| &mut d.count)
            .converter(|token: &str| token.len().to_string().parse::<u32>());

        // Execute
        scalar.capture(&mut target, "abcd").unwrap();

        // Verify
        assert_eq!(target.count, 4);
    }

    #[test]
    fn scalar_matched() {
        let mut target = Target::default();
        let scalar = Scalar::new(|d: &mut Target| &mut d.count);
        scalar.matched(&mut target);
        assert_eq!(target.count, 0);
    }

    #[test]
    fn switch_matched() {
        // Setup
        let mut target = Target::default();
        let switch = Switch::new(|d: &mut Target| &mut d.verbose, true);

        // Execute
        switch.matched(&mut target);
        switch.matched(&mut target);

        // Verify
        assert!(target.verbose);
        assert!(switch.is_flag());
    }

    #[test]
    #[should_panic]
    fn switch_capture() {
        let mut target = Target::default();
        let switch = Switch::new(|d: &mut Target| &mut d.count, 1);
        let _ = switch.capture(&mut target, "5");
    }

    #[test]
    fn optional_capture() {
        // Setup
        let mut target = Target::default();
        let optional = Optional::new(|d: &mut Target| &mut d.name);

        // Execute
        optional.matched(&mut target);
        assert_eq!(target.name, None);
        optional.capture(&mut target, "abc").unwrap();

        // Verify
        assert_eq!(target.name, Some("abc".to_string()));
        assert!(!optional.is_flag());
    }

    #[test]
    fn optional_converter() {
        let mut target = Target::default();
        let optional = Optional::with_converter(
            |d: &mut Target| &mut d.name,
            |token: &str| -> Result<String, String> { Ok(token.to_uppercase()) },
        );
        optional.capture(&mut target, "abc").unwrap();
        assert_eq!(target.name, Some("ABC".to_string()));
    }

    #[test]
    fn anonymous_capture() {
        // Setup
        let mut target = Target::default();
        let anonymous = AnonymousCapture::bind(Scalar::new(|d: &mut Target| &mut d.count));
        let erased: &dyn crate::parser::AnonymousBinding<Target> = &anonymous;

        // Execute
        erased.capture(&mut target, "7").unwrap();

        // Verify
        assert_eq!(target.count, 7);
        assert!(!erased.is_flag());
    }
}
