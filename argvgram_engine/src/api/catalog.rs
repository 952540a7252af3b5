use std::collections::HashSet;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::capture::*;
use crate::grammar::Grammar;
use crate::model::SlotName;
use crate::parser::{AnonymousBinding, CatalogError, ParseError};
use crate::prelude::Destination;

/// An option slot, matched by its short and/or long key.
///
/// ### Example
/// ```
/// # use argvgram_engine as argvgram;
/// use argvgram::{OptionSlot, Scalar, Switch};
///
/// #[derive(Default)]
/// struct Args {
///     verbose: bool,
///     output: String,
/// }
///
/// let verbose = OptionSlot::new(Switch::new(|d: &mut Args| &mut d.verbose, true)).short('v');
/// let output = OptionSlot::new(Scalar::new(|d: &mut Args| &mut d.output))
///     .short('o')
///     .long("output");
/// ```
pub struct OptionSlot<D> {
    short: Option<char>,
    long: Option<String>,
    binding: Box<dyn AnonymousBinding<D>>,
}

impl<D: 'static> OptionSlot<D> {
    /// Create an option slot for `field`.
    /// At least one of [`OptionSlot::short`] or [`OptionSlot::long`] must be declared.
    pub fn new<T: 'static>(field: impl GenericBinding<D, T> + OptionField + 'static) -> Self {
        Self {
            short: None,
            long: None,
            binding: Box::new(AnonymousCapture::bind(field)),
        }
    }
}

impl<D> OptionSlot<D> {
    /// Declare the short key (ex: `'o'` for `-o`).
    pub fn short(mut self, key: char) -> Self {
        self.short = Some(key);
        self
    }

    /// Declare the long key (ex: `"output"` for `--output`).
    pub fn long(mut self, key: impl Into<String>) -> Self {
        self.long = Some(key.into());
        self
    }

    pub(crate) fn name(&self) -> SlotName {
        match (&self.long, &self.short) {
            (Some(long), _) => SlotName::Option(long.clone()),
            (None, Some(short)) => SlotName::Option(short.to_string()),
            (None, None) => SlotName::Option(String::default()),
        }
    }

    pub(crate) fn is_flag(&self) -> bool {
        self.binding.is_flag()
    }

    pub(crate) fn matched(&self, destination: &mut D) {
        self.binding.matched(destination);
    }

    pub(crate) fn capture(&self, destination: &mut D, token: &str) -> Result<(), ParseError> {
        self.binding
            .capture(destination, token)
            .map_err(|error| ParseError::from_conversion(self.name(), error))
    }
}

/// An operand slot, matched by its position among the operands (starting from 0).
pub struct OperandSlot<D> {
    position: usize,
    binding: Box<dyn AnonymousBinding<D>>,
}

impl<D: 'static> OperandSlot<D> {
    /// Create an operand slot at `position` for `field`.
    pub fn new<T: 'static>(
        position: usize,
        field: impl GenericBinding<D, T> + OperandField + 'static,
    ) -> Self {
        Self {
            position,
            binding: Box::new(AnonymousCapture::bind(field)),
        }
    }
}

impl<D> OperandSlot<D> {
    pub(crate) fn capture(&self, destination: &mut D, token: &str) -> Result<(), ParseError> {
        self.binding
            .capture(destination, token)
            .map_err(|error| ParseError::from_conversion(SlotName::Operand(self.position), error))
    }
}

enum Rest<D> {
    Collect(Box<dyn Fn(&mut D, &str, bool)>),
    Incompatible {
        field: String,
        type_name: &'static str,
    },
}

/// The slot which receives every operand beyond the declared operand slots, in order.
pub struct RestSlot<D> {
    rest: Rest<D>,
}

impl<D: 'static> RestSlot<D> {
    /// Create a rest slot collecting into the field reached by `access`.
    ///
    /// The first surplus operand resets the field to its default, then each surplus operand is extended into it.
    pub fn new<C>(access: fn(&mut D) -> &mut C) -> Self
    where
        C: Default + Extend<String> + 'static,
    {
        Self {
            rest: Rest::Collect(Box::new(
                move |destination: &mut D, value: &str, first: bool| {
                    let field = access(destination);

                    if first {
                        *field = C::default();
                    }

                    field.extend(std::iter::once(value.to_string()));
                },
            )),
        }
    }

    /// Create a rest slot for a field of type `C`, which cannot collect strings.
    /// The slot fails the parse as soon as a surplus operand arrives.
    #[doc(hidden)]
    pub fn incompatible<C>(field: impl Into<String>) -> Self {
        Self {
            rest: Rest::Incompatible {
                field: field.into(),
                type_name: std::any::type_name::<C>(),
            },
        }
    }
}

impl<D> RestSlot<D> {
    /// Add `value` to the rest field; `first` marks the first surplus operand of this parse.
    pub(crate) fn assign(&self, destination: &mut D, value: &str, first: bool) -> Result<(), ParseError> {
        match &self.rest {
            Rest::Collect(collect) => {
                collect(destination, value, first);
                Ok(())
            }
            Rest::Incompatible { field, type_name } => Err(ParseError::InvalidRestSlot {
                field: field.clone(),
                type_name,
            }),
        }
    }
}

type Dispatch<D> = Box<dyn Fn(&Grammar, &mut D, &[&str]) -> Result<(), ParseError>>;

/// A sub-command slot, matched by its name.
///
/// When matched, a default child destination is parsed from every remaining token and then assigned into the parent.
pub struct SubCommandSlot<D> {
    name: String,
    dispatch: Dispatch<D>,
}

impl<D: 'static> SubCommandSlot<D> {
    /// Create a sub-command slot `name`, whose parsed child of type `C` is handed to `assign`.
    pub fn new<C>(name: impl Into<String>, assign: fn(&mut D, C)) -> Self
    where
        C: Destination + Default,
    {
        let name = name.into();
        #[cfg(feature = "tracing_debug")]
        let command = name.clone();

        Self {
            name,
            dispatch: Box::new(
                move |grammar: &Grammar, destination: &mut D, remaining: &[&str]| {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Dispatching sub-command '{command}' with {remaining:?}.");
                    }

                    let mut child = C::default();
                    grammar.parse(&mut child, remaining)?;
                    assign(destination, child);
                    Ok(())
                },
            ),
        }
    }
}

impl<D> SubCommandSlot<D> {
    pub(crate) fn dispatch(
        &self,
        grammar: &Grammar,
        destination: &mut D,
        remaining: &[&str],
    ) -> Result<(), ParseError> {
        (self.dispatch)(grammar, destination, remaining)
    }
}

/// The slot table of a [`Destination`].
///
/// ### Example
/// ```
/// # use argvgram_engine as argvgram;
/// use argvgram::prelude::*;
/// use argvgram::{Catalog, Grammar, OperandSlot, OptionSlot, RestSlot, Scalar, Switch};
///
/// #[derive(Debug, Default)]
/// struct Args {
///     verbose: bool,
///     source: String,
///     rest: Vec<String>,
/// }
///
/// impl Destination for Args {
///     fn catalog() -> Catalog<Self> {
///         Catalog::new()
///             .option(OptionSlot::new(Switch::new(|d: &mut Args| &mut d.verbose, true)).short('v'))
///             .operand(OperandSlot::new(0, Scalar::new(|d: &mut Args| &mut d.source)))
///             .rest(RestSlot::new(|d: &mut Args| &mut d.rest))
///     }
/// }
///
/// let args: Args = Grammar::posix().parse_into(&["-v", "a", "b", "c"]).unwrap();
/// assert!(args.verbose);
/// assert_eq!(args.source, "a");
/// assert_eq!(args.rest, vec!["b", "c"]);
/// ```
pub struct Catalog<D> {
    options: Vec<OptionSlot<D>>,
    operands: Vec<OperandSlot<D>>,
    rests: Vec<RestSlot<D>>,
    commands: Vec<SubCommandSlot<D>>,
}

impl<D> Default for Catalog<D> {
    fn default() -> Self {
        Self {
            options: Vec::default(),
            operands: Vec::default(),
            rests: Vec::default(),
            commands: Vec::default(),
        }
    }
}

impl<D: Destination> Catalog<D> {
    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Check the slot table of the destination `D`, without parsing.
    ///
    /// ### Example
    /// ```
    /// # use argvgram_engine as argvgram;
    /// use argvgram::prelude::*;
    /// use argvgram::{Catalog, OperandSlot, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Args {
    ///     source: String,
    ///     target: String,
    /// }
    ///
    /// impl Destination for Args {
    ///     fn catalog() -> Catalog<Self> {
    ///         Catalog::new()
    ///             .operand(OperandSlot::new(0, Scalar::new(|d: &mut Args| &mut d.source)))
    ///             .operand(OperandSlot::new(0, Scalar::new(|d: &mut Args| &mut d.target)))
    ///     }
    /// }
    ///
    /// assert!(Catalog::<Args>::check().is_err());
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn check() -> Result<(), CatalogError> {
        D::catalog().validate()
    }
}

impl<D> Catalog<D> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option slot.
    /// When several option slots share a key, the first added wins.
    pub fn option(mut self, slot: OptionSlot<D>) -> Self {
        self.options.push(slot);
        self
    }

    /// Add an operand slot.
    pub fn operand(mut self, slot: OperandSlot<D>) -> Self {
        self.operands.push(slot);
        self
    }

    /// Add the rest slot.
    pub fn rest(mut self, slot: RestSlot<D>) -> Self {
        self.rests.push(slot);
        self
    }

    /// Add a sub-command slot.
    pub fn command(mut self, slot: SubCommandSlot<D>) -> Self {
        self.commands.push(slot);
        self
    }

    /// Check the slot table is consistent.
    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        for (index, slot) in self.options.iter().enumerate() {
            if slot.short.is_none() && slot.long.is_none() {
                return Err(CatalogError(format!(
                    "Option slot #{index} must declare a short or long key."
                )));
            }
        }

        let mut positions = HashSet::new();

        for slot in &self.operands {
            if !positions.insert(slot.position) {
                return Err(CatalogError(format!(
                    "Operand position {p} is declared more than once.",
                    p = slot.position
                )));
            }
        }

        if self.rests.len() > 1 {
            return Err(CatalogError(
                "The rest slot is declared more than once.".to_string(),
            ));
        }

        let mut names = HashSet::new();

        for slot in &self.commands {
            if !names.insert(slot.name.as_str()) {
                return Err(CatalogError(format!(
                    "Sub-command '{n}' is declared more than once.",
                    n = slot.name
                )));
            }
        }

        Ok(())
    }

    pub(crate) fn short(&self, key: char) -> Option<&OptionSlot<D>> {
        self.options.iter().find(|slot| slot.short == Some(key))
    }

    /// Find the long option slot for `body`, either an exact match or the key followed by an assign character.
    /// In the latter case, the inline argument is returned as well.
    pub(crate) fn long<'t>(
        &self,
        body: &'t str,
        assign_characters: &[char],
    ) -> Option<(&OptionSlot<D>, Option<&'t str>)> {
        self.options.iter().find_map(|slot| {
            let key = slot.long.as_deref()?;

            if body == key {
                return Some((slot, None));
            }

            let mut remainder = body.strip_prefix(key)?.chars();
            let assign = remainder.next()?;

            if assign_characters.contains(&assign) {
                Some((slot, Some(remainder.as_str())))
            } else {
                None
            }
        })
    }

    pub(crate) fn operand_at(&self, position: usize) -> Option<&OperandSlot<D>> {
        self.operands.iter().find(|slot| slot.position == position)
    }

    pub(crate) fn rest_slot(&self) -> Option<&RestSlot<D>> {
        self.rests.first()
    }

    pub(crate) fn command_named(&self, name: &str) -> Option<&SubCommandSlot<D>> {
        self.commands.iter().find(|slot| slot.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Optional, Scalar, Switch};
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::collections::BTreeSet;

    #[derive(Debug, Default)]
    struct Target {
        verbose: bool,
        quiet: bool,
        output: String,
        level: Option<u8>,
        rest: Vec<String>,
        unique: BTreeSet<String>,
        child: Option<Child>,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Child {
        force: bool,
    }

    impl Destination for Child {
        fn catalog() -> Catalog<Self> {
            Catalog::new()
                .option(OptionSlot::new(Switch::new(|d: &mut Child| &mut d.force, true)).short('f'))
        }
    }

    fn catalog() -> Catalog<Target> {
        Catalog::new()
            .option(OptionSlot::new(Switch::new(|d: &mut Target| &mut d.verbose, true)).short('v'))
            .option(
                OptionSlot::new(Switch::new(|d: &mut Target| &mut d.quiet, true))
                    .short('v')
                    .long("quiet"),
            )
            .option(
                OptionSlot::new(Scalar::new(|d: &mut Target| &mut d.output))
                    .short('o')
                    .long("output"),
            )
            .option(OptionSlot::new(Optional::new(|d: &mut Target| &mut d.level)).long("out"))
            .operand(OperandSlot::new(0, Scalar::new(|d: &mut Target| &mut d.output)))
            .rest(RestSlot::new(|d: &mut Target| &mut d.rest))
            .command(SubCommandSlot::new("child", |d: &mut Target, c: Child| {
                d.child = Some(c)
            }))
    }

    #[test]
    fn short_first_declared_wins() {
        // Setup
        let catalog = catalog();
        let mut target = Target::default();

        // Execute
        let slot = catalog.short('v').unwrap();
        slot.matched(&mut target);

        // Verify
        assert!(target.verbose);
        assert!(!target.quiet);
        assert!(catalog.short('x').is_none());
    }

    #[rstest]
    #[case("quiet", &[], Some(SlotName::Option("quiet".to_string())), None)]
    #[case("output", &['='], Some(SlotName::Option("output".to_string())), None)]
    #[case("output=abc", &['='], Some(SlotName::Option("output".to_string())), Some("abc"))]
    #[case("output=", &['='], Some(SlotName::Option("output".to_string())), Some(""))]
    #[case("output:a=b", &['=', ':'], Some(SlotName::Option("output".to_string())), Some("a=b"))]
    #[case("out=1", &['='], Some(SlotName::Option("out".to_string())), Some("1"))]
    #[case("output=abc", &[], None, None)]
    #[case("outputs", &['='], None, None)]
    #[case("outp", &['='], None, None)]
    fn long_lookup(
        #[case] body: &str,
        #[case] assign: &[char],
        #[case] expected: Option<SlotName>,
        #[case] inline: Option<&str>,
    ) {
        let catalog = catalog();
        let result = catalog.long(body, assign);
        assert_eq!(result.map(|(slot, _)| slot.name()), expected);
        assert_eq!(result.and_then(|(_, value)| value), inline);
    }

    #[test]
    fn option_capture_names_slot() {
        // Setup
        let catalog: Catalog<Target> = Catalog::new()
            .option(OptionSlot::new(Optional::new(|d: &mut Target| &mut d.level)).short('l'));
        let mut target = Target::default();

        // Execute
        let error = catalog.short('l').unwrap().capture(&mut target, "x").unwrap_err();

        // Verify
        assert_matches!(error, ParseError::Conversion { slot, raw, .. } => {
            assert_eq!(slot, SlotName::Option("l".to_string()));
            assert_eq!(raw, "x");
        });
    }

    #[test]
    fn operand_capture() {
        let catalog = catalog();
        let mut target = Target::default();
        catalog.operand_at(0).unwrap().capture(&mut target, "abc").unwrap();
        assert_eq!(target.output, "abc");
        assert!(catalog.operand_at(1).is_none());
    }

    #[test]
    fn rest_assign() {
        // Setup
        let catalog: Catalog<Target> =
            Catalog::new().rest(RestSlot::new(|d: &mut Target| &mut d.unique));
        let mut target = Target::default();
        target.unique.insert("stale".to_string());
        let slot = catalog.rest_slot().unwrap();

        // Execute
        slot.assign(&mut target, "b", true).unwrap();
        slot.assign(&mut target, "a", false).unwrap();
        slot.assign(&mut target, "b", false).unwrap();

        // Verify
        assert_eq!(
            target.unique,
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
    }

    #[derive(Default)]
    struct Tally {
        extends: usize,
        values: Vec<String>,
    }

    impl Extend<String> for Tally {
        fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
            for value in iter {
                self.extends += 1;
                self.values.push(value);
            }
        }
    }

    #[derive(Default)]
    struct Tallied {
        tally: Tally,
    }

    #[test]
    fn rest_assign_each_value_once() {
        // Setup
        let catalog: Catalog<Tallied> =
            Catalog::new().rest(RestSlot::new(|d: &mut Tallied| &mut d.tally));
        let mut tallied = Tallied::default();
        let slot = catalog.rest_slot().unwrap();

        // Execute
        for index in 0..1000 {
            slot.assign(&mut tallied, &index.to_string(), index == 0).unwrap();
        }

        // Verify
        assert_eq!(tallied.tally.extends, 1000);
        assert_eq!(tallied.tally.values.len(), 1000);
        assert_eq!(tallied.tally.values[999], "999");
    }

    #[test]
    fn rest_incompatible() {
        let catalog: Catalog<Target> =
            Catalog::new().rest(RestSlot::incompatible::<Vec<u32>>("numbers"));
        let mut target = Target::default();
        let error = catalog
            .rest_slot()
            .unwrap()
            .assign(&mut target, "1", true)
            .unwrap_err();
        assert_matches!(error, ParseError::InvalidRestSlot { field, type_name } => {
            assert_eq!(field, "numbers");
            assert_eq!(type_name, "alloc::vec::Vec<u32>");
        });
    }

    #[test]
    fn command_dispatch() {
        // Setup
        let catalog = catalog();
        let mut target = Target::default();

        // Execute
        catalog
            .command_named("child")
            .unwrap()
            .dispatch(Grammar::posix(), &mut target, &["-f"])
            .unwrap();

        // Verify
        assert_eq!(target.child, Some(Child { force: true }));
        assert!(catalog.command_named("other").is_none());
    }

    #[test]
    fn command_dispatch_failure_leaves_parent() {
        let catalog = catalog();
        let mut target = Target::default();
        let error = catalog
            .command_named("child")
            .unwrap()
            .dispatch(Grammar::posix(), &mut target, &["-x"])
            .unwrap_err();
        assert_matches!(error, ParseError::UnknownOption { .. });
        assert_eq!(target.child, None);
    }

    #[test]
    #[cfg(feature = "unit_test")]
    fn check() {
        Catalog::<Child>::check().unwrap();
    }

    #[test]
    fn validate() {
        catalog().validate().unwrap();
        Catalog::<Target>::new().validate().unwrap();
    }

    #[rstest]
    #[case(
        Catalog::new().option(OptionSlot::new(Switch::new(|d: &mut Target| &mut d.verbose, true))),
        "Option slot #0"
    )]
    #[case(
        Catalog::new()
            .operand(OperandSlot::new(1, Scalar::new(|d: &mut Target| &mut d.output)))
            .operand(OperandSlot::new(1, Optional::new(|d: &mut Target| &mut d.level))),
        "Operand position 1"
    )]
    #[case(
        Catalog::new()
            .rest(RestSlot::new(|d: &mut Target| &mut d.rest))
            .rest(RestSlot::new(|d: &mut Target| &mut d.unique)),
        "rest slot"
    )]
    #[case(
        Catalog::new()
            .command(SubCommandSlot::new("child", |d: &mut Target, c: Child| d.child = Some(c)))
            .command(SubCommandSlot::new("child", |_: &mut Target, _: Child| {})),
        "Sub-command 'child'"
    )]
    fn validate_rejects(#[case] catalog: Catalog<Target>, #[case] message: &str) {
        let error = catalog.validate().unwrap_err();
        assert_contains!(error.to_string(), message);
    }
}
