use crate::load::incompatible_error;
use crate::model::{Binding, Command, DeriveSlot, DeriveValue, IntermediateAttributes, SlotType};
use quote::ToTokens;
use syn::spanned::Spanned;

const PAIRS: [&str; 5] = ["short", "long", "operand", "converter", "command"];
const SINGLETONS: [&str; 1] = ["rest"];
const STRING_COLLECTIONS: [&str; 5] = ["Vec", "VecDeque", "LinkedList", "HashSet", "BTreeSet"];

impl TryFrom<&syn::Field> for DeriveSlot {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = value
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(value.span(), "Invalid - field must be named."))?;
        let attributes = IntermediateAttributes::gather(&value.attrs)?;

        for singleton in &attributes.singletons {
            if !SINGLETONS.contains(&singleton.as_str()) {
                return Err(unknown_error(&field_name, singleton));
            }
        }

        for key in attributes.pairs.keys() {
            if !PAIRS.contains(&key.as_str()) {
                return Err(unknown_error(&field_name, key));
            }
        }

        let short = single(&field_name, &attributes, "short")?;
        let long = single(&field_name, &attributes, "long")?;
        let operand = single(&field_name, &attributes, "operand")?;
        let converter = single(&field_name, &attributes, "converter")?;
        let commands = attributes.pairs.get("command");
        let rest = attributes.singletons.contains("rest");
        let option = short.is_some() || long.is_some();
        let last_segment = last_segment(&value.ty);

        if operand.is_some() && option {
            let key = if short.is_some() { "short" } else { "long" };
            return Err(incompatible_error(
                &field_name,
                "#[argv(operand = ..)]",
                format!("#[argv({key} = ..)]"),
            ));
        }

        if rest {
            disallow(
                &field_name,
                "#[argv(rest)]",
                &[
                    (option, "short/long = .."),
                    (operand.is_some(), "operand = .."),
                    (converter.is_some(), "converter = .."),
                    (commands.is_some(), "command = .."),
                ],
            )?;

            return Ok(DeriveSlot {
                field_name,
                slot_type: SlotType::Rest {
                    collects_strings: collects_strings(&value.ty),
                    field_type: DeriveValue {
                        tokens: value.ty.to_token_stream(),
                    },
                },
            });
        }

        if let Some(values) = commands {
            disallow(
                &field_name,
                "#[argv(command = ..)]",
                &[
                    (option, "short/long = .."),
                    (operand.is_some(), "operand = .."),
                    (converter.is_some(), "converter = .."),
                ],
            )?;

            let commands = values
                .iter()
                .map(|derive_value| build_command(&field_name, derive_value))
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(DeriveSlot {
                field_name,
                slot_type: SlotType::Commands {
                    commands,
                    optional: last_segment.as_deref() == Some("Option"),
                },
            });
        }

        let slot_type = match (operand, last_segment.as_deref()) {
            (Some(position), Some("Option")) => SlotType::Operand {
                position,
                binding: Binding::Optional,
                converter,
            },
            (Some(position), _) => SlotType::Operand {
                position,
                binding: Binding::Scalar,
                converter,
            },
            (None, Some("bool")) if option => {
                if converter.is_some() {
                    return Err(incompatible_error(
                        &field_name,
                        "bool",
                        "#[argv(converter = ..)]",
                    ));
                }

                SlotType::Option {
                    short,
                    long,
                    binding: Binding::Switch,
                    converter,
                }
            }
            (None, Some("Option")) if option => SlotType::Option {
                short,
                long,
                binding: Binding::Optional,
                converter,
            },
            (None, _) if option => SlotType::Option {
                short,
                long,
                binding: Binding::Scalar,
                converter,
            },
            (None, _) => {
                return Err(syn::Error::new(
                    field_name.span(),
                    "Invalid - `#[argv(..)]` must declare one of `short`, `long`, `operand`, `rest`, or `command`.",
                ));
            }
        };

        Ok(DeriveSlot {
            field_name,
            slot_type,
        })
    }
}

fn unknown_error(field_name: &syn::Ident, key: &str) -> syn::Error {
    syn::Error::new(
        field_name.span(),
        format!("Invalid - unknown attribute `#[argv({key})]`."),
    )
}

fn single(
    field_name: &syn::Ident,
    attributes: &IntermediateAttributes,
    key: &str,
) -> Result<Option<DeriveValue>, syn::Error> {
    match attributes.pairs.get(key).map(Vec::as_slice) {
        None | Some([]) => Ok(None),
        Some([value]) => Ok(Some(value.clone())),
        Some(_) => Err(syn::Error::new(
            field_name.span(),
            format!("Invalid - `#[argv({key} = ..)]` cannot be repeated."),
        )),
    }
}

fn disallow(
    field_name: &syn::Ident,
    antecedent: &str,
    condition_names: &[(bool, &str)],
) -> Result<(), syn::Error> {
    for (condition, name) in condition_names {
        if *condition {
            return Err(incompatible_error(
                field_name,
                antecedent,
                format!("#[argv({name})]"),
            ));
        }
    }

    Ok(())
}

fn last_segment(field_type: &syn::Type) -> Option<String> {
    match field_type {
        syn::Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

// A collection of `String`, which `RestSlot` can build from the surplus operands.
fn collects_strings(field_type: &syn::Type) -> bool {
    let syn::Type::Path(path) = field_type else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };

    if !STRING_COLLECTIONS.contains(&segment.ident.to_string().as_str()) {
        return false;
    }

    match &segment.arguments {
        syn::PathArguments::AngleBracketed(arguments) if arguments.args.len() == 1 => {
            match arguments.args.first() {
                Some(syn::GenericArgument::Type(inner)) => {
                    last_segment(inner).as_deref() == Some("String")
                }
                _ => false,
            }
        }
        _ => false,
    }
}

fn build_command(field_name: &syn::Ident, derive_value: &DeriveValue) -> Result<Command, syn::Error> {
    let expression: syn::Expr = syn::parse2(derive_value.tokens.clone())?;

    match expression {
        syn::Expr::Tuple(tuple) if tuple.elems.len() == 2 => {
            match (tuple.elems.first(), tuple.elems.last()) {
                (Some(syn::Expr::Lit(name)), Some(syn::Expr::Path(destination))) => Ok(Command {
                    name: DeriveValue {
                        tokens: name.to_token_stream(),
                    },
                    destination: DeriveValue {
                        tokens: destination.to_token_stream(),
                    },
                }),
                _ => Err(command_error(field_name, derive_value)),
            }
        }
        _ => Err(command_error(field_name, derive_value)),
    }
}

fn command_error(field_name: &syn::Ident, derive_value: &DeriveValue) -> syn::Error {
    syn::Error::new(
        field_name.span(),
        format!(
            "Invalid - command assignment expecting `(\"name\", SubCommandStruct)`, found `{}`.",
            derive_value.tokens
        ),
    )
}
