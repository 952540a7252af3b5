use crate::model::{Binding, Command, DeriveSlot, DeriveValue, SlotType};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl DeriveSlot {
    /// Render the slot as one link of the `Catalog` builder chain.
    pub(crate) fn generate(self) -> TokenStream2 {
        let DeriveSlot {
            field_name,
            slot_type,
        } = self;
        let field_name_str = format!("{field_name}");

        match slot_type {
            SlotType::Option {
                short,
                long,
                binding,
                converter,
            } => {
                let field = generate_binding(&field_name, binding, converter);
                let short = short.map(|DeriveValue { tokens }| quote! { .short(#tokens) });
                let long = long.map(|DeriveValue { tokens }| quote! { .long(#tokens) });
                quote! {
                    .option(::argvgram::OptionSlot::new(#field) #short #long)
                }
            }
            SlotType::Operand {
                position,
                binding,
                converter,
            } => {
                let field = generate_binding(&field_name, binding, converter);
                let position = position.tokens;
                quote! {
                    .operand(::argvgram::OperandSlot::new(#position, #field))
                }
            }
            SlotType::Rest {
                collects_strings: true,
                ..
            } => {
                quote! {
                    .rest(::argvgram::RestSlot::new(|destination: &mut Self| &mut destination.#field_name))
                }
            }
            SlotType::Rest {
                collects_strings: false,
                field_type,
            } => {
                let field_type = field_type.tokens;
                quote! {
                    .rest(::argvgram::RestSlot::incompatible::<#field_type>(#field_name_str))
                }
            }
            SlotType::Commands { commands, optional } => {
                let commands = commands.into_iter().map(|Command { name, destination }| {
                    let name = name.tokens;
                    let destination = destination.tokens;
                    let assign = if optional {
                        quote! {
                            destination.#field_name = ::core::option::Option::Some(::core::convert::From::from(child));
                        }
                    } else {
                        quote! {
                            destination.#field_name = ::core::convert::From::from(child);
                        }
                    };

                    quote! {
                        .command(::argvgram::SubCommandSlot::new(#name, |destination: &mut Self, child: #destination| {
                            #assign
                        }))
                    }
                });

                quote! {
                    #( #commands )*
                }
            }
        }
    }
}

fn generate_binding(
    field_name: &syn::Ident,
    binding: Binding,
    converter: Option<DeriveValue>,
) -> TokenStream2 {
    let access = quote! { |destination: &mut Self| &mut destination.#field_name };

    match (binding, converter) {
        (Binding::Switch, _) => quote! { ::argvgram::Switch::new(#access, true) },
        (Binding::Scalar, None) => quote! { ::argvgram::Scalar::new(#access) },
        (Binding::Scalar, Some(DeriveValue { tokens })) => {
            quote! { ::argvgram::Scalar::with_converter(#access, #tokens) }
        }
        (Binding::Optional, None) => quote! { ::argvgram::Optional::new(#access) },
        (Binding::Optional, Some(DeriveValue { tokens })) => {
            quote! { ::argvgram::Optional::with_converter(#access, #tokens) }
        }
    }
}
