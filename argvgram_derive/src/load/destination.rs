use crate::model::{DeriveDestination, DeriveSlot};

impl TryFrom<syn::DeriveInput> for DeriveDestination {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        if !value.generics.params.is_empty() {
            return Err(syn::Error::new(
                value.ident.span(),
                "Invalid - `#[derive(Destination)]` cannot be applied to a generic struct.",
            ));
        }

        match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => {
                let slots = fields
                    .named
                    .iter()
                    .filter(|field| {
                        field
                            .attrs
                            .iter()
                            .any(|attribute| attribute.path().is_ident(super::ATTRIBUTE))
                    })
                    .map(DeriveSlot::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(DeriveDestination {
                    struct_name: value.ident.clone(),
                    slots,
                })
            }
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Ok(DeriveDestination {
                struct_name: value.ident.clone(),
                slots: Vec::default(),
            }),
            _ => Err(syn::Error::new(
                value.ident.span(),
                "Invalid - `#[derive(Destination)]` requires a struct with named fields.",
            )),
        }
    }
}
