use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveDestination;

impl From<DeriveDestination> for TokenStream2 {
    fn from(value: DeriveDestination) -> Self {
        let DeriveDestination { struct_name, slots } = value;
        let slots = slots.into_iter().map(|slot| slot.generate());

        quote! {
            impl ::argvgram::prelude::Destination for #struct_name {
                fn catalog() -> ::argvgram::Catalog<Self> {
                    ::argvgram::Catalog::new()
                        #( #slots )*
                }
            }
        }
    }
}
