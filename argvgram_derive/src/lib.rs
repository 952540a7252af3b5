extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveDestination;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(Destination, attributes(argv))]
pub fn destination(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);

    match DeriveDestination::try_from(derive_input) {
        Ok(destination) => TokenStream2::from(destination).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
