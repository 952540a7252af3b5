use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Optional,
    Scalar,
    Switch,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Command {
    pub name: DeriveValue,
    pub destination: DeriveValue,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SlotType {
    Option {
        short: Option<DeriveValue>,
        long: Option<DeriveValue>,
        binding: Binding,
        converter: Option<DeriveValue>,
    },
    Operand {
        position: DeriveValue,
        binding: Binding,
        converter: Option<DeriveValue>,
    },
    Rest {
        collects_strings: bool,
        field_type: DeriveValue,
    },
    Commands {
        commands: Vec<Command>,
        optional: bool,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveSlot {
    pub field_name: syn::Ident,
    pub slot_type: SlotType,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveDestination {
    pub struct_name: syn::Ident,
    pub slots: Vec<DeriveSlot>,
}
