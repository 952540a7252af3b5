use argvgram::prelude::*;
use argvgram::{Catalog, Grammar, OperandSlot, OptionSlot, Optional, RestSlot, Scalar, Switch};

#[derive(Debug, Default)]
struct Transfer {
    recursive: bool,
    buffer: Option<usize>,
    source: String,
    targets: Vec<String>,
}

impl Destination for Transfer {
    fn catalog() -> Catalog<Self> {
        Catalog::new()
            .option(
                OptionSlot::new(Switch::new(|d: &mut Transfer| &mut d.recursive, true))
                    .short('r')
                    .long("recursive"),
            )
            .option(
                OptionSlot::new(Optional::new(|d: &mut Transfer| &mut d.buffer))
                    .short('b')
                    .long("buffer"),
            )
            .operand(OperandSlot::new(0, Scalar::new(|d: &mut Transfer| &mut d.source)))
            .rest(RestSlot::new(|d: &mut Transfer| &mut d.targets))
    }
}

fn main() {
    match Grammar::gnu().parse_env::<Transfer>() {
        Ok(transfer) => println!("{transfer:?}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
