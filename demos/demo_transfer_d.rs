use argvgram::derive::*;
use argvgram::prelude::*;
use argvgram::Grammar;

#[derive(Debug, Default, Destination)]
struct Transfer {
    #[argv(short = 'r', long = "recursive")]
    recursive: bool,
    #[argv(short = 'b', long = "buffer")]
    buffer: Option<usize>,
    #[argv(operand = 0)]
    source: String,
    #[argv(rest)]
    targets: Vec<String>,
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
