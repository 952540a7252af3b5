mod capture;
mod catalog;
mod field;

pub use capture::*;
pub use catalog::*;
pub use field::*;
