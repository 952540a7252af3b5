mod base;
mod machine;
mod middleware;

pub use base::*;

#[cfg(test)]
pub(crate) use base::test;
