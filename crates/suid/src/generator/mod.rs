mod guid;
mod interface;
mod sequence;
mod suid;

pub use guid::*;
pub use interface::*;
pub use sequence::*;
pub use suid::*;

#[cfg(test)]
mod tests;
