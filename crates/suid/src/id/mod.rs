mod debug;
mod group;
mod guid;
mod interface;
mod layout;
mod suid;

pub use group::*;
pub use guid::*;
pub use interface::*;
pub use layout::*;
pub use suid::*;
