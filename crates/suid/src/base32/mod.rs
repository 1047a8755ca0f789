mod be_bytes;
mod crockford;
mod error;
mod interface;

pub use be_bytes::*;
use crockford::{decode_base32, encode_base32};
pub use crockford::{ALPHABET, decode_symbol, encode_symbol};
pub use error::*;
pub use interface::*;
