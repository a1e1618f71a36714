pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::IssuedToken;
pub use codec::JwtCodec;
pub use errors::JwtError;
