//! Bearer-token verification. Tokens are issued by the external identity
//! provider; this service never signs them.

mod claims;
pub(crate) mod extractors;

pub use extractors::AuthUser;
