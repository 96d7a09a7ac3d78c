//! Authentication adapters: session tokens and credential hashing.

mod argon2_hasher;
mod mock;
mod token;

pub use argon2_hasher::Argon2CredentialHasher;
pub use mock::MockCredentialHasher;
pub use token::HmacTokenService;
