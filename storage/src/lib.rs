pub mod crypto;
pub mod keys;
pub mod profiles;
pub mod secrets;

pub use crypto::EncryptionKey;
pub use keys::KeyStore;
pub use profiles::ProfileStore;
pub use secrets::{Sealed, StoredProfile};
