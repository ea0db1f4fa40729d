//! Configuration: `~/.credhub/config.toml` and the signer/client it selects.

pub mod settings;

pub use settings::{BoxedSigner, Settings};
