//! One module per subcommand; each exposes `execute`.

pub mod completions;
pub mod find;
pub mod get;
pub mod version;
