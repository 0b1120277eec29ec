//! One module per subcommand, each exposing `execute`.

pub mod completions;
pub mod get;
pub mod set;
