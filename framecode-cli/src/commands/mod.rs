//! CLI subcommand implementations.

pub mod compare;
pub mod parse;
pub mod reduce;
pub mod render;

pub use compare::CmdCompare;
pub use parse::CmdParse;
pub use reduce::CmdReduce;
pub use render::CmdRender;
