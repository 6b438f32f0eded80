//! Library side of the `intake` command line tool.

pub mod logging;
pub mod replay;
pub mod script;
