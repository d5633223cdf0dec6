//! Library side of the `pageguard` binary: logging setup and table output.

pub mod logging;
pub mod render;
