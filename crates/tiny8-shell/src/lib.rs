//! Line-oriented command shell for the tiny8 virtual CPU.

/// Shell command words and their aliases.
pub mod command;
/// Shell configuration assembled from command-line flags.
pub mod config;
/// Hex operand parsing and byte formatting.
pub mod hex;
/// Interactive session loop over a machine state.
pub mod session;
/// Trace sink that renders engine events as text lines.
pub mod trace;

pub use command::{Command, UnknownCommand};
pub use config::ShellConfig;
pub use hex::{format_byte, parse_hex_byte, HexByteError};
pub use session::{Session, ShellError};
pub use trace::WriterTrace;
