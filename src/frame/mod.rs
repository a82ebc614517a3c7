//! Over-the-air frame formats (§3.2, §6.3).

pub mod header;
pub mod message;
pub mod microframe;

pub use header::{decode_coordinates_i32, encode_coordinates_i32, Config, Header, MessageType, Scale};
pub use message::{Command, Control, Interest, Response};
pub use microframe::Microframe;
