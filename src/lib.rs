pub mod gpu;
pub mod app;
pub mod backdrop;
pub mod camera;
pub mod config;
pub mod field;
pub mod pointer;

// Page content and contact link
pub mod contact;
pub mod content;

pub mod cli;

pub use crate::backdrop::Backdrop;
pub use crate::config::BackdropConfig;
pub use crate::contact::{ContactForm, Purpose};
pub use crate::pointer::PointerOffset;
