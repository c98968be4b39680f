//! kanji-colorize Core Types
//!
//! This crate provides the foundational types shared by the kanji-colorize
//! crates. It includes:
//!
//! - **Colors**: RGB stroke colors and the deterministic color sequence
//!   generator ([`color`] module)
//! - **Characters**: KanjiVG character identities and their filename
//!   conventions ([`character`] module)

pub mod character;
pub mod color;

pub use character::{Character, CharacterError};
pub use color::{Color, ColorMode};
