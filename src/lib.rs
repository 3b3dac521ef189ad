//! Renders the Torbo Base orb icon and packages it as a macOS iconset.
//!
//! [`orb`] shades the pixels, [`png`] serializes them, and [`icon_gen`]
//! drives both over the fixed list of icon sizes.

pub mod contents_json;
pub mod icon_gen;
pub mod orb;
pub mod pixel;
pub mod png;

pub use pixel::Pixel;
