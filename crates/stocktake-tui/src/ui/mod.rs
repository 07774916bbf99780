//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout, auth panel and overlays
//! - `products`: Statistics, add-product form and product cards
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling

pub mod input;
pub mod products;
pub mod render;
pub mod styles;
