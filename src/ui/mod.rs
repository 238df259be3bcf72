//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw/` - Draw functions (form pane, entries pane, status bar, alert)
//! - `theme.rs` - Color themes and presets
//! - `entry_card.rs` - Entry card widget

mod draw;
pub mod entry_card;
pub mod theme;

// Re-export main draw function
pub use draw::draw;
