//! Voxel editing engine: targeting, brushes, sessions, history

pub mod targeting;
pub mod brush;
pub mod session;
pub mod history;
pub mod config;

pub use brush::{Brush, BrushShape};
pub use config::EditorConfig;
pub use history::{CellChange, EditHistory, HistoryEntry};
pub use session::{EditMode, EditSession, EditorState};
pub use targeting::{Raycaster, Target};
