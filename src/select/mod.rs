pub mod hold;
pub mod selection;

pub use hold::HoldTimer;
pub use selection::{GestureMode, SelectionModel};
