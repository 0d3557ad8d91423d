pub mod diagnostics;
pub mod render;
