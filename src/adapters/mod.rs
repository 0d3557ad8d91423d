pub mod browser;
pub mod diagnostics;
