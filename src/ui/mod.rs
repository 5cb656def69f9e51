// UI and formatting module

pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::format_kb;
