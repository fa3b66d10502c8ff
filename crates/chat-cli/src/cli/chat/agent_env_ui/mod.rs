// Reusable UI components
pub mod input_handler;
pub mod ctrl_c_handler;
pub mod ui_utils;

// UI implementations
pub mod text_ui;
pub mod structured_io;

// Re-exports
pub use input_handler::InputHandler;
pub use ctrl_c_handler::CtrlCHandler;
pub use ui_utils::{TokenUsage, calculate_token_usage, format_context_info};
pub use text_ui::TextUi;
pub use structured_io::StructuredIO;

