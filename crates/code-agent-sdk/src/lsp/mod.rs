pub mod client;
pub mod config;
pub mod lsp_registry;
pub mod protocol;

pub use client::LspClient;
pub use config::LspConfig;
pub use lsp_registry::LspRegistry;
pub use protocol::*;
