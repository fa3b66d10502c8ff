mod api;
mod events;
mod serialization;
mod server;
mod web_ui;
mod websocket;

pub use events::{init_time_conversion, WebUIEvent};
pub use server::{AppState, WebServer};
pub use web_ui::WebUI;
