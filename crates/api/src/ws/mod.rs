pub mod handler;
pub mod heartbeat;
pub mod manager;
pub mod protocol;

pub use handler::ws_handler;
pub use manager::WsManager;
pub use protocol::{ClientMessage, ServerMessage};
