pub mod proto_loop;
pub mod cli_interface;
pub mod init;

pub use proto_loop::{WorkerProtoLoop, WorkerInput};
pub use cli_interface::{CliInterface, CliUi, AnsiColor};
pub use init::{build_session, build_ui};
