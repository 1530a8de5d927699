//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から `PresenceEngine` 経由で呼び出され、Domain 層を操作します。

pub mod command;
pub mod context;
pub mod create_room;
pub mod disconnect;
pub mod enter_room;
pub mod error;
pub mod external_action;
pub mod init_session;
pub mod kick;
pub mod leave_room;
pub mod list_rooms;
pub mod presence;
pub mod send_message;

#[cfg(test)]
mod test_support;

pub use command::{CommandDispatcher, CommandHandler, DispatchOutcome, KickCommand};
pub use context::PresenceContext;
pub use create_room::CreateRoomUseCase;
pub use disconnect::DisconnectUseCase;
pub use enter_room::EnterRoomUseCase;
pub use error::PresenceError;
pub use external_action::{ExternalActionKind, ExternalActionUseCase, IndicatorTimers};
pub use init_session::InitSessionUseCase;
pub use kick::KickParticipantUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use presence::{MessageOutcome, PresenceEngine, PresenceSettings};
pub use send_message::SendMessageUseCase;
