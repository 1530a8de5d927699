//! インメモリ Repository 実装

mod message;
mod room;
mod session;

pub use message::InMemoryMessageRepository;
pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
