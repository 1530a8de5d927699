//! UseCase: ルーム一覧の再配信

use crate::domain::Room;

use super::context::PresenceContext;

/// ルーム一覧配信のユースケース
pub struct ListRoomsUseCase {
    ctx: PresenceContext,
}

impl ListRoomsUseCase {
    /// 新しい ListRoomsUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// 現在のルーム一覧を `system` チャンネルに配信し、その内容を返す
    pub async fn execute(&self) -> Vec<Room> {
        self.ctx.broadcast_room_list().await
    }
}
