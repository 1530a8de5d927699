//! UseCase: ルーム作成処理

use crate::domain::{ConnectionId, Room, RoomName};

use super::{context::PresenceContext, error::PresenceError};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    ctx: PresenceContext,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// ルーム作成を実行し、更新後のルーム一覧を `system` に配信する
    ///
    /// # Errors
    ///
    /// * `UnauthorizedState` - init 前の接続
    /// * `AlreadyExists` - 同名のルームが存在する
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_name: RoomName,
    ) -> Result<Room, PresenceError> {
        let session = self.ctx.require_session(connection_id).await?;
        let room = self
            .ctx
            .rooms
            .create(room_name, self.ctx.clock.now())
            .await?;
        self.ctx.broadcast_room_list().await;

        tracing::info!("Room '{}' created by '{}'", room.name, session.name);
        Ok(room)
    }
}
