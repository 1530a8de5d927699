//! UseCase: 入室処理
//!
//! Identified → InRoom。別のルームにいる場合の移動は呼び出し側が先に
//! leaveRoom する前提で、ここでは暗黙の退室を行わず拒否します。

use crate::domain::{Channel, ChatMessage, ConnectionId, OutboundEvent, RoomName};

use super::{context::PresenceContext, error::PresenceError};

/// 入室のユースケース
pub struct EnterRoomUseCase {
    ctx: PresenceContext,
}

impl EnterRoomUseCase {
    /// 新しい EnterRoomUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// 入室を実行
    ///
    /// 効果の順序: セッションのルーム設定 → チャンネル参加 → 入室通知の記録と配信
    /// → メンバー追加 → ルーム一覧の配信
    ///
    /// # Returns
    ///
    /// ルームに配信した入室通知
    ///
    /// # Errors
    ///
    /// * `UnauthorizedState` - init 前、または既にいずれかのルームにいる
    /// * `NotFound` - ルームが存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_name: RoomName,
    ) -> Result<ChatMessage, PresenceError> {
        let session = self.ctx.require_session(connection_id).await?;
        if let Some(current) = &session.room {
            return Err(PresenceError::UnauthorizedState(format!(
                "'{}' is already in room '{}'",
                session.name, current
            )));
        }
        // 存在確認より前に状態を変更しない
        let room = self.ctx.rooms.find(&room_name).await?;
        let channel = Channel::Room(room.name.clone());

        self.ctx
            .sessions
            .set_room(connection_id, Some(room.name.clone()))
            .await?;
        self.ctx.gateway.join(connection_id, &channel).await;

        let notice = self
            .ctx
            .record_notice(format!("{} joined the room!", session.name))
            .await?;
        self.ctx
            .gateway
            .broadcast(&channel, OutboundEvent::Message(notice.clone()))
            .await;

        self.ctx
            .rooms
            .add_member(&room.name, connection_id.clone())
            .await?;
        self.ctx.broadcast_room_list().await;

        tracing::info!("'{}' entered room '{}'", session.name, room.name);
        Ok(notice)
    }
}
