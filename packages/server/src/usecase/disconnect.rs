//! UseCase: 切断処理
//!
//! どの状態からでも到達する終端遷移です。一度も init していない接続は対象外で、
//! 明示的な leaveRoom の直後に来た場合は退室通知を重ねて送りません。

use crate::domain::{Channel, ChatMessage, ConnectionId, OutboundEvent};

use super::{context::PresenceContext, error::PresenceError};

/// 切断のユースケース
pub struct DisconnectUseCase {
    ctx: PresenceContext,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// 切断を実行
    ///
    /// 効果の順序: 退室通知の記録とルームへの配信 → チャンネル退出 → セッション削除
    /// → メンバー削除 → ルーム一覧の配信（ルームにいた場合のみ）
    ///
    /// # Returns
    ///
    /// ルームにいた場合は配信した退室通知
    ///
    /// # Errors
    ///
    /// * `NotFound` - 一度も init していない接続
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<ChatMessage>, PresenceError> {
        let session = self.ctx.sessions.lookup(connection_id).await?;

        let notice = match &session.room {
            Some(room) => {
                let channel = Channel::Room(room.clone());
                let notice = self
                    .ctx
                    .record_notice(format!("{} left the room!", session.name))
                    .await?;
                self.ctx
                    .gateway
                    .broadcast(&channel, OutboundEvent::Message(notice.clone()))
                    .await;
                self.ctx.gateway.leave(connection_id, &channel).await;
                Some(notice)
            }
            None => None,
        };
        self.ctx
            .gateway
            .leave(connection_id, &Channel::System)
            .await;
        self.ctx.sessions.remove(connection_id).await?;

        if let Some(room) = &session.room {
            self.ctx.rooms.remove_member(room, connection_id).await;
            self.ctx.broadcast_room_list().await;
        }

        tracing::info!("'{}' disconnected", session.name);
        Ok(notice)
    }
}
