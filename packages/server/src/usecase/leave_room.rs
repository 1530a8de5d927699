//! UseCase: 退室処理
//!
//! InRoom → Identified。指定されたルームに実際にいる場合だけ処理します。

use crate::domain::{Channel, ChatMessage, ConnectionId, OutboundEvent, RoomName};

use super::{context::PresenceContext, error::PresenceError};

/// 退室のユースケース
pub struct LeaveRoomUseCase {
    ctx: PresenceContext,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// 退室を実行
    ///
    /// 効果の順序: チャンネル退出 → セッションのルーム解除 → 退室通知の記録と配信
    /// → メンバー削除 → ルーム一覧の配信
    ///
    /// # Errors
    ///
    /// * `UnauthorizedState` - init 前、または指定ルームにいない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_name: &RoomName,
    ) -> Result<ChatMessage, PresenceError> {
        let session = self.ctx.require_session(connection_id).await?;
        if !session.is_in(room_name) {
            return Err(PresenceError::UnauthorizedState(format!(
                "'{}' is not in room '{}'",
                session.name, room_name
            )));
        }
        let channel = Channel::Room(room_name.clone());

        self.ctx.gateway.leave(connection_id, &channel).await;
        self.ctx.sessions.set_room(connection_id, None).await?;

        let notice = self
            .ctx
            .record_notice(format!("{} left the room!", session.name))
            .await?;
        self.ctx
            .gateway
            .broadcast(&channel, OutboundEvent::Message(notice.clone()))
            .await;

        self.ctx.rooms.remove_member(room_name, connection_id).await;
        self.ctx.broadcast_room_list().await;

        tracing::info!("'{}' left room '{}'", session.name, room_name);
        Ok(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::PresenceState,
        usecase::test_support::{
            GatewayCall, connection, create_test_context, identify, room_channel, room_name, seat,
        },
    };

    #[tokio::test]
    async fn test_leave_room_success() {
        // テスト項目: 退室するとメンバーから外れ、退室通知と一覧が配信される
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        identify(&ctx, "c2", "bob").await;
        seat(&ctx, "c1", "r1").await;
        seat(&ctx, "c2", "r1").await;
        let usecase = LeaveRoomUseCase::new(ctx.clone());

        // when (操作):
        let notice = usecase
            .execute(&connection("c1"), &room_name("r1"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(notice.body.as_str(), "alice left the room!");
        assert_eq!(
            ctx.presence_state(&connection("c1")).await,
            PresenceState::Identified
        );
        let room = ctx.rooms.find(&room_name("r1")).await.unwrap();
        assert_eq!(room.users, vec![connection("c2")]);

        let calls = gateway.calls().await;
        assert_eq!(
            calls,
            vec![
                GatewayCall::Leave(connection("c1"), room_channel("r1")),
                GatewayCall::Broadcast(room_channel("r1"), OutboundEvent::Message(notice)),
                GatewayCall::Broadcast(Channel::System, OutboundEvent::RoomList(vec![room])),
            ]
        );
    }

    #[tokio::test]
    async fn test_leave_other_room_is_rejected() {
        // テスト項目: いないルームからの退室は何もしない
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        seat(&ctx, "c1", "r1").await;
        let usecase = LeaveRoomUseCase::new(ctx.clone());

        // when (操作):
        let result = usecase.execute(&connection("c1"), &room_name("r2")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(PresenceError::UnauthorizedState(_))));
        assert_eq!(
            ctx.presence_state(&connection("c1")).await,
            PresenceState::InRoom(room_name("r1"))
        );
        assert!(gateway.calls().await.is_empty());
        assert_eq!(ctx.messages.count().await, 0);
    }

    #[tokio::test]
    async fn test_leave_twice_sends_one_notice() {
        // テスト項目: 二重の退室でも通知は 1 回だけ
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        seat(&ctx, "c1", "r1").await;
        let usecase = LeaveRoomUseCase::new(ctx.clone());
        usecase
            .execute(&connection("c1"), &room_name("r1"))
            .await
            .unwrap();

        // when (操作):
        let result = usecase.execute(&connection("c1"), &room_name("r1")).await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(ctx.messages.count().await, 1);
        assert_eq!(gateway.room_list_broadcasts().await, 1);
    }
}
