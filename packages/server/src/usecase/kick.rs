//! UseCase: 参加者の強制退室（/kick コマンド）
//!
//! 実行者がいるルームから対象を退室させます。対象が別のルームにいる場合は
//! 何もしません（実行者のルームのメンバー一覧だけを操作するため）。

use crate::domain::{Channel, ChatMessage, ConnectionId, OutboundEvent, UserName};

use super::{context::PresenceContext, error::PresenceError};

/// 強制退室のユースケース
pub struct KickParticipantUseCase {
    ctx: PresenceContext,
}

impl KickParticipantUseCase {
    /// 新しい KickParticipantUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// 強制退室を実行
    ///
    /// 効果は対象の leaveRoom と同じ順序で、通知文だけが実行者を含みます。
    ///
    /// # Errors
    ///
    /// * `UnauthorizedState` - 実行者が init 前、またはルームにいない
    /// * `NotFound` - 対象の名前が存在しない、または実行者と同じルームにいない
    pub async fn execute(
        &self,
        requester_id: &ConnectionId,
        target_name: &UserName,
    ) -> Result<ChatMessage, PresenceError> {
        let requester = self.ctx.require_session(requester_id).await?;
        let room = requester.room.clone().ok_or_else(|| {
            PresenceError::UnauthorizedState(format!("'{}' is not in a room", requester.name))
        })?;
        let target = self.ctx.sessions.find_by_name(target_name).await?;
        if !target.is_in(&room) {
            return Err(PresenceError::NotFound(format!(
                "user '{target_name}' in room '{room}'"
            )));
        }
        let channel = Channel::Room(room.clone());

        self.ctx
            .gateway
            .leave(&target.connection_id, &channel)
            .await;
        self.ctx
            .sessions
            .set_room(&target.connection_id, None)
            .await?;

        let notice = self
            .ctx
            .record_notice(format!(
                "{} was removed from the room by {}!",
                target.name, requester.name
            ))
            .await?;
        self.ctx
            .gateway
            .broadcast(&channel, OutboundEvent::Message(notice.clone()))
            .await;

        self.ctx
            .rooms
            .remove_member(&room, &target.connection_id)
            .await;
        self.ctx.broadcast_room_list().await;

        tracing::info!(
            "'{}' removed '{}' from room '{}'",
            requester.name,
            target.name,
            room
        );
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
            user,
        },
    };

    #[tokio::test]
    async fn test_kick_removes_target_from_room() {
        // テスト項目: 同じルームの対象を退室させ、実行者名入りの通知を配信する
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        identify(&ctx, "c2", "bob").await;
        seat(&ctx, "c1", "r1").await;
        seat(&ctx, "c2", "r1").await;
        let usecase = KickParticipantUseCase::new(ctx.clone());

        // when (操作):
        let notice = usecase
            .execute(&connection("c1"), &user("bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(notice.body.as_str(), "bob was removed from the room by alice!");
        assert_eq!(
            ctx.presence_state(&connection("c2")).await,
            PresenceState::Identified
        );
        let room = ctx.rooms.find(&room_name("r1")).await.unwrap();
        assert_eq!(room.users, vec![connection("c1")]);
        assert_eq!(
            gateway.calls().await,
            vec![
                GatewayCall::Leave(connection("c2"), room_channel("r1")),
                GatewayCall::Broadcast(room_channel("r1"), OutboundEvent::Message(notice)),
                GatewayCall::Broadcast(Channel::System, OutboundEvent::RoomList(vec![room])),
            ]
        );
    }

    #[tokio::test]
    async fn test_kick_unknown_target_is_noop() {
        // テスト項目: 存在しない名前への kick は何もしない
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        seat(&ctx, "c1", "r1").await;
        let usecase = KickParticipantUseCase::new(ctx.clone());

        // when (操作):
        let result = usecase.execute(&connection("c1"), &user("bob")).await;

        // then (期待する結果):
        assert_eq!(result, Err(PresenceError::NotFound("user 'bob'".to_string())));
        assert!(gateway.calls().await.is_empty());
        assert_eq!(ctx.messages.count().await, 0);
    }

    #[tokio::test]
    async fn test_kick_target_in_other_room_is_noop() {
        // テスト項目: 別のルームにいる対象は kick できない
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        identify(&ctx, "c2", "bob").await;
        seat(&ctx, "c1", "r1").await;
        seat(&ctx, "c2", "r2").await;
        let usecase = KickParticipantUseCase::new(ctx.clone());

        // when (操作):
        let result = usecase.execute(&connection("c1"), &user("bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(PresenceError::NotFound(_))));
        assert_eq!(
            ctx.presence_state(&connection("c2")).await,
            PresenceState::InRoom(room_name("r2"))
        );
        assert!(gateway.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_kick_requires_requester_room() {
        // テスト項目: ルームにいない実行者は kick できない
        // given (前提条件):
        let (ctx, gateway) = create_test_context();
        identify(&ctx, "c1", "alice").await;
        identify(&ctx, "c2", "bob").await;
        seat(&ctx, "c2", "r1").await;
        let usecase = KickParticipantUseCase::new(ctx.clone());

        // when (操作):
        let result = usecase.execute(&connection("c1"), &user("bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(PresenceError::UnauthorizedState(_))));
        assert!(gateway.calls().await.is_empty());
    }
}
