//! UseCase: セッション参加処理（init）
//!
//! Anonymous → Identified。表示名を接続に結び付け、ルーム一覧を受け取るための
//! `system` チャンネルに参加させます。

use crate::domain::{Channel, ConnectionId, Session, UserName};

use super::{context::PresenceContext, error::PresenceError};

/// セッション参加のユースケース
pub struct InitSessionUseCase {
    ctx: PresenceContext,
}

impl InitSessionUseCase {
    /// 新しい InitSessionUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// セッション参加を実行
    ///
    /// # Errors
    ///
    /// * `DuplicateName` - 表示名が使用中
    /// * `ReservedName` - 表示名が `system`
    /// * `UnauthorizedState` - この接続は既に init 済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: UserName,
    ) -> Result<Session, PresenceError> {
        let session = self.ctx.sessions.register(connection_id, name).await?;
        self.ctx
            .gateway
            .join(&session.connection_id, &Channel::System)
            .await;

        tracing::info!(
            "Connection '{}' identified as '{}'",
            session.connection_id,
            session.name
        );
        Ok(session)
    }
}
