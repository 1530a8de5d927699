//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージログへの追記と、送信者の現在のルームへの配信
//!
//! ### なぜこのテストが必要か
//! - ログに追記した値とルームに配信した値が同一であることを保証する
//! - メッセージログがルームをまたいだ単一の列であることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム内での送信
//! - 異常系：ルーム外からの送信、他人の名前での送信、init 前の送信

use crate::domain::{Channel, ChatMessage, ConnectionId, MessageBody, OutboundEvent, UserName};

use super::{context::PresenceContext, error::PresenceError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    ctx: PresenceContext,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(ctx: PresenceContext) -> Self {
        Self { ctx }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `name` - 送信者として表示する名前（セッションの名前と一致する必要がある）
    /// * `body` - 本文（コマンドではない通常のテキスト）
    ///
    /// # Returns
    ///
    /// ログに追記し、ルームに配信したメッセージ
    ///
    /// # Errors
    ///
    /// * `UnauthorizedState` - init 前、ルームにいない、または `name` がセッションの名前と異なる
    ///
    /// 送信者はクライアントが送ってきた `name` ではなくセッションで決まります。
    /// 他人の名前を名乗ったメッセージは、その名前で投稿されることなく拒否されます。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        name: UserName,
        body: MessageBody,
    ) -> Result<ChatMessage, PresenceError> {
        let session = self.ctx.require_session(connection_id).await?;
        if session.name != name {
            return Err(PresenceError::UnauthorizedState(format!(
                "'{}' cannot post as '{}'",
                session.name, name
            )));
        }
        let room = session.room.ok_or_else(|| {
            PresenceError::UnauthorizedState(format!("'{name}' is not in a room"))
        })?;

        let message = self.ctx.record_message(name, body).await;
        self.ctx
            .gateway
            .broadcast(&Channel::Room(room), OutboundEvent::Message(message.clone()))
            .await;

        Ok(message)
    }
}
