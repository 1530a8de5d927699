//! InMemory Message Repository 実装
//!
//! ルームをまたいだ単一の追記専用ログ。メッセージは変更・削除されません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRepository};

/// インメモリ Message Repository 実装（Message Log）
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: ChatMessage) {
        let mut messages = self.messages.lock().await;
        messages.push(message);
    }

    async fn history(&self) -> Vec<ChatMessage> {
        let messages = self.messages.lock().await;
        messages.clone()
    }

    async fn count(&self) -> usize {
        let messages = self.messages.lock().await;
        messages.len()
    }
}
