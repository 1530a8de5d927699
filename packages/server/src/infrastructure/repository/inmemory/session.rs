//! InMemory Session Repository 実装
//!
//! 接続 ID → セッション（表示名・現在のルーム）の対応表。
//! 「誰がどの名前で接続しているか」の唯一の情報源です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RepositoryError, RoomName, Session, SessionRepository, UserName};

/// インメモリ Session Repository 実装（Session Registry）
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<ConnectionId, Session>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(
        &self,
        connection_id: ConnectionId,
        name: UserName,
    ) -> Result<Session, RepositoryError> {
        if name.is_system() {
            return Err(RepositoryError::ReservedName(name.to_string()));
        }

        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&connection_id) {
            return Err(RepositoryError::AlreadyRegistered(connection_id.to_string()));
        }
        // 線形探索で十分（同時接続数は少ない想定）
        if sessions.values().any(|session| session.name == name) {
            return Err(RepositoryError::DuplicateName(name.to_string()));
        }

        let session = Session::new(connection_id.clone(), name);
        sessions.insert(connection_id, session.clone());
        Ok(session)
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Result<Session, RepositoryError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(connection_id)
            .cloned()
            .ok_or_else(|| RepositoryError::SessionNotFound(connection_id.to_string()))
    }

    async fn find_by_name(&self, name: &UserName) -> Result<Session, RepositoryError> {
        let sessions = self.sessions.lock().await;
        sessions
            .values()
            .find(|session| &session.name == name)
            .cloned()
            .ok_or_else(|| RepositoryError::UserNotFound(name.to_string()))
    }

    async fn set_room(
        &self,
        connection_id: &ConnectionId,
        room: Option<RoomName>,
    ) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(connection_id.to_string()))?;
        session.room = room;
        Ok(())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Result<Session, RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(connection_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(connection_id.to_string()))
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
