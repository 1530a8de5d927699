//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! 作成順を保つため `Vec<Room>` をインメモリ DB として使用します。
//! ルーム数は少ない想定なので線形探索で十分です。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RepositoryError, Room, RoomName, RoomRepository};

/// インメモリ Room Repository 実装（Room Directory）
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// 作成順のルーム一覧
    rooms: Mutex<Vec<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, name: RoomName, created_at: String) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.iter().any(|room| room.name == name) {
            return Err(RepositoryError::RoomAlreadyExists(name.to_string()));
        }
        let room = Room::new(name, created_at);
        rooms.push(room.clone());
        Ok(room)
    }

    async fn find(&self, name: &RoomName) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .find(|room| &room.name == name)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(name.to_string()))
    }

    async fn list_all(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.clone()
    }

    async fn add_member(
        &self,
        name: &RoomName,
        connection_id: ConnectionId,
    ) -> Result<bool, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .iter_mut()
            .find(|room| &room.name == name)
            .ok_or_else(|| RepositoryError::RoomNotFound(name.to_string()))?;
        Ok(room.add_member(connection_id))
    }

    async fn remove_member(&self, name: &RoomName, connection_id: &ConnectionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        rooms
            .iter_mut()
            .find(|room| &room.name == name)
            .is_some_and(|room| room.remove_member(connection_id))
    }

    async fn rooms_containing(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .filter(|room| room.has_member(connection_id))
            .map(|room| room.name.clone())
            .collect()
    }
}
