//! ListRoomsHandler - Query handler for the public room listing.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::room::Room;
use crate::ports::RoomRepository;

/// Default page size, matching the grid the room browser renders.
pub const DEFAULT_PAGE_SIZE: u64 = 21;

/// Upper bound on requested page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Query for a page of public rooms.
#[derive(Debug, Clone)]
pub struct ListRoomsQuery {
    /// 1-based page number.
    pub page: u64,
    /// Rooms per page.
    pub page_size: u64,
}

impl Default for ListRoomsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of public rooms.
#[derive(Debug, Clone)]
pub struct RoomPage {
    /// Rooms ordered by creation time descending.
    pub rooms: Vec<Room>,
    /// Total number of pages at the requested page size.
    pub total_pages: u64,
}

/// Handler for the public room listing.
///
/// Private rooms never appear here; they are reachable only through
/// resolve-by-code or the visited list.
pub struct ListRoomsHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl ListRoomsHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, query: ListRoomsQuery) -> Result<RoomPage, DomainError> {
        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;

        let (rooms, total) = self.rooms.list_public(offset, page_size).await?;
        let total_pages = total.div_ceil(page_size);

        Ok(RoomPage { rooms, total_pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::room::{CreateRoomCommand, CreateRoomHandler};
    use crate::domain::room::RoomVisibility;

    async fn seed(store: &Arc<InMemoryStore>, public: usize, private: usize) {
        let create = CreateRoomHandler::new(store.clone());
        for i in 0..public {
            create
                .handle(CreateRoomCommand {
                    name: format!("public-{i}"),
                    visibility: RoomVisibility::Public,
                })
                .await
                .unwrap();
        }
        for i in 0..private {
            create
                .handle(CreateRoomCommand {
                    name: format!("private-{i}"),
                    visibility: RoomVisibility::Private,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn lists_only_public_rooms() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, 2, 3).await;

        let page = ListRoomsHandler::new(store.clone())
            .handle(ListRoomsQuery::default())
            .await
            .unwrap();

        assert_eq!(page.rooms.len(), 2);
        assert!(page.rooms.iter().all(|r| !r.is_private()));
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn paginates_and_reports_total_pages() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, 5, 0).await;

        let handler = ListRoomsHandler::new(store.clone());
        let first = handler
            .handle(ListRoomsQuery {
                page: 1,
                page_size: 2,
            })
            .await
            .unwrap();
        let last = handler
            .handle(ListRoomsQuery {
                page: 3,
                page_size: 2,
            })
            .await
            .unwrap();

        assert_eq!(first.rooms.len(), 2);
        assert_eq!(first.total_pages, 3);
        assert_eq!(last.rooms.len(), 1);
    }

    #[tokio::test]
    async fn newest_rooms_come_first() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, 3, 0).await;

        let page = ListRoomsHandler::new(store.clone())
            .handle(ListRoomsQuery::default())
            .await
            .unwrap();

        let ids: Vec<i64> = page.rooms.iter().map(|r| r.id().as_i64()).collect();
        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }
}
