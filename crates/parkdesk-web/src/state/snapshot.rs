use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{AppError, AppResult};

/// Issued before a fetch starts; identifies how recent its result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

struct Stored<T> {
    committed: u64,
    data: Option<Arc<T>>,
}

/// Holds the last fully fetched copy of one remote resource.
///
/// Results are replaced wholesale. A result is only committed if no fetch
/// that started later has already been committed, so overlapping fetches
/// resolve to the newest request rather than the slowest response.
pub struct SnapshotCell<T> {
    next: AtomicU64,
    slot: Mutex<Stored<T>>,
}

impl<T> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self {
            next: AtomicU64::new(1),
            slot: Mutex::new(Stored {
                committed: 0,
                data: None,
            }),
        }
    }
}

impl<T> SnapshotCell<T> {
    pub fn ticket(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Replaces the snapshot unless a newer ticket already landed.
    /// Returns whether `data` was stored.
    pub fn commit(&self, ticket: Ticket, data: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        if ticket.0 <= slot.committed {
            return false;
        }
        slot.committed = ticket.0;
        slot.data = Some(Arc::new(data));
        true
    }

    pub fn current(&self) -> Option<Arc<T>> {
        let slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        slot.data.clone()
    }

    /// Runs `fetch` and commits its result, returning whatever snapshot is
    /// current afterwards. On error the previous snapshot is left untouched.
    pub async fn refresh<F>(&self, resource: &str, fetch: F) -> AppResult<Arc<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let ticket = self.ticket();
        let data = fetch.await?;
        if !self.commit(ticket, data) {
            tracing::debug!("Dropped stale {resource} snapshot (ticket {})", ticket.0);
        }
        self.current()
            .ok_or_else(|| AppError::Internal(format!("{resource} snapshot missing after commit")))
    }

    /// Current snapshot, fetching one first if none exists yet.
    pub async fn get_or_refresh<F>(&self, resource: &str, fetch: F) -> AppResult<Arc<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        match self.current() {
            Some(data) => Ok(data),
            None => self.refresh(resource, fetch).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_wins_regardless_of_completion_order() {
        let cell = SnapshotCell::<Vec<&str>>::default();
        let first = cell.ticket();
        let second = cell.ticket();

        assert!(cell.commit(second, vec!["fresh"]));
        assert!(!cell.commit(first, vec!["stale"]));
        assert_eq!(*cell.current().unwrap(), vec!["fresh"]);
    }

    #[test]
    fn commit_replaces_wholesale() {
        let cell = SnapshotCell::<Vec<i32>>::default();
        cell.commit(cell.ticket(), vec![1, 2, 3]);
        cell.commit(cell.ticket(), vec![9]);
        assert_eq!(*cell.current().unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let cell = SnapshotCell::<Vec<i32>>::default();
        cell.refresh("numbers", async { Ok(vec![1]) }).await.unwrap();

        let err = cell
            .refresh("numbers", async { Err(AppError::Internal("down".into())) })
            .await;
        assert!(err.is_err());
        assert_eq!(*cell.current().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn get_or_refresh_does_not_refetch_existing_snapshot() {
        let cell = SnapshotCell::<Vec<i32>>::default();
        cell.refresh("numbers", async { Ok(vec![1]) }).await.unwrap();

        let data = cell
            .get_or_refresh("numbers", async { Ok(vec![2]) })
            .await
            .unwrap();
        assert_eq!(*data, vec![1]);
    }

    #[tokio::test]
    async fn overlapping_refreshes_keep_the_latest_started() {
        let cell = Arc::new(SnapshotCell::<Vec<&'static str>>::default());
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let slow = tokio::spawn({
            let cell = cell.clone();
            async move {
                cell.refresh("items", async move {
                    let _ = started_tx.send(());
                    let _ = release_rx.await;
                    Ok(vec!["stale"])
                })
                .await
            }
        });

        started_rx.await.unwrap();
        let fresh = cell.refresh("items", async { Ok(vec!["fresh"]) }).await.unwrap();
        release_tx.send(()).unwrap();
        let late = slow.await.unwrap().unwrap();

        assert_eq!(*fresh, vec!["fresh"]);
        assert_eq!(*late, vec!["fresh"]);
        assert_eq!(*cell.current().unwrap(), vec!["fresh"]);
    }
}
