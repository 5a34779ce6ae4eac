//! The bulk discount update job.

use crate::queue::{JobHandle, JobQueue};
use loja_commerce::catalog::CatalogService;
use loja_commerce::repo::ProductRepository;
use std::sync::Arc;

/// Queue a bulk discount update: every product with stock gets a flat
/// `percent` discount.
///
/// Returns the job handle immediately. Per-product persistence failures are
/// logged and skipped inside the batch; the job still completes with a
/// message counting the products it attempted, so the handle's terminal
/// status is `Completed` even when individual updates were lost.
pub fn queue_discount_update<S>(
    queue: &JobQueue,
    catalog: Arc<CatalogService<S>>,
    percent: u8,
) -> JobHandle
where
    S: ProductRepository + Send + Sync + 'static,
{
    queue.submit("discount-update", move || {
        let report = catalog.apply_discount_to_stocked(percent)?;
        Ok(report.summary())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::JobStatus;
    use loja_commerce::money::Money;
    use loja_commerce::repo::ProductRepository;
    use loja_store::MemoryStore;
    use std::time::Duration;

    async fn wait_for_terminal(queue: &JobQueue, handle: JobHandle) -> JobStatus {
        for _ in 0..100 {
            match queue.status(&handle.id) {
                Some(status @ (JobStatus::Completed(_) | JobStatus::Failed(_))) => return status,
                _ => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
        panic!("discount job did not finish in time");
    }

    #[tokio::test]
    async fn test_discount_job_updates_stocked_products() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(CatalogService::new(Arc::clone(&store)));
        let stocked = catalog
            .create_product("Stocked", "s", Money::from_cents(1000), 5)
            .unwrap();
        let sold_out = catalog
            .create_product("Sold out", "s", Money::from_cents(1000), 0)
            .unwrap();

        let queue = JobQueue::new();
        let handle = queue_discount_update(&queue, Arc::clone(&catalog), 20);

        let status = wait_for_terminal(&queue, handle).await;
        assert!(matches!(status, JobStatus::Completed(msg) if msg.contains("20%")));

        assert_eq!(store.product(&stocked.id).unwrap().discount_percent, 20);
        assert_eq!(store.product(&sold_out.id).unwrap().discount_percent, 0);
    }

    #[tokio::test]
    async fn test_discount_job_fails_on_out_of_range_percent() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(CatalogService::new(store));

        let queue = JobQueue::new();
        let handle = queue_discount_update(&queue, catalog, 150);

        let status = wait_for_terminal(&queue, handle).await;
        assert!(matches!(status, JobStatus::Failed(_)));
    }
}
