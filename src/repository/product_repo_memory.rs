// ==========================================
// 产品导入 - 内存产品仓储实现
// ==========================================
// 用途: 测试与命令行使用的内存适配器
// 并发: Arc<Mutex<..>> 共享，克隆后指向同一份数据
// ==========================================

use crate::domain::import::ImportBatch;
use crate::domain::product::Product;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::ProductRepository;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<String, Product>,
    batches: Vec<ImportBatch>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_existing_skus(&self, skus: &[String]) -> RepositoryResult<Vec<String>> {
        let store = self.lock()?;
        Ok(skus
            .iter()
            .filter(|sku| store.products.contains_key(sku.as_str()))
            .cloned()
            .collect())
    }

    async fn upsert_products(&self, products: Vec<Product>) -> RepositoryResult<usize> {
        let mut store = self.lock()?;
        let count = products.len();

        for mut product in products {
            if let Some(existing) = store.products.get(&product.sku) {
                product.created_at = existing.created_at;
            }
            store.products.insert(product.sku.clone(), product);
        }

        debug!(count, total = store.products.len(), "产品写入完成");
        Ok(count)
    }

    async fn get_product(&self, sku: &str) -> RepositoryResult<Option<Product>> {
        let store = self.lock()?;
        Ok(store.products.get(sku).cloned())
    }

    async fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        let store = self.lock()?;
        Ok(store.products.values().cloned().collect())
    }

    async fn insert_batch(&self, batch: ImportBatch) -> RepositoryResult<()> {
        let mut store = self.lock()?;
        if store.batches.iter().any(|b| b.batch_id == batch.batch_id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "batch_id={}",
                batch.batch_id
            )));
        }
        store.batches.push(batch);
        Ok(())
    }

    async fn get_batch(&self, batch_id: &str) -> RepositoryResult<ImportBatch> {
        let store = self.lock()?;
        store
            .batches
            .iter()
            .find(|b| b.batch_id == batch_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "ImportBatch".to_string(),
                id: batch_id.to_string(),
            })
    }

    async fn list_batches(&self) -> RepositoryResult<Vec<ImportBatch>> {
        let store = self.lock()?;
        Ok(store.batches.clone())
    }
}
