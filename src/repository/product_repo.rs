// ==========================================
// 产品导入 - 产品仓储 Trait
// ==========================================
// 职责: 定义产品与导入批次的数据访问接口（不包含业务逻辑）
// 实现者: InMemoryProductRepository（测试 / 命令行），真实后端适配器由调用方提供
// ==========================================

use crate::domain::import::ImportBatch;
use crate::domain::product::Product;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    // ===== 产品 =====

    /// 查询已存在的 SKU
    ///
    /// # 参数
    /// - skus: 待检查的 SKU 列表
    ///
    /// # 返回
    /// - Vec<String>: 其中已存在于仓储的 SKU（保持入参顺序）
    async fn find_existing_skus(&self, skus: &[String]) -> RepositoryResult<Vec<String>>;

    /// 批量写入产品（按 SKU 覆盖，覆盖时保留 created_at）
    ///
    /// # 返回
    /// - Ok(usize): 写入条数
    async fn upsert_products(&self, products: Vec<Product>) -> RepositoryResult<usize>;

    /// 按 SKU 查询产品
    async fn get_product(&self, sku: &str) -> RepositoryResult<Option<Product>>;

    /// 列出全部产品（按 SKU 升序）
    async fn list_products(&self) -> RepositoryResult<Vec<Product>>;

    // ===== 导入批次 =====

    /// 记录导入批次（batch_id 重复则报错）
    async fn insert_batch(&self, batch: ImportBatch) -> RepositoryResult<()>;

    /// 按 ID 查询导入批次
    async fn get_batch(&self, batch_id: &str) -> RepositoryResult<ImportBatch>;

    /// 列出全部导入批次（按写入顺序）
    async fn list_batches(&self) -> RepositoryResult<Vec<ImportBatch>>;
}
