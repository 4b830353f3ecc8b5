// ==========================================
// 产品导入 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 以注入接口替代全局状态，屏蔽存储细节
// ==========================================

pub mod error;
pub mod product_repo;
pub mod product_repo_memory;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use product_repo::ProductRepository;
pub use product_repo_memory::InMemoryProductRepository;
