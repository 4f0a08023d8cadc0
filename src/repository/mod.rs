// ==========================================
// 汽修门店管理系统 - 数据仓储层
// ==========================================
// 职责: 只读数据访问（SQLite 镜像库 / 导出文件）
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod error;
pub mod snapshot_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use snapshot_repo::{FileSnapshotSource, ShopSnapshotRepository, SnapshotSource};
