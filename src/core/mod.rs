// ============================================================================
// Locsmith - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心流水线模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod catalog;
pub mod extractor;
pub mod keygen;
pub mod restorer;
pub mod scanner;
pub mod synchronizer;
pub mod translator;
pub mod tree;

// 重新导出常用类型
pub use catalog::{Catalog, CatalogLock, Tree};
pub use extractor::{ExtractOptions, Extractor};
pub use keygen::KeyGenerator;
pub use restorer::Restorer;
pub use scanner::{ScanResult, WorkspaceScanner};
pub use synchronizer::{SyncOptions, Synchronizer};
pub use translator::{HttpTranslator, Translator};
pub use tree::{KeyPath, TranslationUnit};
