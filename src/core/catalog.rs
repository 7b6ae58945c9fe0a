// ============================================================================
// Locsmith - 规范目录存储
// ============================================================================
//
// 文件: src/core/catalog.rs
// 职责: 规范（源语言）目录的加载、合并、持久化和文件锁
// 边界:
//   - ✅ JSON 目录读写（保持 Unicode 原样）
//   - ✅ 已有条目优先的合并
//   - ✅ 持久化期间的建议性排他锁
//   - ✅ 生成键清理
//   - ❌ 不应包含标记文件扫描
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

use fs2::FileExt;
use serde_json::{Map, Value};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::core::keygen::KeyGenerator;
use crate::models::error::PipelineError;
use crate::models::report::KeyCollision;
use crate::utils::constants::LOCK_SUFFIX;

/// JSON 对象树
pub type Tree = Map<String, Value>;

/// 键 -> 文本目录
///
/// 底层保留完整的 JSON 对象，手写的嵌套命名空间在
/// 加载、合并、保存过程中原样保留；按键查找只看字符串叶子。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Tree,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tree(entries: Tree) -> Self {
        Self { entries }
    }

    /// 获取键对应的文本
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// 键对应值的可读形式（非字符串值按 JSON 输出）
    pub fn display(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(display_value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 插入新条目；键已存在时不做任何修改并返回 false
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, Value::String(text.into()));
        true
    }

    /// 覆盖写入
    pub fn overwrite(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), Value::String(text.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_tree(&self) -> &Tree {
        &self.entries
    }

    /// 删除所有生成键条目，返回删除数量
    pub fn prune_generated(&mut self, generator: &KeyGenerator) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !generator.is_generated_key(key));
        before - self.entries.len()
    }
}

/// 合并结果
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    /// 新增键数
    pub added: usize,
    /// 同键不同文本（已有条目保留）
    pub collisions: Vec<KeyCollision>,
}

/// 合并目录：键冲突时保留已有条目，只添加新键
pub fn merge(existing: &Catalog, incoming: &Catalog) -> MergeOutcome {
    let mut merged = existing.clone();
    let mut added = 0;
    let mut collisions = Vec::new();

    for (key, value) in &incoming.entries {
        match existing.entries.get(key) {
            None => {
                merged.entries.insert(key.clone(), value.clone());
                added += 1;
            }
            Some(current) if current != value => collisions.push(KeyCollision {
                key: key.clone(),
                kept: display_value(current),
                rejected: display_value(value),
            }),
            Some(_) => {}
        }
    }

    MergeOutcome {
        catalog: merged,
        added,
        collisions,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// 加载 JSON 对象树；文件不存在或格式错误时返回空树
pub fn load_tree(path: &Path) -> Tree {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("cannot read catalog {}: {}", path.display(), err);
            }
            return Tree::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(tree)) => tree,
        Ok(_) => {
            tracing::warn!("catalog {} is not a JSON object, treating as empty", path.display());
            Tree::new()
        }
        Err(err) => {
            tracing::warn!("catalog {} is malformed ({}), treating as empty", path.display(), err);
            Tree::new()
        }
    }
}

/// 加载规范目录
pub fn load(path: &Path) -> Catalog {
    Catalog::from_tree(load_tree(path))
}

/// 以带缩进的 JSON 写回（先写临时文件再重命名）
pub fn save_tree(path: &Path, tree: &Tree) -> Result<(), PipelineError> {
    let mut content = serde_json::to_string_pretty(tree).map_err(|source| {
        PipelineError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;
    content.push('\n');

    let write_err = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = sibling_path(path, "tmp");
    fs::write(&tmp_path, content).map_err(write_err)?;
    fs::rename(&tmp_path, path).map_err(write_err)
}

/// 保存规范目录
pub fn save(path: &Path, catalog: &Catalog) -> Result<(), PipelineError> {
    save_tree(path, catalog.as_tree())
}

/// 在锁内重新读取、合并并保存
pub fn merge_and_save(
    path: &Path,
    incoming: &Catalog,
    dry_run: bool,
) -> Result<MergeOutcome, PipelineError> {
    let _lock = CatalogLock::acquire(path)?;
    let existing = load(path);
    let outcome = merge(&existing, incoming);
    if !dry_run && outcome.added > 0 {
        save(path, &outcome.catalog)?;
    }
    Ok(outcome)
}

/// 在锁内删除所有生成键条目，返回 (删除数, 剩余数)
pub fn prune_and_save(
    path: &Path,
    generator: &KeyGenerator,
    dry_run: bool,
) -> Result<(usize, usize), PipelineError> {
    let _lock = CatalogLock::acquire(path)?;
    let mut catalog = load(path);
    let removed = catalog.prune_generated(generator);
    if !dry_run && removed > 0 {
        save(path, &catalog)?;
    }
    Ok((removed, catalog.len()))
}

/// `en.json` -> `en.json.<suffix>`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// 目录文件的建议性排他锁，离开作用域时释放
#[derive(Debug)]
pub struct CatalogLock {
    file: File,
    path: PathBuf,
}

impl CatalogLock {
    /// 阻塞直到获得锁
    pub fn acquire(catalog_path: &Path) -> Result<Self, PipelineError> {
        let path = sibling_path(catalog_path, LOCK_SUFFIX);
        let lock_err = |source| PipelineError::Lock {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(lock_err)?;
        FileExt::lock_exclusive(&file).map_err(lock_err)?;

        tracing::debug!("locked {}", path.display());
        Ok(Self { file, path })
    }
}

impl Drop for CatalogLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            tracing::warn!("cannot unlock {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(value: Value) -> Catalog {
        match value {
            Value::Object(tree) => Catalog::from_tree(tree),
            _ => unreachable!(),
        }
    }

    #[test]
    fn existing_entries_win_on_merge() {
        let existing = catalog(json!({"k1": "A"}));
        let incoming = catalog(json!({"k1": "B", "k2": "C"}));

        let outcome = merge(&existing, &incoming);

        assert_eq!(outcome.catalog, catalog(json!({"k1": "A", "k2": "C"})));
        assert_eq!(outcome.added, 1);
        assert_eq!(
            outcome.collisions,
            vec![KeyCollision {
                key: "k1".to_string(),
                kept: "A".to_string(),
                rejected: "B".to_string(),
            }]
        );
    }

    #[test]
    fn insert_is_noop_for_existing_key() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert("k", "first"));
        assert!(!catalog.insert("k", "second"));
        assert_eq!(catalog.get("k"), Some("first"));

        catalog.overwrite("k", "third");
        assert_eq!(catalog.get("k"), Some("third"));
    }

    #[test]
    fn missing_and_malformed_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).is_empty());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(load(&broken).is_empty());

        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();
        assert!(load(&array).is_empty());
    }

    #[test]
    fn save_keeps_unicode_and_nested_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locales").join("en.json");
        let original = catalog(json!({
            "nav": {"home": "Home"},
            "txt_1234abcd": "Zażółć gęślą jaźń · 東京"
        }));

        save(&path, &original).unwrap();
        let raw = fs::read_to_string(&path).unwrap();

        assert!(raw.contains("Zażółć gęślą jaźń · 東京"));
        assert!(raw.ends_with('\n'));
        assert_eq!(load(&path), original);
        assert_eq!(load(&path).get("nav"), None);
    }

    #[test]
    fn merge_and_save_rereads_file_under_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, r#"{"k1": "A"}"#).unwrap();

        let incoming = catalog(json!({"k2": "B"}));
        let outcome = merge_and_save(&path, &incoming, false).unwrap();

        assert_eq!(outcome.added, 1);
        assert_eq!(load(&path), catalog(json!({"k1": "A", "k2": "B"})));
        assert!(dir.path().join("en.json.lock").exists());
    }

    #[test]
    fn dry_run_merge_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, r#"{"k1": "A"}"#).unwrap();

        let outcome = merge_and_save(&path, &catalog(json!({"k2": "B"})), true).unwrap();

        assert_eq!(outcome.added, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"k1": "A"}"#);
    }

    #[test]
    fn prune_removes_only_generated_keys() {
        let mut catalog = catalog(json!({
            "txt_0011aabb": "generated",
            "nav": {"home": "Home"},
            "title": "Hand written"
        }));

        let removed = catalog.prune_generated(&KeyGenerator::default());

        assert_eq!(removed, 1);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.contains_key("txt_0011aabb"));
    }

    #[test]
    fn concurrent_merges_keep_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");

        std::thread::scope(|scope| {
            for writer in ["a", "b"] {
                let path = &path;
                scope.spawn(move || {
                    for i in 0..25 {
                        let mut incoming = Catalog::new();
                        incoming.insert(format!("{}_{}", writer, i), format!("{} {}", writer, i));
                        merge_and_save(path, &incoming, false).unwrap();
                    }
                });
            }
        });

        let merged = load(&path);
        assert_eq!(merged.len(), 50);
        assert_eq!(merged.get("a_24"), Some("a 24"));
        assert_eq!(merged.get("b_0"), Some("b 0"));
    }
}
