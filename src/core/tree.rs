// ============================================================================
// Locsmith - 语言目录树差异与合并
// ============================================================================
//
// 文件: src/core/tree.rs
// 职责: 计算源目录树相对目标目录树缺失的叶子，并把翻译结果合并回目标树
// 边界:
//   - ✅ 递归结构差异（类型不匹配视为空子树）
//   - ✅ 只新增、不覆盖的深度合并
//   - ❌ 不应包含文件读写
//   - ❌ 不应包含翻译调用
//
// ============================================================================

use serde_json::Value;
use std::fmt;

use crate::core::catalog::Tree;

/// 键路径（逐段保存，键本身可以包含点号）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// 按点号拆分
    pub fn parse(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// 待翻译单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub path: KeyPath,
    pub text: String,
}

/// 找出源树中目标树缺失的字符串叶子（按源树顺序）
pub fn diff(source: &Tree, target: &Tree) -> Vec<TranslationUnit> {
    let mut missing = Vec::new();
    collect_missing(source, Some(target), &KeyPath::default(), &mut missing);
    missing
}

fn collect_missing(
    source: &Tree,
    target: Option<&Tree>,
    prefix: &KeyPath,
    missing: &mut Vec<TranslationUnit>,
) {
    for (key, value) in source {
        match value {
            Value::Object(subtree) => {
                // 缺失或类型不匹配都视为空子树
                let target_subtree = target.and_then(|t| t.get(key)).and_then(Value::as_object);
                collect_missing(subtree, target_subtree, &prefix.child(key), missing);
            }
            Value::String(text) => {
                // 只要目标中存在该键，无论值是什么都视为已翻译
                if !target.map(|t| t.contains_key(key)).unwrap_or(false) {
                    missing.push(TranslationUnit {
                        path: prefix.child(key),
                        text: text.clone(),
                    });
                }
            }
            _ => {}
        }
    }
}

/// 合并结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// 新增叶子数
    pub added: usize,
    /// 路径被已有非对象值阻挡而未合并
    pub conflicts: Vec<KeyPath>,
}

/// 由 (路径, 文本) 构建嵌套结构
pub fn build_updates(entries: &[(KeyPath, String)]) -> Tree {
    let mut updates = Tree::new();
    for (path, text) in entries {
        insert_path(&mut updates, path.segments(), text);
    }
    updates
}

fn insert_path(tree: &mut Tree, segments: &[String], text: &str) {
    match segments {
        [] => {}
        [leaf] => {
            tree.entry(leaf.clone())
                .or_insert_with(|| Value::String(text.to_string()));
        }
        [head, rest @ ..] => {
            let entry = tree
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Tree::new()));
            if let Value::Object(next) = entry {
                insert_path(next, rest, text);
            }
        }
    }
}

/// 深度合并：已有分支和叶子保持不变，只添加新路径
pub fn deep_merge(target: &mut Tree, updates: Tree) -> MergeSummary {
    let mut summary = MergeSummary::default();
    merge_into(target, updates, &KeyPath::default(), &mut summary);
    summary
}

fn merge_into(target: &mut Tree, updates: Tree, prefix: &KeyPath, summary: &mut MergeSummary) {
    for (key, value) in updates {
        let path = prefix.child(&key);
        match value {
            Value::Object(subtree) => {
                let entry = target
                    .entry(key)
                    .or_insert_with(|| Value::Object(Tree::new()));
                match entry {
                    Value::Object(existing) => merge_into(existing, subtree, &path, summary),
                    _ => collect_conflicts(&subtree, &path, &mut summary.conflicts),
                }
            }
            leaf => {
                if !target.contains_key(&key) {
                    target.insert(key, leaf);
                    summary.added += 1;
                }
            }
        }
    }
}

fn collect_conflicts(subtree: &Tree, prefix: &KeyPath, conflicts: &mut Vec<KeyPath>) {
    for (key, value) in subtree {
        let path = prefix.child(key);
        match value {
            Value::Object(inner) => collect_conflicts(inner, &path, conflicts),
            _ => conflicts.push(path),
        }
    }
}

/// 构建并合并翻译结果
pub fn merge_translations(target: &mut Tree, entries: &[(KeyPath, String)]) -> MergeSummary {
    deep_merge(target, build_updates(entries))
}
