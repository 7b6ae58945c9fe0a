// ============================================================================
// Locsmith - 工作区扫描器
// ============================================================================
//
// 文件: src/core/scanner.rs
// 职责: 递归收集目标目录下的标记文件
// 边界:
//   - ✅ 目录遍历和忽略模式过滤
//   - ✅ 扩展名过滤、去重和排序
//   - ❌ 不应读取文件内容
//   - ❌ 不应包含提取/还原逻辑
//
// ============================================================================

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::config::Config;

/// 扫描结果
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// 排序后的文件列表
    pub files: Vec<PathBuf>,
    /// 不存在的目标目录
    pub missing_dirs: Vec<PathBuf>,
}

/// 标记文件扫描器
pub struct WorkspaceScanner<'a> {
    config: &'a Config,
    root: PathBuf,
}

impl<'a> WorkspaceScanner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            root: config.workspace_root(),
            config,
        }
    }

    /// 扫描所有目标目录
    pub fn scan(&self) -> ScanResult {
        let mut files = BTreeSet::new();
        let mut missing_dirs = Vec::new();

        for target_dir in &self.config.workspace.target_dirs {
            let dir = self.config.resolve(target_dir);
            if !dir.is_dir() {
                missing_dirs.push(dir);
                continue;
            }

            for entry in WalkDir::new(&dir)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| !self.is_ignored(e.path()))
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::warn!("cannot walk {}: {}", dir.display(), err);
                        continue;
                    }
                };

                if entry.file_type().is_file() && self.has_markup_extension(entry.path()) {
                    files.insert(entry.into_path());
                }
            }
        }

        ScanResult {
            files: files.into_iter().collect(),
            missing_dirs,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let relative_path = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy();
        self.config.should_ignore_path(&relative_path)
    }

    fn has_markup_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .workspace
                    .extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_markup_files_and_skips_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for file in [
            "src/app/page.tsx",
            "src/app/nested/deep/widget.jsx",
            "src/app/styles.css",
            "src/components/Button.ts",
            "src/components/node_modules/lib/index.js",
            "src/components/dist/bundle.js",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let mut config = Config::default();
        config.workspace.root = root.to_string_lossy().to_string();
        config.workspace.target_dirs.push("src/missing".to_string());

        let result = WorkspaceScanner::new(&config).scan();

        assert_eq!(
            result.files,
            vec![
                root.join("src/app/nested/deep/widget.jsx"),
                root.join("src/app/page.tsx"),
                root.join("src/components/Button.ts"),
            ]
        );
        assert_eq!(result.missing_dirs, vec![root.join("src/missing")]);
    }

    #[test]
    fn directories_resembling_ignore_patterns_are_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for file in [
            "src/app/distributors/page.tsx",
            "src/app/.github-pages/index.tsx",
            "src/app/dist/page.tsx",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let mut config = Config::default();
        config.workspace.root = root.to_string_lossy().to_string();

        let result = WorkspaceScanner::new(&config).scan();

        assert_eq!(
            result.files,
            vec![
                root.join("src/app/.github-pages/index.tsx"),
                root.join("src/app/distributors/page.tsx"),
            ]
        );
    }
}
