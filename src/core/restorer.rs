// ============================================================================
// Locsmith - 标记文本还原器
// ============================================================================
//
// 文件: src/core/restorer.rs
// 职责: 将占位符按规范目录还原为内联文本（提取的逆操作）
// 边界:
//   - ✅ 文本节点占位符和属性占位符识别
//   - ✅ 目录查找和内联还原
//   - ✅ 未知键诊断（占位符原样保留）
//   - ❌ 不应修改规范目录
//   - ❌ 不应包含目录扫描
//
// ============================================================================

use indicatif::ProgressBar;
use rayon::prelude::*;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::catalog::Catalog;
use crate::core::extractor::failure_path;
use crate::core::keygen::KeyGenerator;
use crate::models::error::PipelineError;
use crate::models::report::{FileFailure, RestoreReport, UnresolvedPlaceholder};

/// 单段内容的还原结果
#[derive(Debug, Clone, Default)]
pub struct ContentRestoration {
    pub content: String,
    /// 已还原的占位符数
    pub restored: usize,
    /// 目录中找不到的键，按出现顺序
    pub unresolved: Vec<String>,
}

/// 标记文本还原器
#[derive(Debug)]
pub struct Restorer {
    text_node: Regex,
    attribute: Regex,
    dry_run: bool,
}

impl Restorer {
    pub fn new(generator: &KeyGenerator, dry_run: bool) -> Result<Self, regex::Error> {
        let key = generator.key_pattern();
        // >{t('key')}<，占位符两侧的空白原样保留
        let text_node = Regex::new(&format!(r">(\s*)\{{t\('({})'\)\}}(\s*)<", key))?;
        // ={t('key')}
        let attribute = Regex::new(&format!(r"=\{{t\('({})'\)\}}", key))?;

        Ok(Self {
            text_node,
            attribute,
            dry_run,
        })
    }

    /// 还原一段内容
    pub fn restore_content(&self, content: &str, catalog: &Catalog) -> ContentRestoration {
        let mut restored = 0;
        let mut unresolved = Vec::new();

        let after_nodes = self.text_node.replace_all(content, |caps: &Captures| {
            let key = &caps[2];
            match catalog.get(key) {
                Some(text) => {
                    restored += 1;
                    format!(">{}{}{}<", &caps[1], text, &caps[3])
                }
                None => {
                    unresolved.push(key.to_string());
                    caps[0].to_string()
                }
            }
        });

        let content = self
            .attribute
            .replace_all(&after_nodes, |caps: &Captures| {
                let key = &caps[1];
                match catalog.get(key) {
                    Some(text) => {
                        restored += 1;
                        // 还原时统一使用双引号
                        format!("=\"{}\"", text.replace('"', "&quot;"))
                    }
                    None => {
                        unresolved.push(key.to_string());
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        ContentRestoration {
            content,
            restored,
            unresolved,
        }
    }

    /// 还原单个文件，有还原时写回
    pub fn restore_file(
        &self,
        path: &Path,
        catalog: &Catalog,
    ) -> Result<ContentRestoration, PipelineError> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let restoration = self.restore_content(&content, catalog);
        if restoration.restored > 0 && !self.dry_run {
            fs::write(path, &restoration.content).map_err(|source| PipelineError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(restoration)
    }

    /// 完整的还原运行
    pub fn run(&self, files: &[PathBuf], catalog: &Catalog, progress: &ProgressBar) -> RestoreReport {
        let results: Vec<(PathBuf, Result<ContentRestoration, PipelineError>)> = files
            .par_iter()
            .map(|path| {
                let result = self.restore_file(path, catalog);
                progress.inc(1);
                (path.clone(), result)
            })
            .collect();

        let mut report = RestoreReport {
            files_scanned: files.len(),
            dry_run: self.dry_run,
            ..Default::default()
        };

        for (path, result) in results {
            match result {
                Ok(restoration) => {
                    for key in restoration.unresolved {
                        tracing::warn!("key {} not found for {}", key, path.display());
                        report.unresolved.push(UnresolvedPlaceholder {
                            path: path.clone(),
                            key,
                        });
                    }
                    if restoration.restored > 0 {
                        report.restored += restoration.restored;
                        report.files_touched.push(path);
                    }
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    report.failures.push(FileFailure {
                        path: failure_path(&err),
                        message: err.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keygen::key_for;

    fn restorer() -> Restorer {
        Restorer::new(&KeyGenerator::default(), false).unwrap()
    }

    fn catalog(pairs: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (key, text) in pairs {
            catalog.insert(key.to_string(), text.to_string());
        }
        catalog
    }

    #[test]
    fn restores_text_node() {
        let key = key_for("Hello World");
        let catalog = catalog(&[(&key, "Hello World")]);

        let result = restorer().restore_content(&format!("<p>{{t('{}')}}</p>", key), &catalog);

        assert_eq!(result.content, "<p>Hello World</p>");
        assert_eq!(result.restored, 1);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn restores_attribute_with_double_quotes_escaped() {
        let catalog = catalog(&[("txt_00aa11bb", r#"Say "hi""#)]);

        let result = restorer().restore_content("<input title={t('txt_00aa11bb')} />", &catalog);

        assert_eq!(result.content, r#"<input title="Say &quot;hi&quot;" />"#);
    }

    #[test]
    fn unknown_key_is_left_verbatim() {
        let catalog = catalog(&[("txt_00aa11bb", "Known")]);
        let source = "<p>{t('txt_deadbeef')}</p><span>{t('txt_00aa11bb')}</span>";

        let result = restorer().restore_content(source, &catalog);

        assert_eq!(result.content, "<p>{t('txt_deadbeef')}</p><span>Known</span>");
        assert_eq!(result.restored, 1);
        assert_eq!(result.unresolved, vec!["txt_deadbeef".to_string()]);
    }

    #[test]
    fn hand_written_keys_are_not_touched() {
        let catalog = catalog(&[("nav.home", "Home")]);
        let source = "<a>{t('nav.home')}</a>";

        let result = restorer().restore_content(source, &catalog);

        assert_eq!(result.content, source);
        assert_eq!(result.restored, 0);
    }

    #[test]
    fn file_without_resolved_placeholders_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.tsx");
        fs::write(&path, "<p>{t('txt_deadbeef')}</p>").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let result = restorer().restore_file(&path, &Catalog::new()).unwrap();

        assert_eq!(result.restored, 0);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }
}
