// ============================================================================
// Locsmith - 标记文本提取器
// ============================================================================
//
// 文件: src/core/extractor.rs
// 职责: 将标记中的内联文本替换为占位符并收集到规范目录
// 边界:
//   - ✅ 文本节点和属性值识别
//   - ✅ 最小长度和已包装检查
//   - ✅ 文件内容改写（仅在有替换时）
//   - ✅ 每文件结果合并与持久化
//   - ❌ 不应包含目录扫描
//   - ❌ 不应包含输出格式化
//
// 算法设计:
// 1. 并行读取并在内存中改写每个文件，返回该文件新发现的键值对
// 2. 按路径顺序串行折叠所有键值对，检测同键不同文本
// 3. 在锁内合并到规范目录（已有条目优先）并保存
// 4. 并行写回发生了替换的文件
//
// 已知限制: 基于正则的暴力识别，不解析 AST；嵌套标记中的文本不会作为整体提取，
// 非标记代码中的 `> ... <` 片段也可能被误识别。
//
// ============================================================================

use indicatif::ProgressBar;
use rayon::prelude::*;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::catalog::{self, Catalog};
use crate::core::keygen::KeyGenerator;
use crate::models::config::Config;
use crate::models::error::PipelineError;
use crate::models::report::{ExtractReport, FileFailure, KeyCollision};
use crate::utils::constants::placeholder::{WRAPPER_END, WRAPPER_START};

/// 文本节点：`>` 与下一个 `<` 之间，不含嵌套标记和花括号
const TEXT_NODE_PATTERN: &str = r">([^<>{}]+)<";

/// 提取选项
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 最小文本长度（字符数）
    pub min_text_length: usize,
    /// 属性白名单
    pub attributes: Vec<String>,
    pub generator: KeyGenerator,
    /// 只计算不写入
    pub dry_run: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        let defaults = Config::default();
        Self::from_config(&defaults, false)
    }
}

impl ExtractOptions {
    pub fn from_config(config: &Config, dry_run: bool) -> Self {
        Self {
            min_text_length: config.extract.min_text_length,
            attributes: config.extract.attributes.clone(),
            generator: KeyGenerator::new(
                config.extract.key_prefix.clone(),
                config.extract.key_hash_length,
            ),
            dry_run,
        }
    }
}

/// 单段内容的提取结果
#[derive(Debug, Clone, Default)]
pub struct ContentExtraction {
    /// 改写后的内容
    pub content: String,
    /// (键, 文本)，按出现顺序
    pub entries: Vec<(String, String)>,
    /// 替换次数
    pub substitutions: usize,
    /// 与已有目录冲突而跳过的文本
    pub collisions: Vec<KeyCollision>,
}

/// 单个文件的提取结果
#[derive(Debug, Clone)]
pub struct FileExtraction {
    pub path: PathBuf,
    /// 改写前的内容
    pub original: String,
    pub extraction: ContentExtraction,
}

/// 生成占位符 `{t('key')}`
pub fn placeholder(key: &str) -> String {
    format!("{}{}{}", WRAPPER_START, key, WRAPPER_END)
}

/// 标记文本提取器
#[derive(Debug)]
pub struct Extractor {
    options: ExtractOptions,
    text_node: Regex,
    attribute: Option<Regex>,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Result<Self, regex::Error> {
        let text_node = Regex::new(TEXT_NODE_PATTERN)?;

        let attribute = if options.attributes.is_empty() {
            None
        } else {
            let names = options
                .attributes
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            // 属性值两种引号风格分别捕获
            Some(Regex::new(&format!(
                r#"\b({})=(?:"([^"']+)"|'([^"']+)')"#,
                names
            ))?)
        };

        Ok(Self {
            options,
            text_node,
            attribute,
        })
    }

    /// 改写一段内容；`known` 用于检测与已有条目的键冲突
    pub fn extract_content(&self, content: &str, known: &Catalog) -> ContentExtraction {
        let mut entries = Vec::new();
        let mut collisions = Vec::new();
        let mut substitutions = 0;

        let after_nodes = self.text_node.replace_all(content, |caps: &Captures| {
            let raw = &caps[1];
            let trimmed = raw.trim();
            match self.accept(trimmed, known, &mut collisions) {
                Some(key) => {
                    tracing::debug!("extracted node '{}' -> {}", trimmed, key);
                    let leading = &raw[..raw.len() - raw.trim_start().len()];
                    let trailing = &raw[raw.trim_end().len()..];
                    let replacement =
                        format!(">{}{}{}<", leading, placeholder(&key), trailing);
                    entries.push((key, trimmed.to_string()));
                    substitutions += 1;
                    replacement
                }
                None => caps[0].to_string(),
            }
        });

        let content = match &self.attribute {
            Some(attribute) => attribute
                .replace_all(&after_nodes, |caps: &Captures| {
                    let name = &caps[1];
                    let value = caps
                        .get(2)
                        .or_else(|| caps.get(3))
                        .map(|m| m.as_str())
                        .unwrap_or_default();
                    let trimmed = value.trim();
                    match self.accept(trimmed, known, &mut collisions) {
                        Some(key) => {
                            tracing::debug!("extracted attr {} '{}' -> {}", name, trimmed, key);
                            let replacement = format!("{}={}", name, placeholder(&key));
                            entries.push((key, trimmed.to_string()));
                            substitutions += 1;
                            replacement
                        }
                        None => caps[0].to_string(),
                    }
                })
                .into_owned(),
            None => after_nodes.into_owned(),
        };

        ContentExtraction {
            content,
            entries,
            substitutions,
            collisions,
        }
    }

    /// 判断文本是否应提取，返回其键
    fn accept(
        &self,
        text: &str,
        known: &Catalog,
        collisions: &mut Vec<KeyCollision>,
    ) -> Option<String> {
        if text.chars().count() < self.options.min_text_length {
            return None;
        }
        if text.contains(WRAPPER_START) {
            return None;
        }

        let key = self.options.generator.key_for(text);
        if known.contains_key(&key) && known.get(&key) != Some(text) {
            collisions.push(KeyCollision {
                kept: known.display(&key).unwrap_or_default(),
                key,
                rejected: text.to_string(),
            });
            return None;
        }
        Some(key)
    }

    /// 读取并在内存中改写单个文件
    pub fn extract_file(&self, path: &Path, known: &Catalog) -> Result<FileExtraction, PipelineError> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extraction = self.extract_content(&content, known);
        Ok(FileExtraction {
            path: path.to_path_buf(),
            original: content,
            extraction,
        })
    }

    /// 完整的提取运行
    pub fn run(
        &self,
        files: &[PathBuf],
        catalog_path: &Path,
        progress: &ProgressBar,
    ) -> Result<ExtractReport, PipelineError> {
        let known = catalog::load(catalog_path);

        let results: Vec<Result<FileExtraction, PipelineError>> = files
            .par_iter()
            .map(|path| {
                let result = self.extract_file(path, &known);
                progress.inc(1);
                result
            })
            .collect();

        let mut report = ExtractReport {
            files_scanned: files.len(),
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        let mut extracted = Vec::new();
        for result in results {
            match result {
                Ok(file) => extracted.push(file),
                Err(err) => {
                    tracing::warn!("{}", err);
                    report.failures.push(FileFailure {
                        path: failure_path(&err),
                        message: err.to_string(),
                    });
                }
            }
        }

        let (incoming, mut collisions) = fold_entries(&extracted);
        for file in &extracted {
            collisions.extend(file.extraction.collisions.iter().cloned());
        }

        // 先持久化目录，再改写文件，避免占位符指向不存在的键
        let merged = catalog::merge_and_save(catalog_path, &incoming, self.options.dry_run)?;
        collisions.extend(merged.collisions);

        // 键冲突中落败的文本留在原处：按合并后的目录重新改写这些文件
        for file in &mut extracted {
            let lost = file
                .extraction
                .entries
                .iter()
                .any(|(key, text)| merged.catalog.get(key) != Some(text.as_str()));
            if lost {
                tracing::debug!("re-extracting {} against merged catalog", file.path.display());
                file.extraction = self.extract_content(&file.original, &merged.catalog);
            }
        }

        report.keys_added = merged.added;
        report.total_keys = merged.catalog.len();
        report.collisions = collisions;
        report.substitutions = extracted.iter().map(|f| f.extraction.substitutions).sum();

        let changed: Vec<&FileExtraction> = extracted
            .iter()
            .filter(|f| f.extraction.substitutions > 0)
            .collect();

        if self.options.dry_run {
            report.files_touched = changed.iter().map(|f| f.path.clone()).collect();
            return Ok(report);
        }

        let writes: Vec<(PathBuf, Result<(), PipelineError>)> = changed
            .par_iter()
            .map(|file| {
                let result = fs::write(&file.path, &file.extraction.content).map_err(|source| {
                    PipelineError::Write {
                        path: file.path.clone(),
                        source,
                    }
                });
                (file.path.clone(), result)
            })
            .collect();

        for (path, result) in writes {
            match result {
                Ok(()) => report.files_touched.push(path),
                Err(err) => report.failures.push(FileFailure {
                    path,
                    message: err.to_string(),
                }),
            }
        }

        Ok(report)
    }
}

/// 按文件顺序折叠所有新键值对；同键不同文本时保留先出现的
pub fn fold_entries(files: &[FileExtraction]) -> (Catalog, Vec<KeyCollision>) {
    let mut incoming = Catalog::new();
    let mut collisions = Vec::new();

    for file in files {
        for (key, text) in &file.extraction.entries {
            if incoming.insert(key.clone(), text.clone()) {
                continue;
            }
            if let Some(kept) = incoming.get(key) {
                if kept != text {
                    collisions.push(KeyCollision {
                        key: key.clone(),
                        kept: kept.to_string(),
                        rejected: text.clone(),
                    });
                }
            }
        }
    }

    (incoming, collisions)
}

pub(crate) fn failure_path(err: &PipelineError) -> PathBuf {
    match err {
        PipelineError::Read { path, .. }
        | PipelineError::Write { path, .. }
        | PipelineError::Lock { path, .. }
        | PipelineError::Serialize { path, .. } => path.clone(),
        _ => PathBuf::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keygen::key_for;

    fn extractor() -> Extractor {
        Extractor::new(ExtractOptions::default()).unwrap()
    }

    #[test]
    fn replaces_text_node_with_placeholder() {
        let result = extractor().extract_content("<p>Hello World</p>", &Catalog::new());

        let key = key_for("Hello World");
        assert_eq!(result.content, format!("<p>{{t('{}')}}</p>", key));
        assert_eq!(result.entries, vec![(key, "Hello World".to_string())]);
        assert_eq!(result.substitutions, 1);
    }

    #[test]
    fn keeps_whitespace_around_text_node() {
        let result = extractor().extract_content("<h1>\n    Our Services\n  </h1>", &Catalog::new());

        let key = key_for("Our Services");
        assert_eq!(
            result.content,
            format!("<h1>\n    {{t('{}')}}\n  </h1>", key)
        );
    }

    #[test]
    fn replaces_attributes_in_both_quoting_styles() {
        let source = r#"<input placeholder="Search products" /><img alt='Company logo' src="/a.png" />"#;
        let result = extractor().extract_content(source, &Catalog::new());

        assert_eq!(
            result.content,
            format!(
                "<input placeholder={{t('{}')}} /><img alt={{t('{}')}} src=\"/a.png\" />",
                key_for("Search products"),
                key_for("Company logo")
            )
        );
        assert_eq!(result.substitutions, 2);
    }

    #[test]
    fn ignores_attributes_outside_allow_list() {
        let source = r#"<a href="/contact" className="link-primary">Go</a>"#;
        let result = extractor().extract_content(source, &Catalog::new());
        assert_eq!(result.content, source);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn short_text_is_left_untouched() {
        let source = "<button>Ok</button>";
        let result = extractor().extract_content(source, &Catalog::new());

        assert_eq!(result.content, source);
        assert!(result.entries.is_empty());
        assert_eq!(result.substitutions, 0);
    }

    #[test]
    fn nested_markup_and_expressions_are_not_extracted_as_a_unit() {
        let source = "<p>Read <b>the docs</b> for {count} items</p>";
        let result = extractor().extract_content(source, &Catalog::new());

        // 只有 "Read " 和 "the docs" 是纯文本片段
        assert_eq!(result.substitutions, 2);
        assert!(result.content.contains("{count} items</p>"));
    }

    #[test]
    fn second_pass_is_a_noop() {
        let extractor = extractor();
        let first = extractor.extract_content(
            r#"<label title="Your e-mail">Newsletter</label>"#,
            &Catalog::new(),
        );
        let second = extractor.extract_content(&first.content, &Catalog::new());

        assert_eq!(second.content, first.content);
        assert!(second.entries.is_empty());
    }

    #[test]
    fn colliding_key_is_reported_not_substituted() {
        let mut known = Catalog::new();
        known.insert(key_for("Hello World"), "Something else");

        let result = extractor().extract_content("<p>Hello World</p>", &known);

        assert_eq!(result.content, "<p>Hello World</p>");
        assert_eq!(result.collisions.len(), 1);
        assert_eq!(result.collisions[0].kept, "Something else");
    }

    #[test]
    fn fold_reports_in_run_collisions() {
        let file = |path: &str, entries: Vec<(&str, &str)>| FileExtraction {
            path: PathBuf::from(path),
            original: String::new(),
            extraction: ContentExtraction {
                entries: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                ..Default::default()
            },
        };

        let (incoming, collisions) = fold_entries(&[
            file("a.tsx", vec![("txt_1", "One"), ("txt_2", "Two")]),
            file("b.tsx", vec![("txt_1", "One"), ("txt_2", "Deux")]),
        ]);

        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming.get("txt_2"), Some("Two"));
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].rejected, "Deux");
    }

    #[test]
    fn losing_text_of_a_key_collision_stays_inline() {
        // 两段文本的 md5 前 4 位相同 (580a)
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.tsx");
        let b = dir.path().join("b.tsx");
        fs::write(&a, "<p>Label number 173</p>").unwrap();
        fs::write(&b, "<p>Label number 253</p><span>Other label</span>").unwrap();
        let catalog_path = dir.path().join("en.json");

        let options = ExtractOptions {
            generator: KeyGenerator::new("txt_", 4),
            ..Default::default()
        };
        let extractor = Extractor::new(options).unwrap();
        let report = extractor
            .run(&[a.clone(), b.clone()], &catalog_path, &ProgressBar::hidden())
            .unwrap();

        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].key, "txt_580a");
        assert_eq!(report.collisions[0].rejected, "Label number 253");
        assert_eq!(report.substitutions, 2);
        assert_eq!(fs::read_to_string(&a).unwrap(), "<p>{t('txt_580a')}</p>");

        let b_content = fs::read_to_string(&b).unwrap();
        assert!(b_content.starts_with("<p>Label number 253</p>"));
        assert!(!b_content.contains("Other label"));

        let catalog = catalog::load(&catalog_path);
        assert_eq!(catalog.get("txt_580a"), Some("Label number 173"));

        let restorer = crate::core::restorer::Restorer::new(&KeyGenerator::new("txt_", 4), false).unwrap();
        restorer.run(&[a.clone(), b.clone()], &catalog, &ProgressBar::hidden());
        assert_eq!(fs::read_to_string(&a).unwrap(), "<p>Label number 173</p>");
        assert_eq!(
            fs::read_to_string(&b).unwrap(),
            "<p>Label number 253</p><span>Other label</span>"
        );
    }

    #[test]
    fn text_claimed_under_the_lock_by_another_run_stays_inline() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.tsx");
        fs::write(&page, "<p>Hello World</p>").unwrap();
        let catalog_path = dir.path().join("en.json");

        // 模拟另一个进程在扫描之后、加锁之前写入了同键不同文本
        let mut concurrent = Catalog::new();
        concurrent.insert(key_for("Hello World"), "Written elsewhere");
        let extraction = extractor().extract_file(&page, &Catalog::new()).unwrap();
        catalog::save(&catalog_path, &concurrent).unwrap();
        let merged = catalog::merge_and_save(
            &catalog_path,
            &fold_entries(std::slice::from_ref(&extraction)).0,
            false,
        )
        .unwrap();

        assert_eq!(merged.collisions.len(), 1);
        let redone = extractor().extract_content(&extraction.original, &merged.catalog);
        assert_eq!(redone.content, "<p>Hello World</p>");
        assert_eq!(redone.substitutions, 0);
    }
}
