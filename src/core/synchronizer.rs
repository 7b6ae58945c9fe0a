// ============================================================================
// Locsmith - 语言目录同步器
// ============================================================================
//
// 文件: src/core/synchronizer.rs
// 职责: 对每个目标语言执行 差异 -> 批量翻译 -> 合并 -> 持久化
// 边界:
//   - ✅ 目标语言文件发现和语言代码绑定
//   - ✅ 每种语言一次批量翻译调用
//   - ✅ 语言间失败隔离
//   - ✅ 持久化时加锁并重新读取
//   - ❌ 不应包含具体翻译后端实现
//   - ❌ 不应包含输出格式化
//
// ============================================================================

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::core::catalog::{self, CatalogLock, Tree};
use crate::core::translator::{validate_translation, Translator};
use crate::core::tree::{self, KeyPath, TranslationUnit};
use crate::models::config::Config;
use crate::models::error::PipelineError;
use crate::models::report::{LanguageOutcome, LanguageStatus, RejectedUnit, SyncReport};

/// 同步选项
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub locales_dir: PathBuf,
    /// 源语言目录文件名
    pub source_file: String,
    /// 文件名 -> 语言代码
    pub languages: BTreeMap<String, String>,
    pub create_missing: bool,
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn from_config(config: &Config, dry_run: bool) -> Self {
        Self {
            locales_dir: config.locales_dir(),
            source_file: config.sync.source_file.clone(),
            languages: config.sync.languages.clone(),
            create_missing: config.sync.create_missing,
            dry_run,
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.locales_dir.join(&self.source_file)
    }
}

/// 语言目录同步器
pub struct Synchronizer {
    options: SyncOptions,
}

impl Synchronizer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// 待处理的目标文件名（按名称排序）
    pub fn target_files(&self) -> Vec<String> {
        let mut files = BTreeSet::new();

        let pattern = format!(
            "{}/*.json",
            glob::Pattern::escape(&self.options.locales_dir.to_string_lossy())
        );
        match glob::glob(&pattern) {
            Ok(paths) => {
                for path in paths.flatten() {
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        files.insert(name.to_string());
                    }
                }
            }
            Err(err) => tracing::warn!("invalid locales pattern {}: {}", pattern, err),
        }

        if self.options.create_missing {
            files.extend(self.options.languages.keys().cloned());
        }

        files.remove(&self.options.source_file);
        files.into_iter().collect()
    }

    /// 同步所有目标语言；单个语言失败不影响其他语言
    pub async fn run(&self, translator: &dyn Translator) -> SyncReport {
        let source = catalog::load_tree(&self.options.source_path());
        let mut report = SyncReport {
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        for file in self.target_files() {
            let outcome = self.sync_language(&file, &source, Some(translator)).await;
            report.languages.push(outcome);
        }
        report
    }

    /// 只计算每种语言缺失的单元，不调用翻译后端
    pub async fn plan(&self) -> SyncReport {
        let source = catalog::load_tree(&self.options.source_path());
        let mut report = SyncReport {
            dry_run: true,
            ..Default::default()
        };

        for file in self.target_files() {
            let outcome = self.sync_language(&file, &source, None).await;
            report.languages.push(outcome);
        }
        report
    }

    async fn sync_language(
        &self,
        file: &str,
        source: &Tree,
        translator: Option<&dyn Translator>,
    ) -> LanguageOutcome {
        let Some(code) = self.options.languages.get(file) else {
            tracing::info!("skipping {} (no language code bound)", file);
            return LanguageOutcome {
                file: file.to_string(),
                code: None,
                status: LanguageStatus::Unbound,
            };
        };

        let status = match translator.filter(|_| !self.options.dry_run) {
            Some(translator) => self.translate_file(file, code, source, translator).await,
            None => {
                let path = self.options.locales_dir.join(file);
                let missing = tree::diff(source, &catalog::load_tree(&path));
                if missing.is_empty() {
                    LanguageStatus::UpToDate
                } else {
                    LanguageStatus::Pending {
                        missing: missing.len(),
                    }
                }
            }
        };

        LanguageOutcome {
            file: file.to_string(),
            code: Some(code.clone()),
            status,
        }
    }

    async fn translate_file(
        &self,
        file: &str,
        code: &str,
        source: &Tree,
        translator: &dyn Translator,
    ) -> LanguageStatus {
        let path = self.options.locales_dir.join(file);
        let missing = tree::diff(source, &catalog::load_tree(&path));
        if missing.is_empty() {
            return LanguageStatus::UpToDate;
        }

        tracing::info!("translating {} units to {} for {}", missing.len(), code, file);
        let texts: Vec<String> = missing.iter().map(|unit| unit.text.clone()).collect();

        let translations = match translator.translate_batch(&texts, code).await {
            Ok(translations) if translations.len() == texts.len() => translations,
            Ok(translations) => {
                return failed(PipelineError::Translation {
                    code: code.to_string(),
                    message: format!(
                        "backend returned {} translations for {} texts",
                        translations.len(),
                        texts.len()
                    ),
                })
            }
            Err(err) => {
                return failed(PipelineError::Translation {
                    code: code.to_string(),
                    message: format!("{:#}", err),
                })
            }
        };

        let (accepted, rejected) = review(&missing, translations);

        match persist(&path, &accepted) {
            Ok(summary) => LanguageStatus::Updated {
                translated: summary.added,
                rejected,
                conflicts: summary.conflicts.iter().map(KeyPath::to_string).collect(),
            },
            Err(err) => failed(err),
        }
    }
}

fn failed(err: PipelineError) -> LanguageStatus {
    tracing::warn!("{}", err);
    LanguageStatus::Failed {
        message: err.to_string(),
    }
}

/// 拆分通过校验和未通过校验的译文
fn review(
    missing: &[TranslationUnit],
    translations: Vec<String>,
) -> (Vec<(KeyPath, String)>, Vec<RejectedUnit>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (unit, translated) in missing.iter().zip(translations) {
        match validate_translation(&unit.text, &translated) {
            Ok(()) => accepted.push((unit.path.clone(), translated)),
            Err(reason) => rejected.push(RejectedUnit {
                path: unit.path.to_string(),
                reason,
            }),
        }
    }

    (accepted, rejected)
}

/// 加锁、重新读取目标文件、合并并保存
fn persist(path: &Path, accepted: &[(KeyPath, String)]) -> Result<tree::MergeSummary, PipelineError> {
    let _lock = CatalogLock::acquire(path)?;
    let mut current = catalog::load_tree(path);
    let summary = tree::merge_translations(&mut current, accepted);
    if summary.added > 0 || !path.exists() {
        catalog::save_tree(path, &current)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::fs;

    /// 给译文加上语言代码后缀；`failing` 中的语言总是失败
    struct SuffixTranslator {
        failing: Vec<&'static str>,
    }

    #[async_trait]
    impl Translator for SuffixTranslator {
        async fn translate_batch(&self, texts: &[String], target_code: &str) -> Result<Vec<String>> {
            if self.failing.contains(&target_code) {
                return Err(anyhow!("model crashed"));
            }
            Ok(texts
                .iter()
                .map(|text| format!("{} [{}]", text, target_code))
                .collect())
        }
    }

    fn write_json(path: &Path, value: Value) {
        fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn options(dir: &Path) -> SyncOptions {
        SyncOptions {
            locales_dir: dir.to_path_buf(),
            source_file: "en.json".to_string(),
            languages: [("de.json", "deu_Latn"), ("fr.json", "fra_Latn")]
                .iter()
                .map(|(f, c)| (f.to_string(), c.to_string()))
                .collect(),
            create_missing: false,
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn one_failing_language_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("en.json"), json!({"hero": {"title": "Welcome"}}));
        write_json(&dir.path().join("de.json"), json!({}));
        write_json(&dir.path().join("fr.json"), json!({}));
        let de_before = fs::read_to_string(dir.path().join("de.json")).unwrap();

        let translator = SuffixTranslator {
            failing: vec!["deu_Latn"],
        };
        let report = Synchronizer::new(options(dir.path())).run(&translator).await;

        assert!(matches!(
            report.outcome("de.json").unwrap().status,
            LanguageStatus::Failed { .. }
        ));
        assert!(matches!(
            report.outcome("fr.json").unwrap().status,
            LanguageStatus::Updated { translated: 1, .. }
        ));
        assert_eq!(fs::read_to_string(dir.path().join("de.json")).unwrap(), de_before);
        assert_eq!(
            read_json(&dir.path().join("fr.json")),
            json!({"hero": {"title": "Welcome [fra_Latn]"}})
        );
        assert_eq!(report.languages_skipped(), 1);
        assert_eq!(report.units_translated(), 1);
    }

    #[tokio::test]
    async fn unbound_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("en.json"), json!({"a": "A"}));
        write_json(&dir.path().join("xx.json"), json!({}));

        let translator = SuffixTranslator { failing: vec![] };
        let report = Synchronizer::new(options(dir.path())).run(&translator).await;

        assert_eq!(report.languages.len(), 1);
        assert!(matches!(report.languages[0].status, LanguageStatus::Unbound));
        assert_eq!(read_json(&dir.path().join("xx.json")), json!({}));
    }

    #[tokio::test]
    async fn rejected_translations_are_not_merged() {
        struct DroppingTranslator;

        #[async_trait]
        impl Translator for DroppingTranslator {
            async fn translate_batch(&self, texts: &[String], _: &str) -> Result<Vec<String>> {
                Ok(texts.iter().map(|t| t.replace("{count}", "")).collect())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir.path().join("en.json"),
            json!({"cart": {"items": "{count} items", "empty": "Empty cart"}}),
        );
        write_json(&dir.path().join("fr.json"), json!({}));

        let report = Synchronizer::new(options(dir.path()))
            .run(&DroppingTranslator)
            .await;

        match &report.outcome("fr.json").unwrap().status {
            LanguageStatus::Updated {
                translated, rejected, ..
            } => {
                assert_eq!(*translated, 1);
                assert_eq!(rejected.len(), 1);
                assert_eq!(rejected[0].path, "cart.items");
            }
            other => panic!("unexpected status {:?}", other),
        }
        assert_eq!(
            read_json(&dir.path().join("fr.json")),
            json!({"cart": {"empty": "Empty cart"}})
        );
    }

    #[tokio::test]
    async fn arity_mismatch_skips_language() {
        struct ShortTranslator;

        #[async_trait]
        impl Translator for ShortTranslator {
            async fn translate_batch(&self, _: &[String], _: &str) -> Result<Vec<String>> {
                Ok(vec!["only one".to_string()])
            }
        }

        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("en.json"), json!({"a": "A", "b": "B"}));
        write_json(&dir.path().join("fr.json"), json!({}));

        let report = Synchronizer::new(options(dir.path())).run(&ShortTranslator).await;

        assert!(matches!(
            report.outcome("fr.json").unwrap().status,
            LanguageStatus::Failed { .. }
        ));
        assert_eq!(read_json(&dir.path().join("fr.json")), json!({}));
    }

    #[tokio::test]
    async fn plan_counts_missing_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("en.json"), json!({"a": "A", "b": {"c": "C"}}));
        write_json(&dir.path().join("de.json"), json!({"a": "A-de"}));
        write_json(&dir.path().join("fr.json"), json!({"a": "A-fr", "b": {"c": "C-fr"}}));

        let report = Synchronizer::new(options(dir.path())).plan().await;

        assert!(matches!(
            report.outcome("de.json").unwrap().status,
            LanguageStatus::Pending { missing: 1 }
        ));
        assert!(matches!(
            report.outcome("fr.json").unwrap().status,
            LanguageStatus::UpToDate
        ));
        assert_eq!(read_json(&dir.path().join("de.json")), json!({"a": "A-de"}));
    }

    #[tokio::test]
    async fn create_missing_writes_new_language_file() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("en.json"), json!({"a": "Hello"}));

        let mut options = options(dir.path());
        options.create_missing = true;
        let translator = SuffixTranslator { failing: vec![] };
        let report = Synchronizer::new(options).run(&translator).await;

        assert_eq!(report.languages_updated(), 2);
        assert_eq!(
            read_json(&dir.path().join("de.json")),
            json!({"a": "Hello [deu_Latn]"})
        );
    }
}
