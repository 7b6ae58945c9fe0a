// ============================================================================
// Locsmith - 翻译后端
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 批量翻译接口定义和 HTTP 后端实现
// 边界:
//   - ✅ 批量翻译 trait（保持顺序和数量）
//   - ✅ HTTP 后端：健康检查、鉴权、超时、指数退避重试
//   - ✅ 译文校验（变量占位符和 HTML 标签）
//   - ❌ 不应包含模型下载或转换
//   - ❌ 不应包含目录读写
//
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Duration;

use crate::models::config::TranslatorConfig;
use crate::models::error::PipelineError;

/// 批量翻译接口
///
/// 返回值必须与输入一一对应（顺序和数量都相同）。
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_batch(&self, texts: &[String], target_code: &str) -> Result<Vec<String>>;
}

/// 请求体
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    texts: &'a [String],
    source_lang: &'a str,
    target_lang: &'a str,
}

/// 响应体
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<String>,
}

/// 基于 HTTP 的翻译后端
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
    source_language: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(config: TranslatorConfig, source_language: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("failed to build HTTP client")?;

        let api_key = config
            .api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.is_empty());

        Ok(Self {
            client,
            config,
            source_language: source_language.into(),
            api_key,
        })
    }

    /// 创建并检查后端可用性；不可用视为启动失败
    pub async fn connect(
        config: TranslatorConfig,
        source_language: impl Into<String>,
    ) -> std::result::Result<Self, PipelineError> {
        let translator = Self::new(config, source_language)
            .map_err(|err| PipelineError::Setup(format!("{:#}", err)))?;
        translator.probe().await?;
        Ok(translator)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    /// 健康检查
    pub async fn probe(&self) -> std::result::Result<(), PipelineError> {
        let url = self.url(&self.config.health_path);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|err| PipelineError::Setup(format!("translation backend {} unreachable: {}", url, err)))?;

        if !response.status().is_success() {
            return Err(PipelineError::Setup(format!(
                "translation backend {} answered {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send_once(&self, texts: &[String], target_code: &str) -> Result<Vec<String>> {
        let body = TranslateRequest {
            texts,
            source_lang: &self.source_language,
            target_lang: target_code,
        };

        let response = self
            .authorized(self.client.post(self.url(&self.config.translate_path)))
            .json(&body)
            .send()
            .await
            .context("translation request failed")?
            .error_for_status()
            .context("translation backend returned an error status")?;

        let parsed: TranslateResponse = response
            .json()
            .await
            .context("invalid translation response")?;
        Ok(parsed.translations)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate_batch(&self, texts: &[String], target_code: &str) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let attempts = self.config.retry_count.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            match self.send_once(texts, target_code).await {
                Ok(translations) => return Ok(translations),
                Err(err) => {
                    tracing::warn!(
                        "translation to {} failed (attempt {}/{}): {:#}",
                        target_code,
                        attempt + 1,
                        attempts,
                        err
                    );
                    last_error = Some(err);
                    if attempt + 1 < attempts {
                        let delay = self
                            .config
                            .retry_base_delay_ms
                            .saturating_mul(2u64.saturating_pow(attempt));
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("translation failed after retries")))
    }
}

fn variable_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[^}]+\}").ok()).as_ref()
}

fn tag_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"</?[A-Za-z][^<>]*>").ok()).as_ref()
}

/// 校验译文：非空，且保留原文中的 `{变量}` 和 HTML 标签
pub fn validate_translation(source: &str, translated: &str) -> std::result::Result<(), String> {
    if translated.trim().is_empty() && !source.trim().is_empty() {
        return Err("empty translation".to_string());
    }

    let checks = [(variable_pattern(), "placeholder"), (tag_pattern(), "HTML tag")];
    for (pattern, label) in checks.into_iter().filter_map(|(p, l)| p.map(|p| (p, l))) {
        let expected: BTreeSet<&str> = pattern.find_iter(source).map(|m| m.as_str()).collect();
        let found: BTreeSet<&str> = pattern.find_iter(translated).map(|m| m.as_str()).collect();
        if let Some(lost) = expected.difference(&found).next() {
            return Err(format!("missing {}: {}", label, lost));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_translation_preserving_variables_and_tags() {
        assert!(validate_translation("Hello {name}, <b>welcome</b>", "Cześć {name}, <b>witaj</b>").is_ok());
        assert!(validate_translation("Plain text", "Zwykły tekst").is_ok());
    }

    #[test]
    fn rejects_lost_variable() {
        assert_eq!(
            validate_translation("{count} items", "elementy"),
            Err("missing placeholder: {count}".to_string())
        );
    }

    #[test]
    fn rejects_lost_tag_and_empty_output() {
        assert!(validate_translation("Press <kbd>Enter</kbd>", "Drücken Sie Enter").is_err());
        assert_eq!(
            validate_translation("Hello", "   "),
            Err("empty translation".to_string())
        );
    }

    #[test]
    fn comparison_operators_are_not_tags() {
        assert!(validate_translation("a < b > c", "a < b > c (fr)").is_ok());
        assert!(validate_translation("Use <br/> or 3 > 2", "Utilisez <br/> ou 3 > 2").is_ok());
        assert!(validate_translation("Use <br/> here", "Utilisez ici").is_err());
    }

    #[test]
    fn url_joins_endpoint_and_path() {
        let config = TranslatorConfig {
            endpoint: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        let translator = HttpTranslator::new(config, "eng_Latn").unwrap();
        assert_eq!(translator.url("/translate"), "http://localhost:9000/translate");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_setup_failure() {
        let config = TranslatorConfig {
            // 保留端口，连接必然失败
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: 2,
            ..Default::default()
        };

        let err = HttpTranslator::connect(config, "eng_Latn").await.unwrap_err();
        assert!(err.is_fatal());
    }
}
