// ============================================================================
// Locsmith - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值
//   - ✅ 配置文件读写操作
//   - ✅ 运行时参数覆盖
//   - ❌ 不应包含提取/还原/同步逻辑
//   - ❌ 不应包含 CLI 参数解析
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::utils::constants::{DEFAULT_KEY_HASH_LENGTH, DEFAULT_KEY_PREFIX};

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// Locsmith 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 工作空间配置
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// 提取配置
    #[serde(default)]
    pub extract: ExtractConfig,
    /// 同步配置
    #[serde(default)]
    pub sync: SyncConfig,
    /// 翻译后端配置
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// 执行配置
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置（工具自身的界面语言）
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 工作空间配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// 工作区根目录
    #[serde(default = "Config::default_root")]
    pub root: String,
    /// 扫描的标记文件目录（相对工作区根目录）
    #[serde(default = "Config::default_target_dirs")]
    pub target_dirs: Vec<String>,
    /// 标记文件扩展名
    #[serde(default = "Config::default_extensions")]
    pub extensions: Vec<String>,
    /// 排除扫描的目录或文件模式
    #[serde(default = "Config::default_ignore_patterns")]
    pub ignore: Vec<String>,
}

/// 提取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// 规范目录文件（相对工作区根目录）
    #[serde(default = "Config::default_catalog")]
    pub catalog: String,
    /// 最小文本长度（字符数）
    #[serde(default = "Config::default_min_text_length")]
    pub min_text_length: usize,
    /// 需要提取的属性白名单
    #[serde(default = "Config::default_attributes")]
    pub attributes: Vec<String>,
    /// 生成键前缀
    #[serde(default = "Config::default_key_prefix")]
    pub key_prefix: String,
    /// 哈希截断长度
    #[serde(default = "Config::default_key_hash_length")]
    pub key_hash_length: usize,
}

/// 同步配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// 语言目录文件所在目录
    #[serde(default = "Config::default_locales_dir")]
    pub locales_dir: String,
    /// 源语言目录文件名
    #[serde(default = "Config::default_source_file")]
    pub source_file: String,
    /// 源语言模型代码
    #[serde(default = "Config::default_source_language")]
    pub source_language: String,
    /// 为缺失的已绑定语言创建目录文件
    #[serde(default)]
    pub create_missing: bool,
    /// 文件名 -> 模型语言代码
    #[serde(default = "Config::default_languages")]
    pub languages: BTreeMap<String, String>,
}

/// 翻译后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// 后端地址
    #[serde(default = "Config::default_endpoint")]
    pub endpoint: String,
    /// 批量翻译路径
    #[serde(default = "Config::default_translate_path")]
    pub translate_path: String,
    /// 健康检查路径
    #[serde(default = "Config::default_health_path")]
    pub health_path: String,
    /// 存放 API Key 的环境变量名
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// 请求超时时间（秒）
    #[serde(default = "Config::default_timeout")]
    pub timeout: u64,
    /// 重试次数
    #[serde(default = "Config::default_retry_count")]
    pub retry_count: u32,
    /// 重试基础延迟（毫秒），按指数退避
    #[serde(default = "Config::default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

/// 执行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// 最大并发数
    #[serde(default = "Config::default_max_concurrency")]
    pub max_concurrency: usize,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否显示进度条
    #[serde(default = "Config::default_show_progress")]
    pub show_progress: bool,
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub max_concurrency: Option<usize>,
    pub workspace_root: Option<String>,
    pub language: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_root() -> String {
        ".".to_string()
    }

    fn default_target_dirs() -> Vec<String> {
        vec!["src/app".to_string(), "src/components".to_string()]
    }

    fn default_extensions() -> Vec<String> {
        ["tsx", "jsx", "ts", "js"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// 获取默认忽略模式
    fn default_ignore_patterns() -> Vec<String> {
        vec![".git".to_string(), ".next".to_string(), "dist".to_string()]
    }

    fn default_catalog() -> String {
        "src/locales/en.json".to_string()
    }

    fn default_min_text_length() -> usize {
        3
    }

    /// 面向用户的属性
    fn default_attributes() -> Vec<String> {
        ["placeholder", "title", "alt", "aria-label"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn default_key_prefix() -> String {
        DEFAULT_KEY_PREFIX.to_string()
    }

    fn default_key_hash_length() -> usize {
        DEFAULT_KEY_HASH_LENGTH
    }

    fn default_locales_dir() -> String {
        "src/locales".to_string()
    }

    fn default_source_file() -> String {
        "en.json".to_string()
    }

    fn default_source_language() -> String {
        "eng_Latn".to_string()
    }

    /// 文件名到 FLORES-200 语言代码的默认绑定
    fn default_languages() -> BTreeMap<String, String> {
        [
            ("pl.json", "pol_Latn"),
            ("de.json", "deu_Latn"),
            ("fr.json", "fra_Latn"),
            ("es.json", "spa_Latn"),
            ("it.json", "ita_Latn"),
            ("nl.json", "nld_Latn"),
            ("pt.json", "por_Latn"),
            ("sv.json", "swe_Latn"),
            ("fi.json", "fin_Latn"),
            ("da.json", "dan_Latn"),
            ("cz.json", "ces_Latn"),
        ]
        .iter()
        .map(|(file, code)| (file.to_string(), code.to_string()))
        .collect()
    }

    fn default_endpoint() -> String {
        "http://127.0.0.1:8089".to_string()
    }

    fn default_translate_path() -> String {
        "/translate".to_string()
    }

    fn default_health_path() -> String {
        "/health".to_string()
    }

    /// 获取默认请求超时时间
    fn default_timeout() -> u64 {
        120
    }

    /// 获取默认重试次数
    fn default_retry_count() -> u32 {
        3
    }

    fn default_retry_base_delay_ms() -> u64 {
        1000
    }

    /// 获取默认最大并发数
    fn default_max_concurrency() -> usize {
        num_cpus::get()
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_colored() -> bool {
        true
    }

    /// 获取默认语言
    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(config_path: &Path) -> anyhow::Result<()> {
        let config = Self::load_from(config_path)?;
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，不存在时使用默认配置
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply_runtime_args(args);
        Ok(())
    }

    /// 将运行时参数应用到当前配置
    pub fn apply_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(max_concurrency) = args.max_concurrency {
            self.execution.max_concurrency = max_concurrency;
        }
        if let Some(workspace_root) = args.workspace_root {
            self.workspace.root = workspace_root;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        let mut template = Self::default();
        template.translator.api_key_env = Some("LOCSMITH_TRANSLATOR_KEY".to_string());
        template.save_to_file(config_path)
    }

    /// 获取当前全局配置快照
    pub fn snapshot() -> anyhow::Result<Config> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(config.clone())
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Ok(Self::snapshot()?.i18n.language)
    }

    /// 工作区根目录（"." 解析为当前目录）
    pub fn workspace_root(&self) -> PathBuf {
        if self.workspace.root == "." {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        } else {
            PathBuf::from(&self.workspace.root)
        }
    }

    /// 将相对工作区根目录的路径解析为实际路径
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root().join(path)
        }
    }

    /// 规范目录文件路径
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.extract.catalog)
    }

    /// 语言目录文件所在目录
    pub fn locales_dir(&self) -> PathBuf {
        self.resolve(&self.sync.locales_dir)
    }

    /// 检查路径是否应该被忽略
    ///
    /// 不含 `/` 的模式逐段匹配路径组件（`dist` 不会命中 `distributors`），
    /// 含 `/` 的模式匹配整个相对路径或其前缀目录。
    pub fn should_ignore_path(&self, path: &str) -> bool {
        let components: Vec<&str> = path
            .split(|c: char| c == '/' || c == '\\')
            .filter(|c| !c.is_empty())
            .collect();

        // node_modules 始终被忽略
        if components.contains(&"node_modules") {
            return true;
        }

        self.workspace.ignore.iter().any(|pattern| {
            let pattern = pattern.trim_end_matches('/');
            if pattern.is_empty() {
                return false;
            }
            let matches = |candidate: &str| match glob::Pattern::new(pattern) {
                Ok(glob) => glob.matches(candidate),
                Err(_) => candidate == pattern,
            };

            if pattern.contains('/') {
                (1..=components.len()).any(|depth| matches(components[..depth].join("/").as_str()))
            } else {
                components.iter().any(|&component| matches(component))
            }
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            extract: ExtractConfig::default(),
            sync: SyncConfig::default(),
            translator: TranslatorConfig::default(),
            execution: ExecutionConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: Config::default_root(),
            target_dirs: Config::default_target_dirs(),
            extensions: Config::default_extensions(),
            ignore: Config::default_ignore_patterns(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            catalog: Config::default_catalog(),
            min_text_length: Config::default_min_text_length(),
            attributes: Config::default_attributes(),
            key_prefix: Config::default_key_prefix(),
            key_hash_length: Config::default_key_hash_length(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            locales_dir: Config::default_locales_dir(),
            source_file: Config::default_source_file(),
            source_language: Config::default_source_language(),
            create_missing: false,
            languages: Config::default_languages(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: Config::default_endpoint(),
            translate_path: Config::default_translate_path(),
            health_path: Config::default_health_path(),
            api_key_env: None,
            timeout: Config::default_timeout(),
            retry_count: Config::default_retry_count(),
            retry_base_delay_ms: Config::default_retry_base_delay_ms(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Config::default_max_concurrency(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: false,
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}
