// ============================================================================
// Locsmith - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 全局参数到运行时配置的转换
//   - ✅ 命令路由分发
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含流水线逻辑
//
// ============================================================================

pub mod extract;
pub mod init;
pub mod prune;
pub mod restore;
pub mod sync;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::config::{Config, RuntimeArgs};
use crate::utils::colors::Colors;
use crate::utils::constants::CONFIG_FILE_NAME;
use crate::utils::logger::Logger;
use extract::{handle_extract, ExtractArgs};
use init::{handle_init, InitArgs};
use prune::{handle_prune, PruneArgs};
use restore::{handle_restore, RestoreArgs};
use sync::{handle_sync, SyncArgs};

/// Locsmith - Extract, restore and machine-translate UI strings
#[derive(Debug, Parser)]
#[command(name = "locsmith")]
#[command(about = "Extract hard-coded UI text into a translation catalog and keep locales in sync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Workspace root directory
    #[arg(short = 'C', long, global = true)]
    pub workspace_root: Option<String>,

    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Maximum concurrency
    #[arg(short = 'j', long, global = true)]
    pub max_concurrency: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replace inline text with placeholders and grow the catalog
    Extract(ExtractArgs),
    /// Put catalog text back in place of placeholders
    Restore(RestoreArgs),
    /// Translate missing keys into every target locale
    Sync(SyncArgs),
    /// Remove generated keys from the catalog
    Prune(PruneArgs),
    /// Initialize configuration file
    Init(InitArgs),
}

/// 汇总输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let runtime_args = build_runtime_args(&cli);

    // init 在配置文件损坏或不存在时也必须可用
    let command = match cli.command {
        Commands::Init(args) => return handle_init(args, &cli.config),
        command => command,
    };

    // JSON 汇总独占 stdout
    Logger::set_diagnostics_to_stderr(command_format(&command) == OutputFormat::Json);

    Config::initialize(&cli.config)
        .with_context(|| format!("cannot load configuration {}", cli.config.display()))?;
    Config::merge_runtime_args(runtime_args)?;

    let config = Config::snapshot()?;
    Colors::set_enabled(config.output.colored);
    Logger::init_tracing(config.output.verbose);

    let root = config.workspace_root();
    if !root.is_dir() {
        anyhow::bail!("workspace root {} is not a directory", root.display());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.execution.max_concurrency.max(1))
        .build()
        .context("cannot start worker pool")?;

    match command {
        Commands::Extract(args) => pool.install(|| handle_extract(args, &config)),
        Commands::Restore(args) => pool.install(|| handle_restore(args, &config)),
        Commands::Sync(args) => handle_sync(args, &config).await,
        Commands::Prune(args) => handle_prune(args, &config),
        Commands::Init(_) => Ok(()),
    }
}

/// 命令选择的汇总输出格式
fn command_format(command: &Commands) -> OutputFormat {
    match command {
        Commands::Extract(args) => args.format,
        Commands::Restore(args) => args.format,
        Commands::Sync(args) => args.format,
        Commands::Prune(_) | Commands::Init(_) => OutputFormat::Table,
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        max_concurrency: cli.max_concurrency,
        workspace_root: cli.workspace_root.clone(),
        language: cli.language.clone(),
    }
}
