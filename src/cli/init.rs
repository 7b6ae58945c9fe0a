// ============================================================================
// Locsmith - 初始化命令处理
// ============================================================================
//
// 文件: src/cli/init.rs
// 职责: 处理配置文件初始化命令
// 边界:
//   - ✅ 初始化命令参数解析
//   - ✅ 默认配置文件生成
//   - ✅ 配置文件存在性检查
//   - ❌ 不应包含配置文件格式定义
//   - ❌ 不应包含配置验证逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 初始化命令参数（配置文件路径使用全局 --config）
#[derive(Debug, Args)]
pub struct InitArgs {
    /// 强制覆盖已存在的配置文件
    #[arg(long)]
    pub force: bool,
}

/// 处理初始化命令
pub fn handle_init(args: InitArgs, config_path: &Path) -> Result<()> {
    Logger::info(t!("init.start"));

    if config_path.exists() && !args.force {
        Logger::warn(tf!("init.config_exists", config_path.display()));
        Logger::info(t!("init.use_force_hint"));
        return Ok(());
    }

    match Config::create_default_config_file(config_path) {
        Ok(_) => {
            Logger::success(tf!("init.config_created", config_path.display()));
            Logger::info(t!("init.next_steps"));
        }
        Err(e) => {
            Logger::error(tf!("init.create_failed", e));
            return Err(e);
        }
    }

    Ok(())
}
