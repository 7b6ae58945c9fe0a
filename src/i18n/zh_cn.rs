// ============================================================================
// Locsmith - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 扫描
    ("scan.found_files", "发现 {} 个标记文件"),
    ("scan.missing_dir", "目标目录不存在，已跳过: {}"),
    // 通用汇总
    ("summary.dry_run", "（预演，未写入任何文件）"),
    ("summary.failures", "{} 个文件处理失败"),
    // 提取
    ("extract.start", "开始提取内联文本..."),
    ("extract.progress", "提取中"),
    ("extract.catalog_failed", "无法更新目录 {}，未修改任何标记文件"),
    ("extract.summary", "提取汇总"),
    ("extract.files_touched", "改写文件: {} / 扫描 {}"),
    ("extract.substitutions", "插入占位符: {}"),
    ("extract.keys_added", "新增键: {}（目录共 {} 个）"),
    ("extract.catalog", "目录文件: {}"),
    ("extract.collisions", "{} 个键冲突（保留已有文本）"),
    ("extract.collision_detail", "{} 保留 \"{}\"，丢弃 \"{}\""),
    ("extract.collision_hint", "可以调大 extract.key_hash_length 扩展键空间"),
    // 还原
    ("restore.start", "开始还原内联文本..."),
    ("restore.progress", "还原中"),
    ("restore.empty_catalog", "目录 {} 为空或不存在"),
    ("restore.summary", "还原汇总"),
    ("restore.files_touched", "改写文件: {} / 扫描 {}"),
    ("restore.restored", "已还原占位符: {}"),
    ("restore.unresolved", "{} 个占位符在目录中找不到（保持原样）"),
    ("restore.unresolved_detail", "{} 位于 {}"),
    // 同步
    ("sync.start", "开始同步语言目录..."),
    ("sync.missing_source", "源语言目录 {} 不存在，没有需要翻译的内容"),
    ("sync.connecting", "连接翻译后端 {}"),
    ("sync.translating", "翻译中"),
    ("sync.summary", "同步汇总"),
    ("sync.updated", "{}: 已翻译 {} 个单元"),
    ("sync.rejected", "  已拒绝 {}: {}"),
    ("sync.conflict", "  未合并，已有值阻挡了 {}"),
    ("sync.pending", "{}: 缺失 {} 个单元"),
    ("sync.up_to_date", "{}: 已是最新"),
    ("sync.unbound", "{}: 未绑定语言代码，已跳过"),
    ("sync.failed", "{}: 已跳过（{}）"),
    ("sync.totals", "更新语言: {}，翻译单元: {}，跳过语言: {}"),
    // 清理
    ("prune.start", "开始清理生成键..."),
    ("prune.failed", "无法清理目录 {}"),
    ("prune.summary", "清理汇总"),
    ("prune.removed", "删除键: {}（剩余 {}）"),
    // 初始化
    ("init.start", "初始化配置文件..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 覆盖"),
    ("init.config_created", "已创建配置文件: {}"),
    ("init.next_steps", "编辑 [workspace] 和 [sync.languages] 后运行 `locsmith extract`"),
    ("init.create_failed", "创建配置文件失败: {}"),
];
