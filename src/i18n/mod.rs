// ============================================================================
// Locsmith - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 工具自身界面文本的国际化
// 边界:
//   - ✅ 翻译表查找
//   - ✅ 翻译宏定义和实现
//   - ✅ 参数化翻译支持
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

/// 获取翻译文本
pub fn get_translation(key: &str) -> String {
    // 配置未初始化时（例如 init 命令）使用英文
    let language = get_language_from_config().unwrap_or_else(|| "en_us".to_string());
    translate(&language, key)
}

/// 在指定语言的表中查找，缺失时回退英文
pub fn translate(language: &str, key: &str) -> String {
    let table = match language {
        "zh_cn" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS,
    };

    lookup(table, key)
        .or_else(|| lookup(en_us::TRANSLATIONS, key))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown translation key: {}", key))
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// 从配置获取语言设置
fn get_language_from_config() -> Option<String> {
    crate::models::config::Config::get_language().ok()
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 依次替换模板中的 `{}`；已插入的参数不会再被扫描
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template.as_str();
    let mut args = args.into_iter();

    while let Some(pos) = rest.find("{}") {
        let Some(arg) = args.next() else { break };
        result.push_str(&rest[..pos]);
        result.push_str(&arg);
        rest = &rest[pos + 2..];
    }
    result.push_str(rest);
    result
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_english_key_has_a_chinese_entry() {
        for (key, _) in en_us::TRANSLATIONS {
            assert!(lookup(zh_cn::TRANSLATIONS, key).is_some(), "missing zh_cn key {}", key);
        }
    }

    #[test]
    fn arguments_are_not_rescanned() {
        let formatted = format_with_args(
            "{} keeps \"{}\", dropped \"{}\"".to_string(),
            vec!["txt_1".to_string(), "a {} b".to_string(), "c".to_string()],
        );
        assert_eq!(formatted, "txt_1 keeps \"a {} b\", dropped \"c\"");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(translate("xx", "sync.summary"), "Sync summary");
        assert_eq!(translate("zh_cn", "sync.summary"), "同步汇总");
    }
}
