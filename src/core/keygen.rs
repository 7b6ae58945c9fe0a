// ============================================================================
// Locsmith - 内容键生成器
// ============================================================================
//
// 文件: src/core/keygen.rs
// 职责: 由规范化文本生成确定性的内容寻址键
// 边界:
//   - ✅ MD5 摘要截断和前缀拼接
//   - ✅ 生成键识别
//   - ❌ 不应包含文本规范化（调用方负责 trim）
//   - ❌ 不应包含目录读写
//
// ============================================================================

use crate::utils::constants::{DEFAULT_KEY_HASH_LENGTH, DEFAULT_KEY_PREFIX, KEY_HASH_LENGTH_RANGE};

/// 内容键生成器
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
    hash_length: usize,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX, DEFAULT_KEY_HASH_LENGTH)
    }
}

impl KeyGenerator {
    /// 创建生成器，哈希长度会被限制在允许范围内
    pub fn new(prefix: impl Into<String>, hash_length: usize) -> Self {
        let hash_length = hash_length.clamp(*KEY_HASH_LENGTH_RANGE.start(), *KEY_HASH_LENGTH_RANGE.end());
        Self {
            prefix: prefix.into(),
            hash_length,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 由文本生成键
    pub fn key_for(&self, text: &str) -> String {
        let digest = format!("{:x}", md5::compute(text.as_bytes()));
        format!("{}{}", self.prefix, &digest[..self.hash_length])
    }

    /// 是否为生成键（前缀 + 十六进制）
    pub fn is_generated_key(&self, key: &str) -> bool {
        key.strip_prefix(self.prefix.as_str())
            .map(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_hexdigit()))
            .unwrap_or(false)
    }

    /// 匹配生成键的正则片段
    pub fn key_pattern(&self) -> String {
        format!("{}[a-f0-9]+", regex::escape(&self.prefix))
    }
}

/// 使用默认前缀和长度生成键
pub fn key_for(text: &str) -> String {
    KeyGenerator::default().key_for(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_md5_prefix_with_tag() {
        // md5("Hello World") = b10a8db164e0754105b7a99be72e3fe5
        assert_eq!(key_for("Hello World"), "txt_b10a8db1");
    }

    #[test]
    fn identical_text_yields_identical_key() {
        let generator = KeyGenerator::default();
        assert_eq!(generator.key_for("Contact us"), generator.key_for("Contact us"));
        assert_ne!(generator.key_for("Contact us"), generator.key_for("Contact Us"));
    }

    #[test]
    fn hash_length_is_clamped() {
        let short = KeyGenerator::new("txt_", 1);
        assert_eq!(short.key_for("abc").len(), "txt_".len() + 4);

        let wide = KeyGenerator::new("k_", 100);
        assert_eq!(wide.key_for("abc").len(), "k_".len() + 32);
    }

    #[test]
    fn recognizes_generated_keys() {
        let generator = KeyGenerator::default();
        assert!(generator.is_generated_key("txt_0a1b2c3d"));
        assert!(!generator.is_generated_key("txt_"));
        assert!(!generator.is_generated_key("nav.home"));
        assert!(!generator.is_generated_key("txt_hello"));
    }
}
