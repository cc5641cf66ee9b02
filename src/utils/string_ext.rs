//! 字符串扩展工具模块
//!
//! 提供表单输入和模型输出常用的字符串处理辅助函数

/// 按字符截断字符串，超出部分以省略号结尾
///
/// 用于日志中输出模型原始响应，避免按字节切片截断多字节字符
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}... ({} chars total)", &s[..idx], s.chars().count()),
        None => s.to_string(),
    }
}

/// 字符串清理扩展 trait
pub trait StringExt {
    /// 清理字符串并返回 Option，空字符串返回 None
    fn clean(&self) -> Option<String>;

    /// 清理字符串，返回清理后的字符串
    fn trimmed(&self) -> String;

    /// 首个字符（用于书籍封面占位）
    fn initial(&self) -> Option<char>;
}

impl StringExt for str {
    #[inline]
    fn clean(&self) -> Option<String> {
        let trimmed = self.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    }

    #[inline]
    fn trimmed(&self) -> String {
        self.trim().to_string()
    }

    #[inline]
    fn initial(&self) -> Option<char> {
        self.trim_start().chars().next()
    }
}

impl StringExt for String {
    #[inline]
    fn clean(&self) -> Option<String> {
        self.as_str().clean()
    }

    #[inline]
    fn trimmed(&self) -> String {
        self.as_str().trimmed()
    }

    #[inline]
    fn initial(&self) -> Option<char> {
        self.as_str().initial()
    }
}

impl<T: AsRef<str>> StringExt for Option<T> {
    #[inline]
    fn clean(&self) -> Option<String> {
        self.as_ref().and_then(|s| s.as_ref().clean())
    }

    #[inline]
    fn trimmed(&self) -> String {
        self.as_ref()
            .map(|s| s.as_ref().trim().to_string())
            .unwrap_or_default()
    }

    #[inline]
    fn initial(&self) -> Option<char> {
        self.as_ref().and_then(|s| s.as_ref().initial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!("  思考，快与慢 ".clean(), Some("思考，快与慢".to_string()));
        assert_eq!("   ".clean(), None);
        assert_eq!(None::<String>.clean(), None);
        assert_eq!(Some(" x ".to_string()).clean(), Some("x".to_string()));
    }

    #[test]
    fn test_initial() {
        assert_eq!("思考，快与慢".initial(), Some('思'));
        assert_eq!("  Thinking".to_string().initial(), Some('T'));
        assert_eq!("".initial(), None);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("行为经济学", 10), "行为经济学");
        assert_eq!(truncate_chars("行为经济学", 2), "行为... (5 chars total)");
    }
}
