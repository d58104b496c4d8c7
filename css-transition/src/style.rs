//! # Style 模块
//!
//! 解析结果 [`ResolvedStyle`]：交给样式引擎的有序样式对象。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::StyleValue;

/// `transition` 键
pub const TRANSITION: &str = "transition";
/// `transform` 键
pub const TRANSFORM: &str = "transform";
/// `transformOrigin` 键
pub const TRANSFORM_ORIGIN: &str = "transformOrigin";

/// 解析后的样式对象
///
/// 键为驼峰命名的 CSS 属性（由样式引擎负责转换为连字符形式）。
///
/// - `transition` 总是存在（可能为空字符串）
/// - `transform` 仅在设置过 transform 子属性时存在
/// - `transformOrigin` 仅在默认阶段或激活阶段提供了 `origin` 时存在
///
/// 键的顺序是首次写入的顺序，重复写入不改变位置。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedStyle {
    declarations: IndexMap<String, StyleValue>,
}

impl ResolvedStyle {
    /// 写入样式
    pub(crate) fn set(&mut self, key: impl Into<String>, value: StyleValue) {
        self.declarations.insert(key.into(), value);
    }

    /// 获取样式值
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.declarations.get(key)
    }

    /// 是否包含某个键
    pub fn contains_key(&self, key: &str) -> bool {
        self.declarations.contains_key(key)
    }

    /// `transition` 简写值
    pub fn transition(&self) -> &str {
        self.get_str(TRANSITION).unwrap_or_default()
    }

    /// `transform` 值
    pub fn transform(&self) -> Option<&str> {
        self.get_str(TRANSFORM)
    }

    /// `transformOrigin` 值
    pub fn transform_origin(&self) -> Option<&str> {
        self.get_str(TRANSFORM_ORIGIN)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.declarations.get(key).and_then(StyleValue::as_str)
    }

    /// 所有键（写入顺序）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// 遍历样式
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_first_position() {
        let mut style = ResolvedStyle::default();
        style.set("opacity", StyleValue::from(0));
        style.set(TRANSFORM, StyleValue::from("translateX(1px)"));
        style.set("opacity", StyleValue::from(1));
        style.set(TRANSITION, StyleValue::from("opacity 100ms"));

        let keys: Vec<_> = style.keys().collect();
        assert_eq!(keys, vec!["opacity", "transform", "transition"]);
        assert_eq!(style.get("opacity"), Some(&StyleValue::from(1)));
        assert_eq!(style.transform(), Some("translateX(1px)"));
        assert_eq!(style.transition(), "opacity 100ms");
        assert_eq!(style.transform_origin(), None);
    }

    #[test]
    fn test_serialize_transparent() {
        let mut style = ResolvedStyle::default();
        style.set("opacity", StyleValue::from("1"));
        style.set(TRANSITION, StyleValue::from("opacity 50ms"));

        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"{"opacity":"1","transition":"opacity 50ms"}"#);

        let back: ResolvedStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
