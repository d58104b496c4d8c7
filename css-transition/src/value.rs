//! # Value 模块
//!
//! 定义阶段中样式属性的取值 [`StyleValue`]，以及单位补全规则。
//!
//! ## 单位补全
//!
//! - 数字：追加单位，如 `300` -> `"300ms"`
//! - 数字字面量字符串：同样追加单位，如 `"300"` -> `"300ms"`
//! - 其他字符串、布尔值、`Null`、`NaN`：原样返回
//!
//! 列表只在逐元素补全（[`StyleValue::with_unit_each`]）时处理。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 毫秒单位（duration / delay）
pub const MS: &str = "ms";
/// 像素单位（translate / perspective / origin）
pub const PX: &str = "px";
/// 角度单位（rotate / skew）
pub const DEG: &str = "deg";

/// 样式属性值
///
/// 对应 JSON 中的 `null` / 布尔 / 数字 / 字符串 / 数组，可直接从 JSON 阶段表反序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// 空值，不参与输出
    Null,
    /// 布尔值（阶段开关）
    Bool(bool),
    /// 数字
    Number(f64),
    /// 字符串
    String(String),
    /// 列表（transform 参数、cubic-bezier 控制点、origin 坐标）
    List(Vec<StyleValue>),
}

impl StyleValue {
    /// 是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// 真值判断
    ///
    /// `Null`、`false`、`0`、`NaN`、空字符串为假，其余（包括空列表）为真。
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::List(_) => true,
        }
    }

    /// 获取字符串内容
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// 为数值追加单位
    ///
    /// 非数值（普通字符串、`Null`、`NaN`、列表）原样返回。
    pub fn with_unit(&self, unit: &str) -> StyleValue {
        match self {
            Self::Number(n) if !n.is_nan() => Self::String(format!("{}{unit}", format_number(*n))),
            Self::String(s) if is_numeric_literal(s) => Self::String(format!("{s}{unit}")),
            other => other.clone(),
        }
    }

    /// 为标量或列表中的每个元素追加单位
    pub fn with_unit_each(&self, unit: &str) -> StyleValue {
        match self {
            Self::List(items) => Self::List(items.iter().map(|v| v.with_unit(unit)).collect()),
            other => other.with_unit(unit),
        }
    }
}

/// 按 CSS 文本格式输出
///
/// 列表以 `,` 连接，`Null` 输出为空字符串。
impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// 数字格式化，与 JavaScript 的数字转字符串一致
///
/// - 整数不带小数点，`-0` 输出为 `0`
/// - 绝对值不小于 `1e21` 或小于 `1e-6` 时使用指数形式：`1e+21`、`1.5e-7`
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    n.to_string()
}

/// 判断字符串是否是有限数字字面量（允许首尾空白）
fn is_numeric_literal(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(|n| n.is_finite())
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StyleValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, u64, usize);

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<StyleValue>, const N: usize> From<[T; N]> for StyleValue {
    fn from(value: [T; N]) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
