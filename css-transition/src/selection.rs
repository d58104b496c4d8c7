//! # Selection 模块
//!
//! 将调用参数归一化为有序的激活阶段列表。
//!
//! ## 设计说明
//!
//! - 参数可以是阶段名，也可以是「阶段名 -> 开关」映射
//! - 开关可以是任意 [`StyleValue`]，按真值判断（`null`、`0`、`""` 为假）
//! - 所有参数从左到右合并：阶段名等价于 `{name: true}`，后出现的键覆盖先出现的值
//! - 合并后的顺序是各键首次出现的顺序
//! - `"default"` 不会被选择激活

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::phase::DEFAULT_PHASE;
use crate::value::StyleValue;

/// 单个选择参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionArg {
    /// 阶段名，如 `"fadeIn"`
    Name(String),
    /// 阶段开关，如 `{ "slide": true, "fadeOut": false, "fadeIn": null }`
    Flags(IndexMap<String, StyleValue>),
}

impl SelectionArg {
    /// 创建阶段名参数
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// 创建阶段开关参数
    pub fn flags<K: Into<String>, V: Into<StyleValue>>(
        flags: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self::Flags(flags.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<&str> for SelectionArg {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for SelectionArg {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for SelectionArg {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<IndexMap<String, StyleValue>> for SelectionArg {
    fn from(flags: IndexMap<String, StyleValue>) -> Self {
        Self::Flags(flags)
    }
}

impl<V: Into<StyleValue>, const N: usize> From<[(&str, V); N]> for SelectionArg {
    fn from(flags: [(&str, V); N]) -> Self {
        Self::flags(flags)
    }
}

/// 合并后的阶段选择
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    flags: IndexMap<String, StyleValue>,
}

impl Selection {
    /// 从调用参数构建
    pub fn from_args<A: Into<SelectionArg>>(args: impl IntoIterator<Item = A>) -> Self {
        let mut selection = Self::default();
        for arg in args {
            selection.push(arg.into());
        }
        selection
    }

    /// 合并一个参数
    pub fn push(&mut self, arg: SelectionArg) {
        match arg {
            SelectionArg::Name(name) => {
                self.flags.insert(name, StyleValue::Bool(true));
            }
            SelectionArg::Flags(flags) => self.flags.extend(flags),
        }
    }

    /// 阶段是否被激活
    pub fn is_active(&self, name: &str) -> bool {
        name != DEFAULT_PHASE && self.flags.get(name).is_some_and(StyleValue::is_truthy)
    }

    /// 激活的阶段名（首次出现顺序，不含 `"default"`）
    pub fn activated(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(name, flag)| flag.is_truthy() && name.as_str() != DEFAULT_PHASE)
            .map(|(name, _)| name.as_str())
    }

    /// 是否没有激活任何阶段
    pub fn is_empty(&self) -> bool {
        self.activated().next().is_none()
    }
}

impl<A: Into<SelectionArg>> FromIterator<A> for Selection {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::from_args(iter)
    }
}
