//! # Phase 模块
//!
//! 定义过渡阶段：[`PhaseSpec`]（阶段内容）、[`PhaseDefinition`]（字面量或延迟求值）
//! 以及 [`PhaseMap`]（有序阶段表）。
//!
//! ## 设计说明
//!
//! - 保留字段（`duration` / `delay` / `timing` / `origin`）是显式字段，
//!   其余键统一放在有序的 `properties` 中，JSON 反序列化时一次性拆分
//! - `"default"` 阶段只提供默认值，不能被选择激活
//! - 延迟求值的阶段每次解析调用一次，不缓存

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::value::StyleValue;

/// 默认阶段名
pub const DEFAULT_PHASE: &str = "default";

/// 单个阶段的内容
///
/// # 示例
///
/// ```text
/// { "opacity": 0, "y": 12, "duration": 300, "timing": [0.4, 0, 0.2, 1] }
///   -> duration = 300, timing = [0.4, 0, 0.2, 1], properties = { opacity: 0, y: 12 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    /// 持续时间，数字按毫秒处理
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<StyleValue>,

    /// 延迟，数字按毫秒处理
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<StyleValue>,

    /// 缓动函数，四元列表按 `cubic-bezier` 处理
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<StyleValue>,

    /// transform 原点，数字按像素处理
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<StyleValue>,

    /// 样式属性（保持声明顺序）
    #[serde(flatten)]
    pub properties: IndexMap<String, StyleValue>,
}

impl PhaseSpec {
    /// 创建空阶段
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置持续时间
    pub fn with_duration(mut self, duration: impl Into<StyleValue>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: impl Into<StyleValue>) -> Self {
        self.delay = Some(delay.into());
        self
    }

    /// 设置缓动函数
    pub fn with_timing(mut self, timing: impl Into<StyleValue>) -> Self {
        self.timing = Some(timing.into());
        self
    }

    /// 设置 transform 原点
    pub fn with_origin(mut self, origin: impl Into<StyleValue>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// 设置样式属性
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// 是否包含会产生输出的样式属性（非 `Null`）
    pub fn has_properties(&self) -> bool {
        self.properties.values().any(|v| !v.is_null())
    }

    /// 是否完全为空（没有属性也没有任何时间参数）
    pub fn is_empty(&self) -> bool {
        !self.has_properties()
            && self.duration.is_none()
            && self.delay.is_none()
            && self.timing.is_none()
            && self.origin.is_none()
    }
}

/// 延迟求值函数
pub type PhaseFn<T> = dyn Fn(&T) -> PhaseSpec + Send + Sync;

/// 阶段定义
///
/// - `Literal`：直接给出阶段内容
/// - `Deferred`：根据样式引擎的 token 计算阶段内容
pub enum PhaseDefinition<T> {
    /// 字面量阶段
    Literal(PhaseSpec),
    /// 延迟求值阶段
    Deferred(Arc<PhaseFn<T>>),
}

impl<T> PhaseDefinition<T> {
    /// 创建延迟求值阶段
    pub fn deferred(f: impl Fn(&T) -> PhaseSpec + Send + Sync + 'static) -> Self {
        Self::Deferred(Arc::new(f))
    }

    /// 求值
    ///
    /// 字面量阶段直接借用，延迟阶段每次调用都重新计算。
    pub fn evaluate(&self, tokens: &T) -> Cow<'_, PhaseSpec> {
        match self {
            Self::Literal(spec) => Cow::Borrowed(spec),
            Self::Deferred(f) => Cow::Owned(f(tokens)),
        }
    }

    /// 是否为延迟求值阶段
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl<T> Clone for PhaseDefinition<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(spec) => Self::Literal(spec.clone()),
            Self::Deferred(f) => Self::Deferred(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for PhaseDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(spec) => f.debug_tuple("Literal").field(spec).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl<T> From<PhaseSpec> for PhaseDefinition<T> {
    fn from(spec: PhaseSpec) -> Self {
        Self::Literal(spec)
    }
}

/// 有序阶段表
///
/// 构造后对解析器只读；组合时通过 [`merged`](PhaseMap::merged) 生成新表，
/// 后者覆盖前者（覆盖时保留原位置）。
pub struct PhaseMap<T> {
    phases: IndexMap<String, PhaseDefinition<T>>,
}

impl<T> PhaseMap<T> {
    /// 创建空阶段表
    pub fn new() -> Self {
        Self {
            phases: IndexMap::new(),
        }
    }

    /// 添加阶段（构建器形式）
    pub fn with(mut self, name: impl Into<String>, phase: impl Into<PhaseDefinition<T>>) -> Self {
        self.insert(name, phase);
        self
    }

    /// 添加延迟求值阶段（构建器形式）
    pub fn with_deferred(
        self,
        name: impl Into<String>,
        f: impl Fn(&T) -> PhaseSpec + Send + Sync + 'static,
    ) -> Self {
        self.with(name, PhaseDefinition::deferred(f))
    }

    /// 添加或覆盖阶段
    pub fn insert(&mut self, name: impl Into<String>, phase: impl Into<PhaseDefinition<T>>) {
        self.phases.insert(name.into(), phase.into());
    }

    /// 获取阶段定义
    pub fn get(&self, name: &str) -> Option<&PhaseDefinition<T>> {
        self.phases.get(name)
    }

    /// 默认阶段
    pub fn default_phase(&self) -> Option<&PhaseDefinition<T>> {
        self.get(DEFAULT_PHASE)
    }

    /// 阶段名（声明顺序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.phases.keys().map(String::as_str)
    }

    /// 遍历阶段
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PhaseDefinition<T>)> {
        self.phases.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 阶段数量
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// 合并另一个阶段表，同名阶段以 `other` 为准
    pub fn extend(&mut self, other: PhaseMap<T>) {
        self.phases.extend(other.phases);
    }

    /// 返回合并后的新表，不修改自身
    pub fn merged(&self, other: PhaseMap<T>) -> Self {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }
}

impl PhaseMap<()> {
    /// 从 JSON 解析阶段表（只支持字面量阶段）
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<T> Default for PhaseMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PhaseMap<T> {
    fn clone(&self) -> Self {
        Self {
            phases: self.phases.clone(),
        }
    }
}

impl<T> fmt::Debug for PhaseMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.phases.iter()).finish()
    }
}

impl<'de, T> Deserialize<'de> for PhaseMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let specs = IndexMap::<String, PhaseSpec>::deserialize(deserializer)?;
        Ok(Self {
            phases: specs
                .into_iter()
                .map(|(name, spec)| (name, PhaseDefinition::Literal(spec)))
                .collect(),
        })
    }
}
