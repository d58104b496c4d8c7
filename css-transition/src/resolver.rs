//! # Resolver 模块
//!
//! 过渡解析器：阶段表 + 阶段选择 -> [`ResolvedStyle`]。
//!
//! ## 解析流程
//!
//! ```text
//! default 阶段 ──► 默认 duration / delay / timing / origin
//!      │
//!      ▼
//! [default, 激活阶段...] 逐个求值
//!      │  有效时间参数 = 阶段自身的值，否则默认值
//!      │  origin 后者覆盖前者
//!      ▼
//! 属性分类 ──► transform 子属性：累积到 transform 映射，过渡属性名为 `transform`
//!          └─► 普通属性：直接写入输出，过渡属性名为连字符形式
//!      │
//!      ▼
//! transition = 去重后的过渡条目以 `,` 连接
//! transform  = `fn(value)` 以空格连接
//! ```

use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::error::{TransitionError, TransitionResult};
use crate::phase::{DEFAULT_PHASE, PhaseMap, PhaseSpec};
use crate::property::{TRANSFORM_PROPERTY, css_case, transform_function, transform_unit};
use crate::selection::{Selection, SelectionArg};
use crate::style::{ResolvedStyle, TRANSFORM, TRANSFORM_ORIGIN, TRANSITION};
use crate::value::{MS, PX, StyleValue};

/// 宽松模式下缺失 duration 的占位符，保证 delay 不会落在 duration 的位置上
const MISSING_DURATION: &str = "undefined";

/// 一个阶段的有效时间参数（已补全单位）
#[derive(Debug, Clone, Default)]
struct Timing {
    duration: Option<StyleValue>,
    delay: Option<StyleValue>,
    timing: Option<StyleValue>,
}

impl Timing {
    /// 从阶段内容提取，未设置的字段保持 `None`
    fn of(spec: &PhaseSpec) -> Self {
        Self {
            duration: spec.duration.as_ref().map(|v| v.with_unit(MS)),
            delay: spec.delay.as_ref().map(|v| v.with_unit(MS)),
            timing: spec.timing.as_ref().map(normalize_timing),
        }
    }

    /// 以默认值补齐未设置的字段
    fn or(self, defaults: &Timing) -> Self {
        Self {
            duration: self.duration.or_else(|| defaults.duration.clone()),
            delay: self.delay.or_else(|| defaults.delay.clone()),
            timing: self.timing.or_else(|| defaults.timing.clone()),
        }
    }

    /// 有效 duration，`Null` 视为缺失
    fn duration(&self) -> Option<&StyleValue> {
        self.duration.as_ref().filter(|v| !v.is_null())
    }

    /// 过渡条目中 duration 之后的部分：` <delay> <timing>`，两者都为空时为空字符串
    fn delay_and_timing(&self) -> String {
        let text = format!(
            "{} {}",
            truthy_text(self.delay.as_ref()),
            truthy_text(self.timing.as_ref())
        );
        let text = text.trim();
        if text.is_empty() {
            String::new()
        } else {
            format!(" {text}")
        }
    }
}

/// 假值输出为空字符串
fn truthy_text(value: Option<&StyleValue>) -> String {
    value
        .filter(|v| v.is_truthy())
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// 四元列表转为 `cubic-bezier(a,b,c,d)`，其余原样返回
fn normalize_timing(timing: &StyleValue) -> StyleValue {
    match timing {
        StyleValue::List(_) => StyleValue::String(format!("cubic-bezier({timing})")),
        other => other.clone(),
    }
}

/// 列表逐元素补 `px` 后以空格连接，标量直接补 `px`
fn normalize_origin(origin: &StyleValue) -> StyleValue {
    match origin {
        StyleValue::List(items) => StyleValue::String(
            items
                .iter()
                .map(|v| v.with_unit(PX).to_string())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        other => other.with_unit(PX),
    }
}

/// 过渡解析器
///
/// 无状态：每次调用都重新计算，不缓存任何结果。
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// 使用指定配置创建解析器
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// 当前配置
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// 解析阶段选择
    ///
    /// `tokens` 原样传给延迟求值的阶段；没有延迟阶段时不会被使用。
    pub fn resolve<T>(
        &self,
        phases: &PhaseMap<T>,
        selection: &Selection,
        tokens: &T,
    ) -> TransitionResult<ResolvedStyle> {
        let mut sequence: Vec<(&str, Cow<'_, PhaseSpec>)> = Vec::new();
        let mut defaults = Timing::default();
        let mut origin: Option<StyleValue> = None;

        if let Some(phase) = phases.default_phase() {
            let spec = phase.evaluate(tokens);
            defaults = Timing::of(&spec);
            origin = spec.origin.as_ref().map(normalize_origin);
            sequence.push((DEFAULT_PHASE, spec));
        }

        for name in selection.activated() {
            match phases.get(name) {
                Some(phase) => sequence.push((name, phase.evaluate(tokens))),
                None => warn!(phase = %name, "未定义的过渡阶段，已跳过"),
            }
        }

        debug!(
            phases = ?sequence.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            "解析过渡阶段"
        );

        let mut style = ResolvedStyle::default();
        let mut transforms: IndexMap<&'static str, StyleValue> = IndexMap::new();
        let mut transitions: Vec<String> = Vec::new();

        for (name, spec) in &sequence {
            if let Some(phase_origin) = spec.origin.as_ref().filter(|v| v.is_truthy()) {
                origin = Some(normalize_origin(phase_origin));
            }
            if let Some(origin) = origin.as_ref().filter(|v| v.is_truthy()) {
                style.set(TRANSFORM_ORIGIN, origin.clone());
            }

            let timing = Timing::of(spec).or(&defaults);
            let suffix = timing.delay_and_timing();

            for (key, value) in &spec.properties {
                if value.is_null() {
                    continue;
                }

                let property = match transform_function(key) {
                    Some(function) => {
                        let value = match transform_unit(function) {
                            Some(unit) => value.with_unit_each(unit),
                            None => value.clone(),
                        };
                        if transforms.is_empty() {
                            // 占位，使 transform 位于首个 transform 子属性的位置
                            style.set(TRANSFORM, StyleValue::Null);
                        }
                        transforms.insert(function, value);
                        Cow::Borrowed(TRANSFORM_PROPERTY)
                    }
                    None => {
                        style.set(key.as_str(), value.clone());
                        Cow::Owned(css_case(key))
                    }
                };

                let entry = match timing.duration() {
                    Some(duration) => format!("{property} {duration}{suffix}"),
                    None if self.config.is_strict() => {
                        return Err(TransitionError::MissingDuration {
                            phase: name.to_string(),
                        });
                    }
                    None => {
                        warn!(phase = %name, property = %property, "过渡阶段缺少 duration");
                        if suffix.is_empty() {
                            property.to_string()
                        } else {
                            format!("{property} {MISSING_DURATION}{suffix}")
                        }
                    }
                };

                if !transitions.contains(&entry) {
                    transitions.push(entry);
                }
            }
        }

        if !transforms.is_empty() {
            let transform = transforms
                .iter()
                .map(|(function, value)| format!("{function}({value})"))
                .collect::<Vec<_>>()
                .join(" ");
            style.set(TRANSFORM, StyleValue::String(transform));
        }

        style.set(TRANSITION, StyleValue::String(transitions.join(",")));
        Ok(style)
    }
}

/// 解析入口
///
/// 等价于 `Resolver::new(config).resolve(phases, &Selection::from_args(args), tokens)`。
pub fn resolve<T, A: Into<SelectionArg>>(
    phases: &PhaseMap<T>,
    args: impl IntoIterator<Item = A>,
    tokens: &T,
    config: ResolverConfig,
) -> TransitionResult<ResolvedStyle> {
    Resolver::new(config).resolve(phases, &Selection::from_args(args), tokens)
}
