//! # Transitioner 模块
//!
//! 将阶段表绑定到样式引擎，对外提供三种输出：
//!
//! - [`class_name`](Transitioner::class_name)：交给样式引擎生成类名
//! - [`css_text`](Transitioner::css_text)：交给样式引擎生成 CSS 文本
//! - [`style_object`](Transitioner::style_object)：直接返回 [`ResolvedStyle`]
//!
//! 样式引擎（插入样式表、去重、缓存）不属于本 crate，通过 [`StyleEngine`] 抽象。

use crate::config::ResolverConfig;
use crate::error::TransitionResult;
use crate::phase::PhaseMap;
use crate::resolver::Resolver;
use crate::selection::{Selection, SelectionArg};
use crate::style::ResolvedStyle;

/// 样式引擎生成的规则
pub trait StyleRule {
    /// 类名
    fn class_name(&self) -> String;

    /// CSS 文本
    fn css_text(&self) -> String;
}

/// 外部样式引擎
///
/// 每次物化请求只调用一次 [`one`](StyleEngine::one)。
pub trait StyleEngine {
    /// 传给延迟求值阶段的 token 类型
    type Tokens;

    /// 生成的规则类型
    type Rule: StyleRule;

    /// 当前 token
    fn tokens(&self) -> &Self::Tokens;

    /// 将样式对象转换为规则
    fn one(&self, style: ResolvedStyle) -> Self::Rule;
}

/// 过渡生成器
///
/// 每次调用都是无状态的，只依赖绑定的阶段表。
pub struct Transitioner<'e, E: StyleEngine> {
    engine: &'e E,
    phases: PhaseMap<E::Tokens>,
    resolver: Resolver,
}

impl<'e, E: StyleEngine> Transitioner<'e, E> {
    /// 使用默认配置创建
    pub fn new(engine: &'e E, phases: PhaseMap<E::Tokens>) -> Self {
        Self::with_config(engine, phases, ResolverConfig::default())
    }

    /// 使用指定配置创建
    pub fn with_config(engine: &'e E, phases: PhaseMap<E::Tokens>, config: ResolverConfig) -> Self {
        Self {
            engine,
            phases,
            resolver: Resolver::new(config),
        }
    }

    /// 解析并返回类名
    pub fn class_name<A: Into<SelectionArg>>(
        &self,
        args: impl IntoIterator<Item = A>,
    ) -> TransitionResult<String> {
        Ok(self.rule(args)?.class_name())
    }

    /// 解析并返回 CSS 文本
    pub fn css_text<A: Into<SelectionArg>>(
        &self,
        args: impl IntoIterator<Item = A>,
    ) -> TransitionResult<String> {
        Ok(self.rule(args)?.css_text())
    }

    /// 解析并交给样式引擎
    ///
    /// 引擎收到的对象与 [`style_object`](Self::style_object) 返回的完全一致。
    pub fn rule<A: Into<SelectionArg>>(
        &self,
        args: impl IntoIterator<Item = A>,
    ) -> TransitionResult<E::Rule> {
        let style = self.style_object(args)?;
        Ok(self.engine.one(style))
    }

    /// 解析为样式对象，不经过样式引擎
    pub fn style_object<A: Into<SelectionArg>>(
        &self,
        args: impl IntoIterator<Item = A>,
    ) -> TransitionResult<ResolvedStyle> {
        let selection = Selection::from_args(args);
        self.resolver
            .resolve(&self.phases, &selection, self.engine.tokens())
    }

    /// 绑定的阶段表，用于组合新的 Transitioner
    pub fn phase_map(&self) -> &PhaseMap<E::Tokens> {
        &self.phases
    }

    /// 解析器配置
    pub fn config(&self) -> &ResolverConfig {
        self.resolver.config()
    }

    /// 以当前阶段表为基础，覆盖/追加阶段，生成新的 Transitioner
    pub fn extend(&self, phases: PhaseMap<E::Tokens>) -> Self {
        Self {
            engine: self.engine,
            phases: self.phases.merged(phases),
            resolver: self.resolver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransitionError;
    use crate::phase::{DEFAULT_PHASE, PhaseSpec};
    use crate::property::css_case;
    use std::cell::RefCell;

    struct Tokens {
        slow: u32,
    }

    /// 记录收到的样式对象的测试引擎
    struct TestEngine {
        tokens: Tokens,
        received: RefCell<Vec<ResolvedStyle>>,
    }

    struct TestRule {
        class_name: String,
        css_text: String,
    }

    impl StyleRule for TestRule {
        fn class_name(&self) -> String {
            self.class_name.clone()
        }

        fn css_text(&self) -> String {
            self.css_text.clone()
        }
    }

    impl StyleEngine for TestEngine {
        type Tokens = Tokens;
        type Rule = TestRule;

        fn tokens(&self) -> &Tokens {
            &self.tokens
        }

        fn one(&self, style: ResolvedStyle) -> TestRule {
            let css_text = style
                .iter()
                .map(|(key, value)| format!("{}:{};", css_case(key), value))
                .collect::<String>();
            let mut received = self.received.borrow_mut();
            let class_name = format!("dash-{}", received.len());
            received.push(style);
            TestRule {
                class_name,
                css_text,
            }
        }
    }

    fn engine() -> TestEngine {
        TestEngine {
            tokens: Tokens { slow: 1000 },
            received: RefCell::new(Vec::new()),
        }
    }

    fn fade() -> PhaseMap<Tokens> {
        PhaseMap::new().with("in", PhaseSpec::new().with("opacity", 0).with_duration(300))
    }

    #[test]
    fn test_class_name() {
        let engine = engine();
        let t = Transitioner::new(&engine, fade());

        assert_eq!(t.class_name(["in"]).unwrap(), "dash-0");
        assert_eq!(t.class_name(["in"]).unwrap(), "dash-1");
        assert_eq!(engine.received.borrow().len(), 2);
    }

    #[test]
    fn test_css_text() {
        let engine = engine();
        let t = Transitioner::new(&engine, fade());

        insta::assert_snapshot!(
            t.css_text(["in"]).unwrap(),
            @"opacity:0;transition:opacity 300ms;"
        );
    }

    #[test]
    fn test_style_object_skips_engine() {
        let engine = engine();
        let t = Transitioner::new(&engine, fade());

        let style = t.style_object(["in"]).unwrap();
        assert_eq!(style.transition(), "opacity 300ms");
        assert!(engine.received.borrow().is_empty());
    }

    #[test]
    fn test_engine_receives_style_object() {
        let engine = engine();
        let t = Transitioner::new(
            &engine,
            PhaseMap::new()
                .with(DEFAULT_PHASE, PhaseSpec::new().with_duration(100).with_origin("center"))
                .with("slide", PhaseSpec::new().with("x", 12).with("opacity", 1)),
        );

        let style = t.style_object(["slide"]).unwrap();
        t.class_name(["slide"]).unwrap();
        assert_eq!(engine.received.borrow()[0], style);
    }

    #[test]
    fn test_tokens_reach_deferred_phases() {
        let engine = engine();
        let t = Transitioner::new(
            &engine,
            PhaseMap::new()
                .with_deferred(DEFAULT_PHASE, |tokens: &Tokens| {
                    PhaseSpec::new().with_duration(tokens.slow)
                })
                .with("slide", PhaseSpec::new().with("x", 12)),
        );

        let style = t.style_object(["slide"]).unwrap();
        assert_eq!(style.transition(), "transform 1000ms");
    }

    #[test]
    fn test_compose_from_phase_map() {
        let engine = engine();
        let slow = Transitioner::new(
            &engine,
            PhaseMap::new().with(DEFAULT_PHASE, PhaseSpec::new().with_duration(1000)),
        );

        let t = Transitioner::new(
            &engine,
            slow.phase_map().merged(
                PhaseMap::new()
                    .with("fadeIn", PhaseSpec::new().with("opacity", 1))
                    .with("fadeOut", PhaseSpec::new().with("opacity", 0)),
            ),
        );

        let style = t
            .style_object([
                SelectionArg::from([("fadeIn", true)]),
                SelectionArg::from([("fadeOut", false)]),
            ])
            .unwrap();
        assert_eq!(style.transition(), "opacity 1000ms");
        // 原 Transitioner 不受影响
        assert_eq!(slow.phase_map().len(), 1);
    }

    #[test]
    fn test_extend_overrides_phase() {
        let engine = engine();
        let base = Transitioner::with_config(&engine, fade(), ResolverConfig::strict());
        let t = base.extend(
            PhaseMap::new().with("in", PhaseSpec::new().with("opacity", 0.5).with_duration(50)),
        );

        assert_eq!(t.style_object(["in"]).unwrap().transition(), "opacity 50ms");
        assert_eq!(base.style_object(["in"]).unwrap().transition(), "opacity 300ms");
        assert!(t.config().is_strict());
    }

    #[test]
    fn test_strict_error_reaches_caller() {
        let engine = engine();
        let t = Transitioner::with_config(
            &engine,
            PhaseMap::new().with("in", PhaseSpec::new().with("opacity", 0)),
            ResolverConfig::strict(),
        );

        assert_eq!(
            t.class_name(["in"]),
            Err(TransitionError::MissingDuration {
                phase: "in".to_string()
            })
        );
        assert!(engine.received.borrow().is_empty());
    }
}
