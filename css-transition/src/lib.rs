//! # CSS Transition
//!
//! 声明式 CSS 过渡定义：由若干命名「阶段」生成 `transition` / `transform` 样式。
//!
//! ## 架构概述
//!
//! `css-transition` 是纯逻辑核心，不依赖任何 IO。
//! 样式表的插入、去重、缓存由外部样式引擎负责，通过 [`StyleEngine`] 接入：
//!
//! ```text
//! Caller                     Transitioner                 StyleEngine
//!   │                             │                            │
//!   │── ("slide", {fade: true}) ─►│ Selection                  │
//!   │                             │ Resolver::resolve()        │
//!   │                             │── ResolvedStyle ──────────►│ one()
//!   │◄──────────── class name / CSS text ──────────────────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`PhaseMap`]：阶段表，`"default"` 阶段提供默认时间参数
//! - [`SelectionArg`] / [`Selection`]：调用参数与归一化后的阶段选择
//! - [`Resolver`]：过渡解析器
//! - [`ResolvedStyle`]：解析结果
//! - [`Transitioner`]：绑定阶段表与样式引擎
//!
//! ## 使用示例
//!
//! ```ignore
//! use css_transition::{PhaseMap, PhaseSpec, Transitioner, DEFAULT_PHASE};
//!
//! let fade = Transitioner::new(
//!     &engine,
//!     PhaseMap::new()
//!         .with(DEFAULT_PHASE, PhaseSpec::new().with_duration(100))
//!         .with("in", PhaseSpec::new().with("opacity", 0).with_duration(300))
//!         .with("slide", PhaseSpec::new().with("x", 12)),
//! );
//!
//! let class_name = fade.class_name(["in", "slide"])?;
//! // transition: opacity 300ms,transform 100ms
//! // transform: translateX(12px)
//! ```
//!
//! ## 模块结构
//!
//! - [`value`]：样式值与单位补全
//! - [`property`]：transform 分类与属性名转换
//! - [`phase`]：阶段定义
//! - [`selection`]：阶段选择
//! - [`style`]：解析结果
//! - [`resolver`]：解析器
//! - [`transitioner`]：样式引擎集成
//! - [`config`]：解析器配置
//! - [`error`]：错误类型定义
//! - [`diagnostic`]：阶段表静态检查

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod phase;
pub mod property;
pub mod resolver;
pub mod selection;
pub mod style;
pub mod transitioner;
pub mod value;

// 重导出核心类型
pub use config::{CheckMode, ResolverConfig};
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_phase_map};
pub use error::{TransitionError, TransitionResult};
pub use phase::{DEFAULT_PHASE, PhaseDefinition, PhaseMap, PhaseSpec};
pub use property::{css_case, transform_function};
pub use resolver::{Resolver, resolve};
pub use selection::{Selection, SelectionArg};
pub use style::ResolvedStyle;
pub use transitioner::{StyleEngine, StyleRule, Transitioner};
pub use value::StyleValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let phases = PhaseMap::<()>::new()
            .with(DEFAULT_PHASE, PhaseSpec::new().with_duration(100))
            .with("in", PhaseSpec::new().with("opacity", 0));

        let _selection = Selection::from_args([SelectionArg::name("in")]);

        let _config = ResolverConfig {
            mode: CheckMode::Strict,
        };

        let style = resolve(&phases, ["in"], &(), ResolverConfig::strict()).unwrap();
        assert_eq!(style.transition(), "opacity 100ms");
        assert!(analyze_phase_map(&phases, &()).is_empty());
    }

    #[test]
    fn test_resolve_json_phase_map() {
        let phases = PhaseMap::from_json(
            r#"{
                "default": {"duration": 100, "timing": "ease-out"},
                "slide": {"x": 12, "y": 13, "matrix": [1, 1]},
                "fadeIn": {"opacity": 1, "duration": 50},
                "fadeOut": {"opacity": 0, "duration": 30}
            }"#,
        )
        .unwrap();

        let args: Vec<SelectionArg> =
            serde_json::from_str(r#"[{"slide": true, "fadeIn": true}, {"fadeOut": false}]"#).unwrap();
        let style = resolve(&phases, args, &(), ResolverConfig::strict()).unwrap();

        insta::assert_snapshot!(
            serde_json::to_string(&style).unwrap(),
            @r#"{"transform":"translateX(12px) translateY(13px) matrix(1,1)","opacity":1.0,"transition":"transform 100ms ease-out,opacity 50ms ease-out"}"#
        );
    }
}
