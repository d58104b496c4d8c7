//! # 诊断模块
//!
//! 对阶段表做静态检查，不依赖 IO 或样式引擎。
//!
//! ## 检查项
//!
//! - Error：阶段会输出样式属性，但自身和默认阶段都没有 duration（严格模式下激活即报错）
//! - Warn：阶段没有任何属性和时间参数，激活后没有效果
//! - Info：默认阶段自身带有样式属性，每次调用都会输出

use crate::phase::{DEFAULT_PHASE, PhaseMap};

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 来源（阶段表文件路径或名称）
    pub source: String,
    /// 阶段名
    pub phase: String,
    /// 诊断消息
    pub message: String,
}

impl Diagnostic {
    fn new(
        level: DiagnosticLevel,
        phase: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            source: String::new(),
            phase: phase.into(),
            message: message.into(),
        }
    }

    /// 创建错误诊断
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, phase, message)
    }

    /// 创建警告诊断
    pub fn warn(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, phase, message)
    }

    /// 创建信息诊断
    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, phase, message)
    }

    /// 设置来源
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.level)?;
        if !self.source.is_empty() {
            write!(f, "{}: ", self.source)?;
        }
        write!(f, "阶段 \"{}\": {}", self.phase, self.message)
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 为所有条目设置来源
    pub fn with_source(mut self, source: &str) -> Self {
        for diagnostic in &mut self.diagnostics {
            diagnostic.source = source.to_string();
        }
        self
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.count(DiagnosticLevel::Warn)
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

/// 分析阶段表
///
/// 每个阶段求值一次（延迟阶段使用 `tokens`）。
pub fn analyze_phase_map<T>(phases: &PhaseMap<T>, tokens: &T) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    let default_spec = phases.default_phase().map(|phase| phase.evaluate(tokens));
    let default_duration = default_spec
        .as_ref()
        .and_then(|spec| spec.duration.as_ref())
        .is_some_and(|d| !d.is_null());

    for (name, phase) in phases.iter() {
        let spec = match (&default_spec, name == DEFAULT_PHASE) {
            (Some(spec), true) => spec.clone(),
            _ => phase.evaluate(tokens),
        };

        let own_duration = spec.duration.as_ref().is_some_and(|d| !d.is_null());

        if spec.has_properties() && !own_duration && !default_duration {
            result.push(Diagnostic::error(
                name,
                "缺少 duration，且默认阶段未提供 duration",
            ));
        }

        if spec.is_empty() {
            result.push(Diagnostic::warn(name, "阶段没有任何样式属性或时间参数"));
        } else if name == DEFAULT_PHASE && spec.has_properties() {
            result.push(Diagnostic::info(
                name,
                "默认阶段带有样式属性，每次调用都会输出",
            ));
        }
    }

    result
}
