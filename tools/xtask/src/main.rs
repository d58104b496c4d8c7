//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与阶段表检查命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov`: 运行 css-transition 覆盖率
//! - `phase-check`: 检查阶段表文件（缺少 duration、空阶段）
//! - `resolve`: 解析阶段表并输出样式对象

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand};
use css_transition::{
    CheckMode, DiagnosticResult, PhaseMap, Resolver, ResolverConfig, Selection, SelectionArg,
    analyze_phase_map,
};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "xtask - 开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,

    /// 运行 css-transition 覆盖率报告
    Cov,

    /// 检查阶段表文件
    ///
    /// 不带参数：检查 phases/ 下所有 .json 文件；
    /// 带路径参数：检查指定文件或目录。
    PhaseCheck {
        /// 阶段表文件或目录
        path: Option<PathBuf>,
    },

    /// 解析阶段表并以 JSON 输出样式对象
    Resolve {
        /// 阶段表文件（JSON）
        file: PathBuf,

        /// 阶段选择：阶段名，或 JSON 开关对象（如 '{"fadeOut": false}'）
        selection: Vec<String>,

        /// 解析器配置文件
        #[arg(short, long, default_value = "transition.json")]
        config: PathBuf,

        /// 强制严格模式（覆盖配置文件）
        #[arg(long, conflicts_with = "permissive")]
        strict: bool,

        /// 强制宽松模式（覆盖配置文件）
        #[arg(long)]
        permissive: bool,
    },
}

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    let status = cmd.status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = real_main(cli.command) {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::CheckAll => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        Commands::Cov => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "css-transition", "--all-features", "--html"]);
            run(
                "cargo llvm-cov -p css-transition --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Commands::PhaseCheck { path } => phase_check(path.as_deref())?,
        Commands::Resolve {
            file,
            selection,
            config,
            strict,
            permissive,
        } => {
            let mut config = load_config(&config);
            if strict {
                config.mode = CheckMode::Strict;
            } else if permissive {
                config.mode = CheckMode::Permissive;
            }
            resolve_file(&file, &selection, config)?;
        }
    }

    Ok(())
}

//=============================================================================
// 配置
//=============================================================================

/// 加载解析器配置
///
/// 文件不存在或解析失败时返回默认配置并记录警告。
fn load_config(path: &Path) -> ResolverConfig {
    if !path.exists() {
        debug!(path = %path.display(), "配置文件不存在，使用默认配置");
        return ResolverConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件解析失败，使用默认配置");
                ResolverConfig::default()
            }
        },
        Err(e) => {
            warn!(error = %e, "配置文件读取失败，使用默认配置");
            ResolverConfig::default()
        }
    }
}

//=============================================================================
// resolve 命令实现
//=============================================================================

/// 解析命令行中的阶段选择参数
fn parse_selection_arg(arg: &str) -> anyhow::Result<SelectionArg> {
    if arg.trim_start().starts_with('{') {
        let flags = serde_json::from_str(arg)
            .map_err(|e| anyhow::anyhow!("无效的阶段开关对象 '{arg}': {e}"))?;
        Ok(SelectionArg::Flags(flags))
    } else {
        Ok(SelectionArg::name(arg))
    }
}

fn read_phase_map(file: &Path) -> anyhow::Result<PhaseMap<()>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("无法读取文件 {}: {e}", file.display()))?;
    PhaseMap::from_json(&content)
        .map_err(|e| anyhow::anyhow!("阶段表解析失败 {}: {e}", file.display()))
}

fn resolve_file(file: &Path, args: &[String], config: ResolverConfig) -> anyhow::Result<()> {
    let phases = read_phase_map(file)?;
    let args = args
        .iter()
        .map(|arg| parse_selection_arg(arg))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let selection = Selection::from_args(args);

    let style = Resolver::new(config).resolve(&phases, &selection, &())?;
    println!("{}", serde_json::to_string_pretty(&style)?);
    Ok(())
}

//=============================================================================
// phase-check 命令实现
//=============================================================================

/// 默认阶段表目录（相对于 workspace root）
const DEFAULT_PHASES_DIR: &str = "phases";

/// 阶段表检查结果
struct PhaseCheckResult {
    /// 检查的文件数量
    files_checked: usize,
    /// 解析错误数量
    parse_errors: usize,
    /// 诊断结果
    diagnostics: DiagnosticResult,
}

/// 执行阶段表检查
fn phase_check(path: Option<&Path>) -> anyhow::Result<()> {
    let files = match path {
        Some(path) => {
            if path.is_file() {
                vec![path.to_path_buf()]
            } else if path.is_dir() {
                collect_phase_files(path)
            } else {
                anyhow::bail!("路径不存在: {}", path.display());
            }
        }
        None => {
            let dir = Path::new(DEFAULT_PHASES_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认阶段表目录不存在: {}\n请在 workspace 根目录运行，或指定阶段表路径",
                    dir.display()
                );
            }
            collect_phase_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到阶段表文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个阶段表文件...\n", files.len());

    let mut result = PhaseCheckResult {
        files_checked: 0,
        parse_errors: 0,
        diagnostics: DiagnosticResult::new(),
    };

    for file in &files {
        check_phase_file(file, &mut result);
    }

    print_check_result(&result);

    if result.parse_errors > 0 || result.diagnostics.has_errors() {
        anyhow::bail!("阶段表检查发现错误");
    }

    Ok(())
}

/// 收集目录下的所有阶段表文件
fn collect_phase_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个阶段表文件
fn check_phase_file(file: &Path, result: &mut PhaseCheckResult) {
    let source = file.display().to_string();
    result.files_checked += 1;

    let phases = match read_phase_map(file) {
        Ok(phases) => phases,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            result.parse_errors += 1;
            return;
        }
    };

    debug!(file = %source, phases = phases.len(), "分析阶段表");
    let diag = analyze_phase_map(&phases, &()).with_source(&source);
    result.diagnostics.merge(diag);
}

/// 输出检查结果
fn print_check_result(result: &PhaseCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个阶段表", result.files_checked);
    eprintln!();

    for diag in &result.diagnostics.diagnostics {
        eprintln!("{}", diag);
    }

    let error_count = result.parse_errors + result.diagnostics.error_count();
    let warn_count = result.diagnostics.warn_count();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_transition::StyleValue;

    #[test]
    fn test_parse_selection_arg() {
        assert_eq!(
            parse_selection_arg("slide").unwrap(),
            SelectionArg::name("slide")
        );
        assert_eq!(
            parse_selection_arg(r#"{"fadeOut": false}"#).unwrap(),
            SelectionArg::flags([("fadeOut", false)])
        );
        assert_eq!(
            parse_selection_arg(r#"{"fadeIn": null, "slide": 1}"#).unwrap(),
            SelectionArg::flags([("fadeIn", StyleValue::Null), ("slide", StyleValue::from(1))])
        );
        assert!(parse_selection_arg("{broken").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let config = load_config(Path::new("does/not/exist.json"));
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_cli_parses_resolve() {
        let cli = Cli::try_parse_from([
            "xtask",
            "resolve",
            "phases/fade.json",
            "in",
            "--strict",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                file,
                selection,
                strict,
                permissive,
                ..
            } => {
                assert_eq!(file, PathBuf::from("phases/fade.json"));
                assert_eq!(selection, vec!["in".to_string()]);
                assert!(strict);
                assert!(!permissive);
            }
            _ => panic!("expected resolve"),
        }
    }
}
