//! # FCT Host
//!
//! 浮动战斗文字宿主 CLI。
//!
//! ## 用法
//!
//! ```bash
//! # 回放事件文件
//! fct-host simulate events.json
//! fct-host --config config.json simulate events.json --step-ms 8 --seed 42 --report report.json
//!
//! # 检查配置与所有事件分类
//! fct-host check
//!
//! # 生成默认配置
//! fct-host init-config --force
//! ```
//!
//! 日志级别通过 `RUST_LOG` 控制，默认 `info`。

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use fct_host::simulate::{self, SimulationOptions};
use fct_host::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "fct-host")]
#[command(about = "浮动战斗文字宿主 - 配置检查与无渲染模拟")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：config.json）
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// 回放事件文件
    Simulate {
        /// 事件文件路径（JSON 数组）
        events: PathBuf,

        /// 模拟步长（毫秒）
        #[arg(long, default_value_t = simulate::DEFAULT_STEP_MS)]
        step_ms: f32,

        /// 最后一个事件之后的最长运行时间（毫秒）
        #[arg(long, default_value_t = simulate::DEFAULT_TAIL_MS)]
        tail_ms: f32,

        /// 随机种子（覆盖配置文件）
        #[arg(long)]
        seed: Option<u64>,

        /// 报告输出路径（默认打印到标准输出）
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// 检查配置与所有事件分类
    Check,

    /// 写出默认配置
    InitConfig {
        /// 覆盖已有文件
        #[arg(long)]
        force: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            events,
            step_ms,
            tail_ms,
            seed,
            report,
        } => {
            let mut config = AppConfig::load(&cli.config);
            config.validate().context("配置无效")?;
            if seed.is_some() {
                config.engine.seed = seed;
            }

            let events = simulate::load_events(&events)?;
            let result = simulate::run(&config, &events, SimulationOptions { step_ms, tail_ms })?;
            let json = serde_json::to_string_pretty(&result)?;

            match report {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("无法写入报告: {}", path.display()))?;
                    tracing::info!(path = %path.display(), "报告已保存");
                }
                None => println!("{json}"),
            }

            if !result.is_clean() {
                bail!(
                    "视觉项释放异常: 未释放 {} 个，重复释放 {} 个",
                    result.leaked,
                    result.double_disposed
                );
            }
        }
        Commands::Check => {
            let config = AppConfig::load_strict(&cli.config)?;
            config.validate()?;

            let checks = simulate::check_profiles(&config);
            let mut failed = 0;
            for check in &checks {
                match &check.error {
                    None => println!(
                        "ok    {:<12} {} ({} ms)",
                        check.category,
                        check.kind.as_deref().unwrap_or("?"),
                        check.duration_ms.unwrap_or_default()
                    ),
                    Some(error) => {
                        failed += 1;
                        println!("error {:<12} {}", check.category, error);
                    }
                }
            }

            if failed > 0 {
                bail!("{} 个事件分类无法构建", failed);
            }
            println!("配置有效，共 {} 个事件分类", checks.len());
        }
        Commands::InitConfig { force } => {
            if cli.config.exists() && !force {
                bail!(
                    "配置文件已存在: {}（使用 --force 覆盖）",
                    cli.config.display()
                );
            }
            AppConfig::default().save(&cli.config)?;
            println!("已写出默认配置: {}", cli.config.display());
        }
    }

    Ok(())
}
