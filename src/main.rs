// ==========================================
// 产品导入 - 命令行入口
// ==========================================
// 用法:
//   product-import validate <file>            校验 CSV/JSON 文件，不落库
//   product-import import <file> [<file>...]  校验并导入（内存仓储）
//   product-import template <csv|json>        输出导入模板
//
// 环境变量:
//   PRODUCT_IMPORT_CONFIG       JSON 配置文件路径
//   PRODUCT_IMPORT_*            单项配置覆写（见 config::config_keys）
//   PRODUCT_IMPORT_LOG_FORMAT   日志格式 text | json
//   RUST_LOG                    日志级别
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use product_import::importer::{FileParser, UniversalFileParser};
use product_import::logging::{self, LogFormat, LOG_FORMAT_ENV};
use product_import::{
    generate_template, ImportConfig, ImportValidator, InMemoryProductRepository, ProductImporter,
    ProductImporterImpl, RecordBuilder, TemplateFormat,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "用法: product-import <validate <file> | import <file>... | template <csv|json>>";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let log_format = std::env::var(LOG_FORMAT_ENV).ok();
    logging::init_with_format(LogFormat::from_env_value(log_format.as_deref()));

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    };

    let config_path = std::env::var("PRODUCT_IMPORT_CONFIG").ok().map(PathBuf::from);
    let config = ImportConfig::load(config_path.as_deref()).context("加载导入配置")?;
    tracing::debug!(?config, "导入配置");

    match command.as_str() {
        "validate" => {
            let file = args.next().ok_or_else(|| anyhow!(USAGE))?;
            validate(Path::new(&file), &config)
        }
        "import" => {
            let files: Vec<String> = args.collect();
            if files.is_empty() {
                bail!(USAGE);
            }
            import(files, config).await
        }
        "template" => {
            let format = args
                .next()
                .unwrap_or_else(|| "csv".to_string())
                .parse::<TemplateFormat>()
                .map_err(|message| anyhow!(message))?;
            let template = generate_template(format).context("生成导入模板")?;
            print!("{}", template.to_text()?);
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("未知命令: {}\n{}", other, USAGE);
            Ok(ExitCode::from(2))
        }
    }
}

fn validate(file: &Path, config: &ImportConfig) -> Result<ExitCode> {
    let parser =
        UniversalFileParser::new(RecordBuilder::with_default_unit(config.default_unit.clone()));
    let payload = parser
        .parse_file(file)
        .with_context(|| format!("解析文件 {}", file.display()))?;
    let result = payload.validate(&ImportValidator::from_config(config));

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn import(files: Vec<String>, config: ImportConfig) -> Result<ExitCode> {
    let importer = ProductImporterImpl::new(InMemoryProductRepository::new(), config);
    let results = importer.batch_import(files).await;

    let mut all_committed = true;
    for result in &results {
        match result {
            Ok(outcome) => {
                all_committed &= outcome.batch.committed;
                println!("{}", serde_json::to_string_pretty(outcome)?);
            }
            Err(message) => {
                all_committed = false;
                eprintln!("{}", message);
            }
        }
    }

    Ok(if all_committed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
