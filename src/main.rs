use clap::Parser;
use scalectl::core::CommandRunner;
use scalectl::utils::{logger, validation::Validate};
use scalectl::{
    CliConfig, DeployError, Dispatcher, DryRunRunner, LocalStorage, ProcessRunner, ToolConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting scalectl");
    tracing::debug!("CLI config: {:?}", config);

    // 載入工具設定並驗證
    let tool_config = match load_tool_config(&config) {
        Ok(tool_config) => tool_config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Tool config: {:?}", tool_config);

    if let Err(e) = config.validate() {
        exit_with(e);
    }

    let storage = LocalStorage::new(config.output_dir.clone());
    let result = if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - commands are printed, not executed");
        dispatch(DryRunRunner, storage, tool_config, &config).await
    } else {
        dispatch(ProcessRunner, storage, tool_config, &config).await
    };

    if let Err(e) = result {
        exit_with(e);
    }

    Ok(())
}

fn load_tool_config(config: &CliConfig) -> scalectl::Result<ToolConfig> {
    let path = config.config_path();
    // 明確指定的設定檔必須存在
    let tool_config = if config.config.is_some() {
        ToolConfig::from_file(&path)?
    } else {
        ToolConfig::load_or_default(&path)?
    };
    tool_config.validate()?;
    Ok(tool_config)
}

async fn dispatch<R: CommandRunner>(
    runner: R,
    storage: LocalStorage,
    tool_config: ToolConfig,
    config: &CliConfig,
) -> scalectl::Result<()> {
    Dispatcher::new(runner, storage, tool_config)
        .run(&config.command)
        .await
}

fn exit_with(e: DeployError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ scalectl failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
