use clap::Parser;
use event_registration::domain::model::FormSettings;
use event_registration::domain::ports::ConfigProvider;
use event_registration::utils::error::ErrorSeverity;
use event_registration::utils::{logger, validation::Validate};
use event_registration::{
    CliConfig, HttpRegistrationApi, RegistrationApp, RegistrationError, TerminalSession,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (若有指定則取代命令列參數)
    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => exit_with(&e),
        },
        None => None,
    };

    // 初始化日誌
    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose_logging());
    let json = cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logging());
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting event-registration");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let built = match &file_config {
        Some(config) => build(config),
        None => build(&cli),
    };
    let (api, settings) = match built {
        Ok(parts) => parts,
        Err(e) => exit_with(&e),
    };
    tracing::info!("Registration service: {}", api.base_url());

    let app = RegistrationApp::new(api, settings);
    let stdin = std::io::stdin();
    let mut session = TerminalSession::new(app, stdin.lock(), std::io::stdout());
    session.run().await?;

    Ok(())
}

fn build<C: ConfigProvider + Validate>(
    config: &C,
) -> event_registration::Result<(HttpRegistrationApi, FormSettings)> {
    config.validate()?;
    let api = HttpRegistrationApi::from_config(config)?;
    Ok((api, config.form_settings()))
}

fn exit_with(e: &RegistrationError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
