use clap::Parser;
use scientist_bot::utils::error::ErrorSeverity;
use scientist_bot::utils::{logger, validation::Validate};
use scientist_bot::{CliConfig, PersonExtractor, ScientistBot, WebDriverBrowser};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting scientist-bot");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    let settings = match config.validate().and_then(|_| config.load_settings()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let names = config.scientist_names();
    tracing::info!("👩‍🔬 {} scientist(s) requested", names.len());

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let browser = WebDriverBrowser::from_config(&settings);
    let extractor = PersonExtractor::new(browser, settings.site.base_url.clone(), config.headless);
    let bot = ScientistBot::new(settings.bot.name.clone(), extractor).with_monitoring(config.monitor);

    let mut stdout = std::io::stdout();
    match bot.run(&names, &config.run_options(), &mut stdout).await {
        Ok(Some(path)) => {
            tracing::info!("✅ Done, output saved to: {}", path.display());
        }
        Ok(None) => {
            tracing::info!("✅ Done");
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 依錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
