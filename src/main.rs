use clap::Parser;
use order_crm_sync::utils::{logger, validation::Validate};
use order_crm_sync::{
    CliArgs, PipedriveClient, ShopifyOrderSource, SyncConfig, SyncEngine, SyncOptions,
    SyncOrchestrator, SyncOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting order-crm-sync CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入配置
    let mut config = match SyncConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config from {}: {}", args.config, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    // 命令列的 order id 覆寫配置檔
    if let Some(order_id) = args.order_id.clone() {
        config.sync.order_id = order_id;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = args.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立外部服務客戶端與協調器
    let orders = ShopifyOrderSource::new(config.shopify.clone());
    let crm = PipedriveClient::new(config.pipedrive.clone());
    let options = SyncOptions {
        deal_title: config.sync.deal_title.clone(),
    };
    let orchestrator = SyncOrchestrator::new(orders, crm, options);

    let engine = SyncEngine::new_with_monitoring(orchestrator, monitor_enabled);

    match engine.run(&config.sync.order_id).await {
        SyncOutcome::Success(report) => {
            tracing::info!(
                "✅ Order {} synced: person {}, deal {}, {} products ({} created)",
                report.order_id,
                report.person_id,
                report.deal_id,
                report.product_ids.len(),
                report.products_created
            );
            println!("✅ Sync completed successfully!");
            println!(
                "🤝 Deal {} created for order {}",
                report.deal_id, report.order_id
            );
        }
        SyncOutcome::Failure(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Sync failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                order_crm_sync::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                order_crm_sync::utils::error::ErrorSeverity::Medium => 2, // 重試錯誤
                order_crm_sync::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                order_crm_sync::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
