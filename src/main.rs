use clap::Parser;
use regwatch::domain::ports::NoticeSource;
use regwatch::utils::{logger, validation::Validate};
use regwatch::{
    CliConfig, DedupLedger, FederalRegisterSource, FixtureSource, GeminiAnnotator, ScanContext,
    ScanOrchestrator, SmtpNotifier, WatchConfig, Watchlist,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting regwatch");

    let mut config = if Path::new(&cli.config).exists() {
        WatchConfig::from_file(&cli.config)?
    } else {
        tracing::warn!("Config file {} not found, using defaults", cli.config);
        WatchConfig::default()
    };

    if let Some(raw) = &cli.watchlist {
        config.watchlist.companies = raw.clone();
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let watchlist = Watchlist::parse(&config.watchlist.companies);
    if watchlist.is_empty() {
        tracing::warn!("Watchlist is empty, no notice will match");
    } else {
        tracing::info!("Watching for: {}", watchlist.tokens().join(", "));
    }

    let ctx = ScanContext::new(watchlist, Arc::new(DedupLedger::new()));

    if cli.test_mode {
        tracing::info!("🧪 Test mode enabled, using a synthetic notice");
        let orchestrator = build_orchestrator(FixtureSource, &config)?;
        run_scans(orchestrator, ctx, cli.interval_secs).await;
    } else {
        let mut source = match &config.feed.endpoint {
            Some(endpoint) => FederalRegisterSource::with_endpoint(endpoint.clone()),
            None => FederalRegisterSource::new(),
        };
        if let Some(secs) = config.feed.timeout_seconds {
            source = source.with_timeout(Duration::from_secs(secs));
        }
        let orchestrator = build_orchestrator(source, &config)?;
        run_scans(orchestrator, ctx, cli.interval_secs).await;
    }

    Ok(())
}

fn build_orchestrator<S: NoticeSource>(
    source: S,
    config: &WatchConfig,
) -> anyhow::Result<ScanOrchestrator<S>> {
    let mut orchestrator = ScanOrchestrator::new(source);

    if let Some(max_notices) = config.feed.max_notices {
        orchestrator = orchestrator.with_max_notices(max_notices);
    }

    match &config.email {
        Some(email) if email.is_complete() => {
            orchestrator = orchestrator.with_notifier(SmtpNotifier::new(email)?);
            tracing::info!("📧 Email alerts enabled");
        }
        Some(_) => tracing::warn!("Email settings incomplete, alert delivery disabled"),
        None => tracing::info!("No [email] section, alert delivery disabled"),
    }

    match &config.insight {
        Some(insight) if insight.is_ready() => {
            orchestrator = orchestrator.with_annotator(GeminiAnnotator::new(
                insight.api_key.clone(),
                insight.model.clone(),
            ));
            tracing::info!("Insight annotation enabled");
        }
        Some(_) => tracing::warn!("Insight API key unresolved, annotation disabled"),
        None => {}
    }

    Ok(orchestrator)
}

async fn run_scans<S: NoticeSource>(
    orchestrator: ScanOrchestrator<S>,
    ctx: ScanContext,
    interval_secs: Option<u64>,
) {
    match interval_secs {
        None => {
            let report = orchestrator.run(&ctx).await;
            println!(
                "✅ Scan complete: {} fetched, {} relevant, {} matched, {} alerts sent",
                report.fetched,
                report.relevant,
                report.matched(),
                report.sent()
            );
            if report.fetched == 0 {
                println!("No current notices found. Use --test-mode to verify your alerts.");
            }
        }
        Some(secs) => {
            tracing::info!("Scanning every {}s, Ctrl-C to stop", secs);
            let mut ticker = tokio::time::interval(Duration::from_secs(secs));
            loop {
                ticker.tick().await;
                orchestrator.run(&ctx).await;
            }
        }
    }
}
