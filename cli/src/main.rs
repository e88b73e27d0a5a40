//! CLI entrypoint for finquery
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use finquery_application::{
    AnswerQueryInput, AnswerQueryUseCase, ExtractTextUseCase, LookupIndicatorUseCase, NoQueryLogger,
    QueryLogger, ToolDispatcher, ToolSchemaPort,
};
use finquery_infrastructure::config::{FileConfig, FileLoggingConfig};
use finquery_infrastructure::tools::{
    EconomicIndicatorTool, FinancialNewsTool, HistoricalPriceTool, ImageGenerationTool,
    MarketSentimentTool, RegionalAnnouncementsTool, RegionalIndicatorTool, StockQuoteTool,
    SyntheticRegion,
};
use finquery_infrastructure::{
    AlphaVantageClient, ConfigLoader, GeminiLlmGateway, IndicatorCache, JsonSchemaToolConverter,
    JsonlQueryLogger, NewsApiClient, OcrSpaceClient, OpenAiClient, Severity, ToolRegistry,
    TradingEconomicsClient, build_http_client,
};
use finquery_presentation::http::dto::QueryResponse;
use finquery_presentation::{AppState, Cli, Command, router, serve};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, &config.logging)?;
    info!("Starting finquery");

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("Config {}: {}", issue.field, issue.message),
            Severity::Warning => warn!("Config {}: {}", issue.field, issue.message),
        }
    }

    // === Dependency Injection ===
    let app = App::build(&config)?;

    match cli.command() {
        Command::Serve { host, port } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            let routes = router(app.state, &server.cors_origins);
            serve(&server.bind_address(), routes)
                .await
                .with_context(|| format!("Server on {} stopped", server.bind_address()))?;
        }
        Command::Ask { query } => {
            let output = app
                .state
                .answer
                .execute(AnswerQueryInput::new(query))
                .await?;
            let response = QueryResponse::from(output.envelope);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Tools => {
            let declarations = app
                .schema
                .all_tools_schema(app.state.answer.dispatcher().tool_spec());
            println!("{}", serde_json::to_string_pretty(&declarations)?);
        }
    }

    Ok(())
}

/// Fully wired application
struct App {
    state: AppState,
    schema: JsonSchemaToolConverter,
}

impl App {
    fn build(config: &FileConfig) -> Result<Self> {
        let http = build_http_client(&config.http).context("Failed to build HTTP client")?;
        let params = config.pipeline.to_params();
        let providers = &config.providers;

        let gateway = Arc::new(GeminiLlmGateway::from_config(http.clone(), &config.model));
        let market = Arc::new(AlphaVantageClient::new(http.clone(), &providers.alpha_vantage));
        let news = Arc::new(NewsApiClient::new(http.clone(), &providers.news_api));
        let indicators = Arc::new(TradingEconomicsClient::new(
            http.clone(),
            &providers.trading_economics,
        ));
        let openai = Arc::new(OpenAiClient::new(
            http.clone(),
            &providers.openai,
            config.pipeline.voice.clone(),
        ));
        let ocr = Arc::new(OcrSpaceClient::new(http, &providers.ocr_space));

        let mut indicator_tool =
            EconomicIndicatorTool::new(indicators).with_default_country(&params.default_country);
        if config.cache.is_enabled() {
            indicator_tool = indicator_tool
                .with_cache(IndicatorCache::new(config.cache.capacity, config.cache.ttl()));
        } else {
            info!("Indicator cache disabled");
        }

        let regional = SyntheticRegion::new();
        let registry = Arc::new(
            ToolRegistry::new()
                .register(StockQuoteTool::new(market.clone()))
                .register(HistoricalPriceTool::new(market).with_max_points(params.history_points))
                .register(FinancialNewsTool::new(news).with_page_size(params.news_page_size))
                .register(indicator_tool)
                .register(RegionalAnnouncementsTool::new(regional.clone()))
                .register(MarketSentimentTool::new(regional.clone()))
                .register(RegionalIndicatorTool::new(regional))
                .register(ImageGenerationTool::new(openai.clone())),
        );
        let missing = registry.missing_kinds();
        if !missing.is_empty() {
            warn!("Tools without an executor: {:?}", missing);
        }

        let query_logger = query_logger(&config.logging);
        let schema = JsonSchemaToolConverter;
        let dispatcher = ToolDispatcher::new(registry.clone()).with_query_logger(query_logger.clone());

        let answer = AnswerQueryUseCase::new(gateway, dispatcher, Arc::new(JsonSchemaToolConverter))
            .with_speech(openai)
            .with_params(params.clone())
            .with_query_logger(query_logger);
        let lookup = LookupIndicatorUseCase::new(registry).with_params(params);
        let extract = ExtractTextUseCase::new(ocr);

        info!(
            "Wired {} tools, model {}",
            answer.dispatcher().tool_spec().len(),
            config.model.name
        );

        Ok(Self {
            state: AppState::new(answer, lookup, extract, &schema),
            schema,
        })
    }
}

fn query_logger(logging: &FileLoggingConfig) -> Arc<dyn QueryLogger> {
    match logging.query_log.as_deref() {
        Some(path) => match JsonlQueryLogger::new(path) {
            Some(logger) => {
                info!("Query transcript: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoQueryLogger),
        },
        None => Arc::new(NoQueryLogger),
    }
}

/// Set up stderr logging plus an optional daily-rolling file.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match logging.dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir))?;
            let appender = tracing_appender::rolling::daily(dir, "finquery.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
