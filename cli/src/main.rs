//! CLI entrypoint for scholar-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use scholar_application::tools::catalog::default_tool_spec;
use scholar_application::{
    AgentConfig, AutoApprovePermission, AutoDenyPermission, ConversationContextPort,
    DisabledWeb, ExecuteToolsUseCase, KnowledgeBasePort, ResearchBackends, ScholarPort,
    ToolSchemaPort, TurnRunner, WebPort, research_toolkit,
};
use scholar_domain::tool::{SensitivityLevel, ToolDefinition, ToolSpec};
use scholar_infrastructure::{
    ConfigLoader, FileConfig, InMemoryConversationContext, InMemoryKnowledgeBase,
    JsonSchemaToolConverter, JsonlToolEventLogger, LibrarySnapshot, OfflineScholar, SimulatedOcr,
};
use scholar_presentation::{
    ApprovalMode, Cli, Command, ConsoleFormatter, InteractivePermissionPrompt, LevelFilter,
    OutputFormat, RunArgs, ToolsArgs, parse_call_file,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

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
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, &config);
    info!("Starting scholar-agent {}", env!("CARGO_PKG_VERSION"));

    let spec = default_tool_spec();
    let warnings = config.check(&spec)?;
    if !warnings.is_empty() {
        eprintln!("{}", ConsoleFormatter::format_issues(&warnings));
    }

    match cli.command {
        Some(Command::Tools(args)) => list_tools(&spec, &args),
        Some(Command::Check) => {
            if warnings.is_empty() {
                println!("{}", "Configuration OK".green());
            }
            Ok(())
        }
        Some(Command::Run(args)) => run_calls(&config, args).await,
        None => list_tools(&spec, &ToolsArgs::default()),
    }
}

/// Console logging at the `-v` level, plus a daily-rotated file when
/// `[logging] directory` is set.
fn init_logging(
    verbose: u8,
    config: &FileConfig,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.logging.directory() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "scholar-agent.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn list_tools(spec: &ToolSpec, args: &ToolsArgs) -> Result<()> {
    let level = args.level.map(|level| match level {
        LevelFilter::Read => SensitivityLevel::Read,
        LevelFilter::Write => SensitivityLevel::Write,
        LevelFilter::Destructive => SensitivityLevel::Destructive,
    });
    let mut tools: Vec<&ToolDefinition> = spec
        .all()
        .filter(|t| args.include_deprecated || t.deprecated.is_none())
        .filter(|t| level.is_none_or(|l| t.sensitivity == l))
        .collect();
    tools.sort_by(|a, b| a.name.cmp(&b.name));

    if args.json {
        let converter = JsonSchemaToolConverter;
        let schemas: Vec<_> = tools.iter().map(|t| converter.tool_to_schema(t)).collect();
        println!("{}", serde_json::to_string_pretty(&schemas)?);
    } else {
        print!("{}", ConsoleFormatter::format_catalog(&tools));
    }
    Ok(())
}

fn read_calls(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read tool calls from stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tool calls from {}", path.display()))
    }
}

#[cfg(feature = "web-tools")]
fn network_backends(config: &FileConfig) -> Result<(Arc<dyn WebPort>, Arc<dyn ScholarPort>)> {
    use scholar_infrastructure::{DuckDuckGoWeb, SemanticScholarClient};

    if !config.tools.web_enabled {
        return Ok((Arc::new(DisabledWeb), Arc::new(OfflineScholar)));
    }
    let tools = &config.tools;
    let web = DuckDuckGoWeb::new(&tools.user_agent, tools.request_timeout())?;
    let scholar = SemanticScholarClient::new(
        &tools.semantic_scholar_url,
        &tools.user_agent,
        tools.request_timeout(),
    )?;
    Ok((Arc::new(web), Arc::new(scholar)))
}

#[cfg(not(feature = "web-tools"))]
fn network_backends(config: &FileConfig) -> Result<(Arc<dyn WebPort>, Arc<dyn ScholarPort>)> {
    if config.tools.web_enabled {
        warn!("Built without the web-tools feature; web and academic tools are offline");
    }
    Ok((Arc::new(DisabledWeb), Arc::new(OfflineScholar)))
}

async fn run_calls(config: &FileConfig, args: RunArgs) -> Result<()> {
    let calls = parse_call_file(&read_calls(&args.calls)?)?;
    info!("Loaded {} tool calls", calls.len());

    let knowledge_base = Arc::new(match &args.library {
        Some(path) => InMemoryKnowledgeBase::from_snapshot(LibrarySnapshot::load(path)?),
        None => {
            warn!("No --library given; running against an empty library");
            InMemoryKnowledgeBase::default()
        }
    });
    let (web, scholar) = network_backends(config)?;
    let backends = ResearchBackends {
        knowledge_base: knowledge_base.clone() as Arc<dyn KnowledgeBasePort>,
        context: Arc::new(InMemoryConversationContext::new()) as Arc<dyn ConversationContextPort>,
        web,
        scholar,
        ocr: Arc::new(SimulatedOcr::new(knowledge_base.clone())),
    };

    let mut use_case =
        ExecuteToolsUseCase::new(research_toolkit(&backends, config.tools.handler_settings()));
    if let Some(path) = config.logging.tool_events()
        && let Some(logger) = JsonlToolEventLogger::new(&path)
    {
        use_case = use_case.with_event_logger(Arc::new(logger));
    }

    let mut agent_config: AgentConfig = config.to_agent_config();
    if let Some(scope) = args.scope {
        agent_config = agent_config.with_scope(scope);
    }
    agent_config = match args.approval {
        ApprovalMode::Prompt => {
            agent_config.with_permission_handler(Arc::new(InteractivePermissionPrompt::new()))
        }
        ApprovalMode::Approve => agent_config.with_permission_handler(Arc::new(AutoApprovePermission)),
        ApprovalMode::Deny => agent_config.with_permission_handler(Arc::new(AutoDenyPermission)),
        ApprovalMode::None => agent_config,
    };

    let mut runner = TurnRunner::new(Arc::new(use_case));
    let report = runner.run_turn(&calls, &agent_config).await?;

    match args.output {
        OutputFormat::Text => print!("{}", ConsoleFormatter::format_batch(&calls, &report.results)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_batch_json(&report.results)),
    }
    for tool in &report.exhausted_tools {
        warn!("Tool '{}' reached its retry limit", tool);
    }
    if let Some(pending) = runner.take_pending_approval() {
        warn!(
            "Call {} ({}) needs approval; rerun with --approval prompt or --approval approve",
            pending.call_id, pending.tool_name
        );
    }

    if args.save
        && let Some(path) = &args.library
    {
        knowledge_base.snapshot().await.save(path)?;
        info!("Saved library to {}", path.display());
    }

    if report.results.values().any(|r| !r.is_success()) {
        bail!("{} tool call(s) failed", report.results.values().filter(|r| !r.is_success()).count());
    }
    Ok(())
}
