use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use bulwark_core::impls::{BroadcastEventSink, TracingPresenter};
use bulwark_core::{
    ErrorContext, ErrorRecord, Exception, RawError, ReportOptions, ResilienceConfig,
    ResilienceService, RetryOptions, Severity,
};

#[derive(Parser)]
#[command(name = "bulwark")]
#[command(about = "Error classification, retry and fallback diagnostics", long_about = None)]
struct Cli {
    /// TOML config file (max_retries, base_delay_ms, log_errors, emit_events)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured attempt budget
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    /// Override the configured base backoff delay
    #[arg(long, global = true)]
    base_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize an error message and show how it would be presented
    Classify {
        message: String,

        /// Exception name (e.g. TypeError)
        #[arg(long)]
        name: Option<String>,

        /// Explicit error code (e.g. PERMISSION_DENIED)
        #[arg(long)]
        code: Option<String>,

        /// HTTP-like status
        #[arg(long)]
        status: Option<u16>,
    },
    /// Run a flaky operation through the retry executor
    Retry {
        /// How many times the operation fails before succeeding
        #[arg(long, default_value_t = 2)]
        failures: u32,

        /// Error message the operation fails with
        #[arg(long, default_value = "connect ECONNREFUSED 127.0.0.1:443")]
        error: String,
    },
    /// Run the fallback executor
    Fallback {
        #[arg(long)]
        primary_fails: bool,

        #[arg(long)]
        fallback_fails: bool,
    },
    /// Print the backoff schedule
    Delays {
        #[arg(long, default_value_t = 5)]
        attempts: u32,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    record: ErrorRecord,
    severity: Severity,
    user_message: String,
    retryable_on_first_attempt: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ResilienceConfig::load(path)?,
        None => ResilienceConfig::default(),
    };
    if let Some(max_retries) = cli.max_retries {
        config.max_retries = max_retries;
    }
    if let Some(base_delay_ms) = cli.base_delay_ms {
        config.base_delay_ms = base_delay_ms;
    }

    let bus = BroadcastEventSink::default();
    let mut events = bus.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::info!(
                    id = %event.id,
                    topic = %event.topic,
                    source = %event.source,
                    code = %event.data.code,
                    "event published"
                ),
                Err(RecvError::Lagged(n)) => tracing::warn!(skipped = n, "event listener lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let service = ResilienceService::builder()
        .config(config)
        .event_sink(Arc::new(bus.clone()))
        .presenter(Arc::new(TracingPresenter))
        .build()?;
    drop(bus);

    let context = ErrorContext::for_operation("bulwark-cli", command_name(&cli.command));
    let output = run(&service, cli.command, &context).await?;
    println!("{output}");

    // last sender goes away with the service; the listener drains and exits
    drop(service);
    listener.await?;
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Classify { .. } => "classify",
        Command::Retry { .. } => "retry",
        Command::Fallback { .. } => "fallback",
        Command::Delays { .. } => "delays",
    }
}

async fn run(
    service: &ResilienceService,
    command: Command,
    context: &ErrorContext,
) -> Result<String, serde_json::Error> {
    match command {
        Command::Classify {
            message,
            name,
            code,
            status,
        } => {
            let mut exc = Exception::new(message);
            exc.name = name;
            exc.code = code;
            exc.status = status;
            let raw = RawError::from(exc);

            let record = service.normalize(&raw);
            let classification = Classification {
                severity: service.determine_severity(&record),
                user_message: service.get_user_message(&raw, context),
                retryable_on_first_attempt: service.should_retry(
                    &raw,
                    1,
                    service.policy().max_retries,
                ),
                record,
            };
            service.report(raw, context, &ReportOptions::default());
            serde_json::to_string_pretty(&classification)
        }
        Command::Retry { failures, error } => {
            let calls = AtomicU32::new(0);
            let outcome = service
                .handle_async_with_retry(
                    || {
                        let n = calls.fetch_add(1, Ordering::SeqCst);
                        let error = error.clone();
                        async move {
                            if n < failures {
                                Err(Exception::new(error))
                            } else {
                                Ok(serde_json::json!({ "attempt": n + 1 }))
                            }
                        }
                    },
                    context,
                    RetryOptions::new().on_retry(|err, attempt, delay| {
                        tracing::info!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = err.message().unwrap_or_default(),
                            "scheduling retry"
                        );
                    }),
                )
                .await;
            serde_json::to_string_pretty(&outcome)
        }
        Command::Fallback {
            primary_fails,
            fallback_fails,
        } => {
            let outcome = service
                .handle_with_fallback(
                    || async move {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        if primary_fails {
                            Err(Exception::new("Failed to fetch remote project"))
                        } else {
                            Ok("remote")
                        }
                    },
                    || async move {
                        if fallback_fails {
                            Err(Exception::new("ENOENT: local cache missing"))
                        } else {
                            Ok("local cache")
                        }
                    },
                    context,
                )
                .await;
            serde_json::to_string_pretty(&outcome)
        }
        Command::Delays { attempts } => {
            let schedule: Vec<_> = (1..=attempts)
                .map(|attempt| {
                    serde_json::json!({
                        "attempt": attempt,
                        "delayMs": service.get_retry_delay(attempt).as_millis() as u64,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&schedule)
        }
    }
}
