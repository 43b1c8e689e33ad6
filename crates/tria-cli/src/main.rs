use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tria_agents::{AgentRegistry, AgentRuntimeClient, AgentRuntimeConfig, AgentTarget};
use tria_gateway::{run_gateway_server, GatewayServerConfig};
use tria_lang::{LanguageHttpClient, LanguageHttpConfig};
use tria_notify::{
    DeadLetterHttpQueue, DeadLetterHttpQueueConfig, DeadLetterSink, TopicHttpPublisher,
    TopicHttpPublisherConfig, TopicPublisher,
};
use tria_pipeline::TriagePipeline;

mod cli_args;

use cli_args::Cli;

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_pipeline(cli: &Cli) -> Result<TriagePipeline> {
    let language = Arc::new(
        LanguageHttpClient::new(LanguageHttpConfig {
            api_base: cli.language_url.clone(),
            request_timeout_ms: cli.request_timeout_ms,
        })
        .context("failed to build language service client")?,
    );

    let agents = Arc::new(
        AgentRuntimeClient::new(AgentRuntimeConfig {
            api_base: cli.agent_runtime_url.clone(),
            request_timeout_ms: cli.request_timeout_ms,
        })
        .context("failed to build agent runtime client")?,
    );

    let registry = AgentRegistry::new(
        AgentTarget::new(&cli.main_agent_id, &cli.main_agent_alias),
        AgentTarget::new(&cli.cost_agent_id, &cli.cost_agent_alias),
        AgentTarget::new(&cli.security_agent_id, &cli.security_agent_alias),
        AgentTarget::new(&cli.alarm_agent_id, &cli.alarm_agent_alias),
        AgentTarget::new(&cli.custom_agent_id, &cli.custom_agent_alias),
    );

    let publisher: Option<Arc<dyn TopicPublisher>> = match &cli.notify_topic_arn {
        Some(topic_arn) => {
            let api_base = cli
                .notify_url
                .clone()
                .context("--notify-url is required when --notify-topic-arn is set")?;
            Some(Arc::new(
                TopicHttpPublisher::new(TopicHttpPublisherConfig {
                    api_base,
                    topic_arn: topic_arn.clone(),
                    request_timeout_ms: cli.request_timeout_ms,
                })
                .context("failed to build notification publisher")?,
            ))
        }
        None => None,
    };

    let dead_letter: Option<Arc<dyn DeadLetterSink>> = match &cli.dlq_url {
        Some(queue_url) => Some(Arc::new(
            DeadLetterHttpQueue::new(DeadLetterHttpQueueConfig {
                queue_url: queue_url.clone(),
                request_timeout_ms: cli.request_timeout_ms,
            })
            .context("failed to build dead-letter queue client")?,
        )),
        None => None,
    };

    let detector: Arc<dyn tria_lang::LanguageDetector> = Arc::clone(&language) as _;
    let translator: Arc<dyn tria_lang::Translator> = language;

    Ok(TriagePipeline::new(
        detector,
        translator,
        agents,
        registry,
        publisher,
        dead_letter,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let pipeline = build_pipeline(&cli)?;

    run_gateway_server(GatewayServerConfig {
        bind: cli.bind.clone(),
        pipeline: Arc::new(pipeline),
    })
    .await
}
