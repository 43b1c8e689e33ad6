use clap::Parser;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "tria",
    about = "Support ticket triage gateway: classify, route, reply",
    version
)]
/// Command-line and environment configuration for the triage gateway.
pub struct Cli {
    #[arg(
        long,
        env = "TRIA_BIND",
        default_value = "127.0.0.1:8080",
        help = "Address the triage gateway listens on."
    )]
    pub bind: String,

    #[arg(
        long,
        env = "TRIA_AGENT_RUNTIME_URL",
        help = "Base URL of the conversational-agent runtime."
    )]
    pub agent_runtime_url: String,

    #[arg(
        long,
        env = "TRIA_LANGUAGE_URL",
        help = "Base URL of the language detection/translation service."
    )]
    pub language_url: String,

    #[arg(
        long,
        env = "TRIA_NOTIFY_URL",
        help = "Base URL of the pub/sub notification service. Required only when --notify-topic-arn is set."
    )]
    pub notify_url: Option<String>,

    #[arg(
        long,
        env = "TRIA_NOTIFY_TOPIC_ARN",
        help = "Notification topic ARN for customer emails on the custom path. Optional; its absence is only fatal when that path is reached."
    )]
    pub notify_topic_arn: Option<String>,

    #[arg(
        long,
        env = "TRIA_DLQ_URL",
        help = "Dead-letter queue URL for unprocessable requests. Optional."
    )]
    pub dlq_url: Option<String>,

    #[arg(
        long,
        env = "TRIA_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Per-call timeout for every external service request."
    )]
    pub request_timeout_ms: u64,

    #[arg(long, env = "TRIA_MAIN_AGENT_ID", help = "Routing agent identifier.")]
    pub main_agent_id: String,
    #[arg(long, env = "TRIA_MAIN_AGENT_ALIAS", help = "Routing agent alias identifier.")]
    pub main_agent_alias: String,

    #[arg(long, env = "TRIA_COST_AGENT_ID", help = "Cost-optimization agent identifier.")]
    pub cost_agent_id: String,
    #[arg(long, env = "TRIA_COST_AGENT_ALIAS", help = "Cost-optimization agent alias identifier.")]
    pub cost_agent_alias: String,

    #[arg(long, env = "TRIA_SECURITY_AGENT_ID", help = "Security agent identifier.")]
    pub security_agent_id: String,
    #[arg(long, env = "TRIA_SECURITY_AGENT_ALIAS", help = "Security agent alias identifier.")]
    pub security_agent_alias: String,

    #[arg(long, env = "TRIA_ALARM_AGENT_ID", help = "Alarm agent identifier.")]
    pub alarm_agent_id: String,
    #[arg(long, env = "TRIA_ALARM_AGENT_ALIAS", help = "Alarm agent alias identifier.")]
    pub alarm_agent_alias: String,

    #[arg(long, env = "TRIA_CUSTOM_AGENT_ID", help = "Custom-request agent identifier.")]
    pub custom_agent_id: String,
    #[arg(long, env = "TRIA_CUSTOM_AGENT_ALIAS", help = "Custom-request agent alias identifier.")]
    pub custom_agent_alias: String,
}
