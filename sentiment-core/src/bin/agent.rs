//! Queue agent
//!
//! Usage: `agent [queue.txt]` - one text per non-empty line.
//! Without a file the demo queue is processed.

use anyhow::{Context, Result};

use sentiment_core::logic::agent::{
    Agent, AgentConfig, HttpPredictionClient, LoggingExecutor, DEMO_QUEUE,
};

fn read_queue() -> Result<Vec<String>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read queue file {}", path))?;
            Ok(content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect())
        }
        None => Ok(DEMO_QUEUE.iter().map(|s| s.to_string()).collect()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AgentConfig::from_env();
    log::info!("Prediction API: {}", config.api_url);
    log::info!("Timeout: {:?}, pace: {:?}", config.request_timeout, config.pace);

    let queue = read_queue()?;
    let client = HttpPredictionClient::new(&config.api_url, config.request_timeout)?;
    let mut agent = Agent::new(client, LoggingExecutor::new(), &config);

    let report = agent.run(queue).await;
    log::info!(
        "Done: {} processed, {} failed, {} actions",
        report.processed,
        report.failed,
        report.actions_triggered
    );
    Ok(())
}
