//! Status command implementation
//!
//! Lists recent provider-side export tasks. The provider is the only
//! place task state lives; this command is a window into it.

use crate::adapters::cloudwatch::CloudWatchLogsClient;
use crate::adapters::traits::LogsClient;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Maximum number of export tasks to list
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(limit = self.limit, "Listing export tasks");

        println!("📊 Export Tasks");
        println!();

        let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = CloudWatchLogsClient::new(&shared_config);

        let tasks = match client.list_export_tasks(self.limit).await {
            Ok(t) => t,
            Err(e) => {
                println!("❌ Failed to list export tasks");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        if tasks.is_empty() {
            println!("No export tasks found.");
            println!("Run 'logship export' to submit one.");
            return Ok(0);
        }

        for task in &tasks {
            println!(
                "  {}  {}  {} → s3://{}",
                task.state, task.task_id, task.log_group, task.destination
            );
        }
        println!();
        println!("{} task(s)", tasks.len());
        Ok(0)
    }
}
