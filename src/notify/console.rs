use crate::notify::Publisher;
use async_trait::async_trait;
use tracing::info;

/// Dry-run publisher: prints the alert instead of sending it
#[derive(Debug, Default, Clone)]
pub struct ConsolePublisher;

impl ConsolePublisher {
    pub fn render(message: &str) -> String {
        let rule = "=".repeat(60);
        format!(
            "\n{rule}\nDRY RUN - Would have published:\n{rule}\n{message}\n{rule}\n"
        )
    }
}

#[async_trait]
impl Publisher for ConsolePublisher {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, _title: &str, message: &str) -> bool {
        println!("{}", Self::render(message));
        info!("Dry run: alert printed to console");
        true
    }
}
