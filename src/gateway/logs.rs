use tracing::info;
use crate::core::events::StatusEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::StatusListener;

#[derive(Debug, Default)]
pub struct LoggingListener {}

impl LoggingListener {
    pub fn new() -> Self {
        Self {}
    }
}

impl StatusListener for LoggingListener {
    fn on_status(&self, event: &StatusEvent) -> LibraryResult<()> {
        let json = serde_json::to_string(&event.item_ids())?;
        info!(event_id = event.event_id.as_str(), name = event.name.as_str(),
            mode = event.mode.as_str(), items = json.as_str(), "availability resolved");
        Ok(())
    }
}
