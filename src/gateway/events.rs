use crate::core::events::StatusEvent;
use crate::core::library::LibraryResult;

// StatusListener lets collaborators observe freshly resolved availability.
// Listeners run synchronously after a fetched batch is merged and before display.
pub trait StatusListener: Sync + Send {
    fn on_status(&self, event: &StatusEvent) -> LibraryResult<()>;
}

impl<F> StatusListener for F
    where F: Fn(&StatusEvent) + Sync + Send {
    fn on_status(&self, event: &StatusEvent) -> LibraryResult<()> {
        self(event);
        Ok(())
    }
}
