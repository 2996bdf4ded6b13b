use tokio::sync::watch;
use tokio::task::JoinHandle;
use crate::enums::save_status::SaveStatus;

/// Renders save-status transitions as log lines for the interactive
/// edit session.
pub struct SaveStatusLogger;

impl SaveStatusLogger {

    /// Watch the status channel until the sender side goes away.
    pub fn spawn(mut status_rx: watch::Receiver<SaveStatus>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while status_rx.changed().await.is_ok() {
                let status = *status_rx.borrow_and_update();
                Self::log_transition(status);
            }
        })
    }

    fn log_transition(status: SaveStatus) {
        match status {
            SaveStatus::Idle => log::debug!("{} idle", status.emoji()),
            SaveStatus::Saving => log::info!("{} Saving...", status.emoji()),
            SaveStatus::Saved => log::info!("{} Saved", status.emoji()),
            SaveStatus::Error => log::error!("{} Save failed - your latest change was not persisted", status.emoji()),
        }
    }
}
