use around_core::models::DiscoveryStatus;
use around_discovery::DiscoveryCoordinator;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(POLL_INTERVAL);
    pb
}

/// Spinner label for a discovery status
pub fn status_label(status: DiscoveryStatus) -> &'static str {
    match status {
        DiscoveryStatus::LoadingLocation => "Loading geo location...",
        DiscoveryStatus::LoadingPosts => "Loading posts...",
        DiscoveryStatus::Idle | DiscoveryStatus::Error | DiscoveryStatus::Ready => "Working...",
    }
}

/// Spinner following a discovery coordinator's status
pub struct DiscoveryProgress {
    spinner: ProgressBar,
    watcher: Option<JoinHandle<()>>,
}

impl DiscoveryProgress {
    /// Start watching; a hidden spinner is used when `enabled` is false
    pub fn watch(coordinator: Arc<DiscoveryCoordinator>, enabled: bool) -> Self {
        if !enabled {
            return Self { spinner: ProgressBar::hidden(), watcher: None };
        }

        let spinner = create_spinner(status_label(coordinator.state().status));
        let handle = spinner.clone();
        let watcher = tokio::spawn(async move {
            loop {
                handle.set_message(status_label(coordinator.state().status));
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        });

        Self { spinner, watcher: Some(watcher) }
    }

    pub fn finish(self) {
        if let Some(watcher) = &self.watcher {
            watcher.abort();
        }
        self.spinner.finish_and_clear();
    }
}
