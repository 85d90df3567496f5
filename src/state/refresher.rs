use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic league refresh. The worker's caches decide whether a tick
/// actually reaches the network.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut league_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        league_interval.tick().await;

        loop {
            league_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::LoadLeague)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
