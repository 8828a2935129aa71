//! Watch events and the applier loop.

use diskmap_core::Result;
use diskmap_inventory::SharedAggregator;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::object::DiscoveryResultObject;

/// One change observed on the discovery-result feed.
///
/// Added and modified collapse into [`WatchEvent::Applied`]: ingest is keyed
/// by node name and replace-semantics cover both cases.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// An object was created or updated
    Applied(DiscoveryResultObject),
    /// The object for a node was deleted
    Deleted {
        /// Node whose report went away
        node_name: String,
    },
}

/// Apply a single watch event to the aggregator.
///
/// Rejections (invalid or stale objects) are logged and swallowed: one bad
/// object must not wedge the feed.
///
/// # Errors
///
/// Propagates only errors that are not rejections.
pub fn apply_event(aggregator: &SharedAggregator, event: WatchEvent) -> Result<()> {
    match event {
        WatchEvent::Applied(object) => {
            let report = match object.into_report() {
                Ok(report) => report,
                Err(e) if e.is_rejection() => {
                    warn!(error = %e, "skipping undecodable discovery result");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            let node = report.node_name.clone();
            match aggregator.ingest(report) {
                Ok(()) => Ok(()),
                Err(e) if e.is_rejection() => {
                    warn!(node = %node, error = %e, "skipping rejected discovery result");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        WatchEvent::Deleted { node_name } => {
            aggregator.remove(&node_name);
            Ok(())
        }
    }
}

/// Drain a channel of watch events into the aggregator.
///
/// Runs until the sender side closes. Event-level failures are logged, never
/// fatal; the loop's only exit is channel closure.
pub async fn run(mut events: mpsc::Receiver<WatchEvent>, aggregator: SharedAggregator) {
    while let Some(event) = events.recv().await {
        if let Err(e) = apply_event(&aggregator, event) {
            warn!(error = %e, "failed to apply watch event");
        }
    }
    debug!("watch feed closed");
}
