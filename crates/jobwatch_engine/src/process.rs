use jobwatch_core::{decide, format_message, Decision, Listing, ListingId, SeenSet};
use jobwatch_logging::{watch_debug, watch_info, watch_warn};

use crate::{DispatchAck, Notifier, RunError, RunSummary, WatchConfig};

/// Whether the run should keep paginating after a batch of listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Applies the dedup policy to listings and dispatches the new ones.
pub struct Processor<'a> {
    notifier: &'a dyn Notifier,
    config: &'a WatchConfig,
}

impl<'a> Processor<'a> {
    pub fn new(notifier: &'a dyn Notifier, config: &'a WatchConfig) -> Self {
        Self { notifier, config }
    }

    /// Processes one page's listings in order.
    ///
    /// Returns [`Flow::Stop`] once the dry-run notification went out. A listing
    /// the provider rejected is still recorded; a transport failure aborts the
    /// batch and leaves that listing unrecorded.
    pub async fn process(
        &self,
        listings: &[Listing],
        seen: &mut SeenSet,
        summary: &mut RunSummary,
    ) -> Result<Flow, RunError> {
        for listing in listings {
            let Some(message) = format_message(listing, &self.config.site_base) else {
                watch_debug!("Skipping listing without a name: {:?}", listing.id);
                continue;
            };

            if self.config.dry_run {
                summary.listings_seen += 1;
                let ack = self.dispatch(listing.id.as_ref(), &message, listing).await?;
                if ack.ok {
                    summary.notified += 1;
                } else {
                    summary.rejected += 1;
                }
                watch_info!("Dry run: sent one notification for {:?}", listing.name);
                return Ok(Flow::Stop);
            }

            let Some(id) = listing.id.as_ref() else {
                watch_warn!(
                    "Skipping listing {:?} without an id; it cannot be deduplicated",
                    listing.name
                );
                continue;
            };
            summary.listings_seen += 1;

            match decide(seen, id) {
                Decision::Notify => {
                    let ack = self.dispatch(Some(id), &message, listing).await?;
                    if ack.ok {
                        summary.notified += 1;
                    } else {
                        summary.rejected += 1;
                    }
                    seen.mark_seen(id.clone());
                }
                Decision::Record => {
                    seen.mark_seen(id.clone());
                }
            }
        }
        Ok(Flow::Continue)
    }

    async fn dispatch(
        &self,
        id: Option<&ListingId>,
        message: &str,
        listing: &Listing,
    ) -> Result<DispatchAck, RunError> {
        let ack = self
            .notifier
            .send(&self.config.chat_id, message, listing.image_url.as_deref())
            .await
            .map_err(|source| RunError::Dispatch {
                id: id.cloned(),
                source,
            })?;
        watch_info!("Notified listing {:?} (provider ok={})", id, ack.ok);
        Ok(ack)
    }
}
