use jobwatch_core::{ListingPage, SeenSet};
use jobwatch_logging::{watch_error, watch_info, watch_warn};

use crate::{
    random_user_agent, Flow, ListingSource, Notifier, Processor, RunError, SeenGuard, SeenStore,
    WatchConfig,
};

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub pages_fetched: u64,
    pub pages_skipped: u64,
    pub listings_seen: usize,
    pub notified: usize,
    pub rejected: usize,
    pub bootstrap: bool,
}

/// One full pass: load the seen-set, walk every page in order, save the set.
///
/// The seen-set is saved on every exit path, including a dispatch failure.
pub async fn run(
    config: &WatchConfig,
    source: &dyn ListingSource,
    notifier: &dyn Notifier,
) -> Result<RunSummary, RunError> {
    let mut guard = SeenGuard::acquire(SeenStore::new(config.state_path.clone()));
    let result = traverse(config, source, notifier, &mut guard).await;

    if let Err(err) = guard.finish() {
        watch_error!(
            "Failed to write seen-set to {:?}: {}",
            config.state_path,
            err
        );
    }

    match &result {
        Ok(summary) => watch_info!(
            "Run finished: {} pages fetched, {} skipped, {} listings, {} notified, {} rejected{}",
            summary.pages_fetched,
            summary.pages_skipped,
            summary.listings_seen,
            summary.notified,
            summary.rejected,
            if summary.bootstrap { " (bootstrap)" } else { "" }
        ),
        Err(err) => watch_error!("Run aborted: {}", err),
    }
    result
}

async fn traverse(
    config: &WatchConfig,
    source: &dyn ListingSource,
    notifier: &dyn Notifier,
    seen: &mut SeenSet,
) -> Result<RunSummary, RunError> {
    let user_agent = random_user_agent();
    let processor = Processor::new(notifier, config);
    let mut summary = RunSummary {
        bootstrap: seen.is_bootstrap(),
        ..RunSummary::default()
    };

    watch_info!("Processing page 1 of X using user agent {}", user_agent);
    let Some(first) = fetch_or_skip(source, 1, user_agent, &mut summary).await else {
        watch_warn!("First page unavailable; stopping pagination");
        return Ok(summary);
    };

    let flow = processor.process(&first.listings, seen, &mut summary).await?;
    if flow == Flow::Stop || config.dry_run {
        return Ok(summary);
    }

    let Some(paginator) = first.paginator else {
        watch_info!("First page carried no paginator; nothing more to fetch");
        return Ok(summary);
    };

    for page in paginator.remaining_pages() {
        watch_info!("Processing page {} of {}", page, paginator.max);
        let Some(listing_page) = fetch_or_skip(source, page, user_agent, &mut summary).await
        else {
            continue;
        };
        if processor
            .process(&listing_page.listings, seen, &mut summary)
            .await?
            == Flow::Stop
        {
            break;
        }
    }

    Ok(summary)
}

async fn fetch_or_skip(
    source: &dyn ListingSource,
    page: u64,
    user_agent: &str,
    summary: &mut RunSummary,
) -> Option<ListingPage> {
    match source.fetch_page(page, user_agent).await {
        Ok(listing_page) => {
            summary.pages_fetched += 1;
            Some(listing_page)
        }
        Err(err) => {
            watch_warn!("Failed to fetch page {}: {}; skipping it", page, err);
            summary.pages_skipped += 1;
            None
        }
    }
}
