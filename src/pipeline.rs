use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::Site;
use crate::error::{CandidateError, PipelineError};
use crate::fetch::Fetcher;
use crate::model::CandidateMember;
use crate::parser;
use crate::render;

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40} {pos}/{len} {msg}";

pub enum RunOutcome {
    /// The listing held no member references. The raw listing is kept for a debug dump.
    NoMembers { listing: String },
    Completed(RunReport),
}

pub struct CandidateFailure {
    pub candidate: CandidateMember,
    pub error: CandidateError,
}

pub struct RunReport {
    /// Rendered cards, in listing order.
    pub cards: Vec<String>,
    pub failures: Vec<CandidateFailure>,
    pub total: usize,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.cards.len()
    }
}

/// Index the listing, then fetch, normalize and render each member in turn.
///
/// Only a failed listing fetch aborts. A member whose detail cannot be fetched or
/// parsed is logged and left out.
pub async fn run<F>(
    fetcher: &F,
    site: &Site,
    limit: Option<usize>,
) -> Result<RunOutcome, PipelineError>
where
    F: Fetcher + ?Sized,
{
    let listing = fetcher.fetch_listing().await.map_err(PipelineError::Listing)?;
    let mut candidates = parser::index_members(&listing);
    if candidates.is_empty() {
        warn!("No members found in listing ({} bytes)", listing.len());
        return Ok(RunOutcome::NoMembers { listing });
    }
    if let Some(n) = limit {
        candidates.truncate(n);
    }

    let total = candidates.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut cards = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for candidate in candidates {
        pb.set_message(candidate.raw_display_name.clone());
        match process(fetcher, &candidate, site).await {
            Ok(card) => cards.push(card),
            Err(error) => {
                pb.suspend(|| {
                    warn!(
                        "Skipping {} ({}): {}",
                        candidate.raw_display_name, candidate.external_id, error
                    )
                });
                failures.push(CandidateFailure { candidate, error });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("Rendered {} of {} members ({} failed)", cards.len(), total, failures.len());
    Ok(RunOutcome::Completed(RunReport {
        cards,
        failures,
        total,
    }))
}

async fn process<F>(
    fetcher: &F,
    candidate: &CandidateMember,
    site: &Site,
) -> Result<String, CandidateError>
where
    F: Fetcher + ?Sized,
{
    let fragment = fetcher.fetch_detail(candidate).await?;
    let record = parser::normalize(&fragment, candidate, site)?;
    Ok(render::render_card(&record))
}
