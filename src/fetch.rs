//! Turns the bounded, time-cursored listing endpoint into one complete,
//! deduplicated, newest-first result.

use crate::config::{ClientConfig, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use crate::error::Error;
use crate::parse::{parse_workout_collecting, record_id, record_start_time};
use crate::protocol::{LIST_COMMAND, PageSource};
use crate::types::{Cursor, FetchOutcome, SkipScope, Skipped};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub max_results: Option<usize>,
    pub before: Option<DateTime<Utc>>,
    pub after: Option<DateTime<Utc>>,
}

impl FetchOptions {
    /// `before < after` asks for everything outside `(before, after)`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.before, self.after), (Some(b), Some(a)) if b < a)
    }
}

pub struct PaginationEngine<S> {
    source: S,
    page_size: usize,
    max_pages: usize,
}

impl<S: PageSource> PaginationEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_config(source: S, cfg: &ClientConfig) -> Self {
        Self {
            source,
            page_size: cfg.page_size.max(1),
            max_pages: cfg.max_pages.max(1),
        }
    }

    pub fn fetch(&self, opts: FetchOptions) -> Result<FetchOutcome, Error> {
        if opts.is_inverted() {
            tracing::info!(
                max_results = ?opts.max_results,
                before = ?opts.before,
                after = ?opts.after,
                "fetching all workouts except the window"
            );

            let mut out = self.fetch_in_range(opts.max_results, None, opts.after)?;
            let satisfied = opts.max_results.is_some_and(|max| out.len() >= max);
            if !satisfied {
                out.append(self.fetch_in_range(opts.max_results, opts.before, None)?);
            }
            if let Some(max) = opts.max_results {
                out.workouts.truncate(max);
            }
            return Ok(out);
        }

        tracing::info!(
            max_results = ?opts.max_results,
            before = ?opts.before,
            after = ?opts.after,
            "fetching workouts"
        );
        self.fetch_in_range(opts.max_results, opts.before, opts.after)
    }

    fn fetch_in_range(
        &self,
        max_results: Option<usize>,
        before: Option<DateTime<Utc>>,
        after: Option<DateTime<Utc>>,
    ) -> Result<FetchOutcome, Error> {
        let mut cursor = Cursor::new(before, after);
        let mut out = FetchOutcome::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages = 0usize;
        let mut duplicates = 0usize;

        loop {
            if max_results.is_some_and(|max| out.len() >= max) {
                break;
            }
            if pages >= self.max_pages {
                tracing::warn!(
                    pages,
                    workouts = out.len(),
                    "page cap reached; stopping pagination"
                );
                break;
            }

            let page = self.source.fetch_page(&cursor, self.page_size)?;
            pages += 1;
            crate::dlog!("page={pages} records={} before={:?}", page.len(), cursor.before);

            if page.is_empty() {
                break;
            }
            let exhausted = page.len() < self.page_size;
            let next_before = page.iter().rev().find_map(record_start_time);

            for raw in &page {
                let id = record_id(raw);
                if let Some(id) = &id
                    && !seen.insert(id.clone())
                {
                    duplicates += 1;
                    crate::dlog!("duplicate workout id={id}");
                    continue;
                }

                match parse_workout_collecting(raw, &mut out.skipped) {
                    Ok(w) => out.workouts.push(w),
                    Err(reason) => {
                        tracing::warn!(workout = ?id, %reason, "skipping workout");
                        out.skipped.push(Skipped {
                            workout_id: id,
                            scope: SkipScope::Workout,
                            reason,
                        });
                    }
                }
            }

            if exhausted {
                break;
            }

            match next_before {
                Some(next) if cursor.before.is_none_or(|prev| next < prev) => {
                    cursor.before = Some(next);
                }
                Some(next) => {
                    tracing::warn!(cursor = %next, "cursor did not move backwards; stopping");
                    break;
                }
                None => {
                    return Err(Error::protocol(
                        LIST_COMMAND,
                        "cannot advance cursor: page has no readable start_time",
                    ));
                }
            }
        }

        if let Some(max) = max_results {
            out.workouts.truncate(max);
        }

        tracing::info!(
            pages,
            workouts = out.len(),
            skipped = out.skipped.len(),
            duplicates,
            "fetch window done"
        );
        Ok(out)
    }
}

/// `(workouts, tracks, points)` dropped during parsing.
pub fn count_skipped(skipped: &[Skipped]) -> (usize, usize, usize) {
    skipped
        .iter()
        .fold((0, 0, 0), |(w, t, p), s| match s.scope {
            SkipScope::Workout => (w + 1, t, p),
            SkipScope::Track => (w, t + 1, p),
            SkipScope::Point(_) => (w, t, p + 1),
        })
}
