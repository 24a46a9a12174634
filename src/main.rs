#![deny(warnings, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use endoapi::fetch::{FetchOptions, PaginationEngine, count_skipped};
use endoapi::types::Workout;
use endoapi::{
    ChunkFetcher, ClientConfig, Credentials, HttpTransport, authenticate, cli, dlog, utils,
};
use std::time::Duration;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let cfg = ClientConfig {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    }
    .with_page_size(cli.page_size)
    .with_max_pages(cli.max_pages);
    dlog!(
        "base_url={} page_size={} max_pages={} device_id={}",
        cfg.base_url,
        cfg.page_size,
        cfg.max_pages,
        cfg.device_id
    );

    let transport = HttpTransport::new(&cfg).context("Building HTTP client")?;
    let token = authenticate(&transport, &cfg, credentials(&cli)?).context("Authenticating")?;
    if cli.print_token {
        eprintln!("token: {token}");
    }

    let engine = PaginationEngine::with_config(ChunkFetcher::new(transport, token), &cfg);
    let outcome = engine
        .fetch(FetchOptions {
            max_results: cli.max_results,
            before: cli.before,
            after: cli.after,
        })
        .context("Fetching workouts")?;

    let (bad_workouts, bad_tracks, bad_points) = count_skipped(&outcome.skipped);
    if bad_workouts + bad_tracks + bad_points > 0 {
        tracing::warn!(
            workouts = bad_workouts,
            tracks = bad_tracks,
            points = bad_points,
            "some records could not be parsed and were skipped"
        );
    }
    tracing::info!(workouts = outcome.len(), "fetched workouts");

    if cli.json {
        let out = serde_json::to_string_pretty(&outcome.workouts)
            .context("Serializing workouts")?;
        println!("{out}");
        return Ok(());
    }

    for (i, w) in outcome.workouts.iter().enumerate() {
        print_row(i + 1, w, cli.details);
    }

    Ok(())
}

fn credentials(cli: &cli::Cli) -> Result<Credentials> {
    if let Some(token) = &cli.token {
        return Ok(Credentials::Token(token.clone()));
    }
    match (&cli.email, &cli.password) {
        (Some(email), Some(password)) => Ok(Credentials::Password {
            email: email.clone(),
            password: password.clone(),
        }),
        _ => bail!("Pass --token, or both --email and --password (or the ENDOMONDO_* env vars)."),
    }
}

fn print_row(n: usize, w: &Workout, details: bool) {
    let start = w.start_time.to_rfc3339();
    let dur = utils::format_duration(w.duration);
    let dist = utils::format_distance(w.distance);

    if details {
        let points = w.points.len();
        let comment = w.comment.as_deref().unwrap_or("");
        println!(
            "{n}\t{}\t{start}\t{dur}\t{}\t{dist}\t{points}\t{comment}",
            w.id, w.sport
        );
    } else {
        println!("{n}\t{start}\t{dur}\t{}\t{dist}", w.sport);
    }
}
