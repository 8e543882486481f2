use anyhow::Context as _;
use vitaldb_core::{
    TrackSelection,
    chart::{self, PlotArea},
    util::{format_duration, format_time},
    vs::{self, CaseId, api},
};

use crate::config::Config;

#[derive(clap::Args)]
pub struct ViewArgs {
    case_id: u32,

    /// Comma-separated tracks to show. Defaults to the usual vitals, where recorded
    #[arg(long, value_delimiter = ',')]
    tracks: Vec<String>,

    /// Points to request per signal, overriding the config
    #[arg(long)]
    resolution: Option<u32>,
}

pub fn run(config: &Config, args: ViewArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(view(config, args))
}

async fn view(config: &Config, args: ViewArgs) -> anyhow::Result<()> {
    let client = api::Client::new(config.server.base_url.clone());
    let case_id = CaseId(args.case_id);

    let tracks = if args.tracks.is_empty() {
        let available = vs::fetch_tracks(&client, case_id)
            .await
            .with_context(|| format!("Failed to fetch tracks for case {case_id}"))?;
        TrackSelection::new(available)
            .selected()
            .iter()
            .map(|track| track.to_string())
            .collect()
    } else {
        args.tracks
    };
    anyhow::ensure!(!tracks.is_empty(), "Case {case_id} has none of the default tracks");

    let data = client
        .case_data(
            case_id.0,
            &api::DataRequest {
                signals: tracks.clone(),
                resolution: Some(args.resolution.unwrap_or(config.viewer.resolution)),
                ..Default::default()
            },
        )
        .await
        .with_context(|| format!("Failed to fetch data for case {case_id}"))?;
    if let Some(message) = &data.meta.message {
        tracing::warn!("{message}");
    }

    let statistics = client
        .statistics(case_id.0, &tracks, None, None)
        .await
        .with_context(|| format!("Failed to fetch statistics for case {case_id}"))?;

    println!(
        "Case {case_id}: {} of {} points",
        data.meta.returned_points, data.meta.original_points
    );
    if let [Some(start), _, Some(end)] = chart::time_axis(&data.data) {
        println!(
            "{} - {} ({})",
            format_time(start),
            format_time(end),
            format_duration(end - start)
        );
    }

    let area = PlotArea::new(config.viewer.chart_width, config.viewer.chart_height);
    for track in &tracks {
        println!();
        println!("{track}");
        match statistics.get(track) {
            Some(stats) => println!(
                "  min {} max {} mean {} std {} ({} samples, {} missing)",
                number(stats.min),
                number(stats.max),
                number(stats.mean),
                number(stats.std),
                stats.count,
                stats.missing
            ),
            None => println!("  no statistics"),
        }

        let series = chart::series(&data.data, track);
        let path = area.line_path(&series);
        if path.is_empty() {
            println!("  no samples");
        } else {
            println!("  path: {path}");
        }
    }

    Ok(())
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}
