use std::{fmt::Display, sync::mpsc, time::Duration};

use anyhow::Context as _;
use serde::Serialize;
use vitaldb_core::{
    HttpSource, Logic, LogicArgs, Notification, NotificationKind, Notifier,
    table::TableView,
    url_sync::{Location as _, MemoryLocation},
    vs::{CaseId, CaseRecord, TrackName, api},
};

use crate::config::Config;

#[derive(clap::Args)]
pub struct ListArgs {
    /// Table state as a query string, e.g. `q=gastrectomy&sort=age&dir=desc`
    #[arg(long, default_value = "")]
    query: String,

    /// Comma-separated case IDs to select
    #[arg(long, value_delimiter = ',')]
    select: Vec<u32>,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    #[serde(flatten)]
    view: TableView<'a>,
    selected: Vec<CaseId>,
    tracks: &'a [TrackName],
    query: String,
}

pub fn run(config: &Config, args: ListArgs) -> anyhow::Result<()> {
    let (notification_tx, notification_rx) = mpsc::channel();
    let mut logic = Logic::new(LogicArgs {
        source: HttpSource::new(
            api::Client::new(config.server.base_url.clone()),
            config.general.fetch_concurrency,
        ),
        location: MemoryLocation::new(args.query),
        notifier: Notifier::new(notification_tx),
    })
    .context("Failed to start background runtime")?;

    let tick_rate = Duration::from_millis(config.general.tick_rate_ms);
    loop {
        notification_rx.try_iter().for_each(|n| log_notification(&n));
        if logic.tick() {
            break;
        }
        if let Some(error) = logic.error() {
            anyhow::bail!("{error}");
        }
        std::thread::sleep(tick_rate);
    }
    notification_rx.try_iter().for_each(|n| log_notification(&n));

    for id in args.select {
        logic.table_mut().toggle_selected(CaseId(id));
    }

    let table = logic.table();
    let view = table.view();
    let selected = table.selected_ids();
    let query = table.location().query();

    if args.json {
        let output = ListOutput {
            view,
            selected,
            tracks: logic.tracks().selected(),
            query,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{:<2}{:>6} {:>5} {:>3} {:<20} {}",
        "", "ID", "Age", "Sex", "Department", "Operation"
    );
    for record in &view.rows {
        println!("{}", row(record, table.is_selected(record.id)));
    }
    println!();
    println!(
        "Page {}/{} ({} of {} cases)",
        view.current_page, view.total_pages, view.filtered_count, view.total_count
    );
    if !selected.is_empty() {
        let ids = selected.iter().map(|id| id.to_string()).collect::<Vec<_>>();
        println!("Selected: {}", ids.join(", "));
        println!("Viewer: ?{}", logic.viewer_query(selected[0]));
    }
    if !query.is_empty() {
        println!("Query: ?{query}");
    }

    Ok(())
}

fn row(record: &CaseRecord, selected: bool) -> String {
    format!(
        "{:<2}{:>6} {:>5} {:>3} {:<20} {}",
        if selected { "*" } else { "" },
        record.id.0,
        cell(record.age),
        cell(record.sex.map(|s| s.as_str())),
        cell(record.department.as_deref()),
        cell(record.operation.as_deref()),
    )
}

fn cell(value: Option<impl Display>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn log_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => {
            tracing::info!("{}: {}", notification.title, notification.description)
        }
        NotificationKind::Failure => {
            tracing::error!("{}: {}", notification.title, notification.description)
        }
    }
}
