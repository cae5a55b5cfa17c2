//! Waffice - roster list views on the command line.
//!
//! Loads a members or applications snapshot exported by the dashboard
//! backend, runs it through the `waffice-listview` engine with the query
//! given on the command line, and renders the resulting page as a table or
//! as structured data.
//!
//! ```text
//! waffice members --data members.json --search 김 --sort generation:desc --page 2
//! waffice applications --data apps.json --select 3 --select 7 --output json
//! ```

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod table;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use waffice_listview::{
    ColumnFilter, ListSettings, ListView, RecordId, ViewResult, DEFAULT_PAGE_WINDOW,
};

use crate::cli::{Cli, Command, ListArgs, MemberArgs};
use crate::config::Config;
use crate::models::{Application, Member, TableRow, DEFAULT_AFFILIATION, DEFAULT_ROLE};
use crate::output::{serialize_csv, serialize_structured, OutputMode};
use crate::table::Table;

/// The computed page plus everything the pagination controls need.
#[derive(Debug, Serialize)]
pub struct Report<'r, T> {
    pub records: Vec<&'r T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_window: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
    pub selected: Vec<RecordId>,
    pub page_selected: bool,
}

/// Runs one command and returns the rendered output.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = Config::load(cli.config.as_deref())?;
    let mode = cli.output.resolve_auto();

    match &cli.command {
        Command::Members(args) => {
            let records: Vec<Member> = load_records(&args.list.data)?;
            let mut screen = ListView::new(settings_for(config.members, &args.list)?);
            apply_member_filters(&mut screen, args);
            let report = build_report(&mut screen, &records, &args.list)?;
            render(&report, mode)
        }
        Command::Applications(args) => {
            let records: Vec<Application> = load_records(&args.list.data)?;
            let mut screen = ListView::new(settings_for(config.applications, &args.list)?);
            let report = build_report(&mut screen, &records, &args.list)?;
            render(&report, mode)
        }
    }
}

/// Reads a JSON array of records.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;
    let records: Vec<T> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse records in {}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Applies command-line overrides on top of the configured settings.
fn settings_for(mut settings: ListSettings, args: &ListArgs) -> anyhow::Result<ListSettings> {
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if !args.search_fields.is_empty() {
        settings.search_fields = args.search_fields.clone();
    }
    settings.validate().context("invalid --page-size")?;
    Ok(settings)
}

fn apply_member_filters(screen: &mut ListView, args: &MemberArgs) {
    let query = screen.query_mut();
    if let Some(role) = &args.role {
        query.set_column_filter(ColumnFilter::equals_or("role", role.as_str(), DEFAULT_ROLE));
    }
    if let Some(affiliation) = &args.affiliation {
        // Deliberately unlike the web dashboard, which filters on the raw
        // value: an absent affiliation filters as 학부생, the way it displays.
        query.set_column_filter(ColumnFilter::equals_or(
            "affiliation",
            affiliation.as_str(),
            DEFAULT_AFFILIATION,
        ));
    }
    if !args.access_rights.is_empty() {
        query.set_column_filter(ColumnFilter::has_all(
            "access_rights",
            args.access_rights.iter().cloned(),
        ));
    }
}

/// Drives the screen's query from the shared arguments and computes the page.
///
/// The page number is applied after search and filters, which reset it.
pub fn build_report<'r, T: TableRow>(
    screen: &mut ListView,
    records: &'r [T],
    args: &ListArgs,
) -> anyhow::Result<Report<'r, T>> {
    let known: BTreeSet<RecordId> = records.iter().map(|r| r.record_id()).collect();
    if let Some(id) = args.select.iter().find(|id| !known.contains(id)) {
        bail!(
            "cannot select record {id}: no such record in {}",
            args.data.display()
        );
    }

    let query = screen.query_mut();
    query.set_filter_text(args.search.as_str());
    query.set_sort_keys(args.sort.clone());
    query.set_page(args.page).context("invalid --page")?;
    for id in &args.select {
        query.toggle(*id, true);
    }

    let view = screen.refresh(records)?;
    if args.select_page {
        screen.query_mut().select_page(&view.page_ids(), true);
    }
    tracing::debug!(
        total_count = view.total_count,
        page = view.effective_page,
        selected = screen.query().selected().len(),
        "page ready"
    );

    Ok(report_from(view, screen))
}

fn report_from<'r, T: TableRow>(view: ViewResult<&'r T>, screen: &ListView) -> Report<'r, T> {
    let page_ids = view.page_ids();
    Report {
        page_window: view.page_window(DEFAULT_PAGE_WINDOW),
        has_previous: view.has_previous(),
        has_next: view.has_next(),
        total_count: view.total_count,
        total_pages: view.total_pages,
        page: view.effective_page,
        selected: screen.query().selected().iter().copied().collect(),
        page_selected: screen.query().is_page_selected(&page_ids),
        records: view.page_records,
    }
}

/// Renders a report in the given (already resolved) mode.
pub fn render<T: TableRow>(report: &Report<'_, T>, mode: OutputMode) -> anyhow::Result<String> {
    match mode {
        OutputMode::Csv => Ok(serialize_csv(&report.records)?),
        m if m.is_structured() => Ok(serialize_structured(report, m)?),
        m => Ok(render_text(report, m.is_styled())),
    }
}

fn render_text<T: TableRow>(report: &Report<'_, T>, styled: bool) -> String {
    let mut headers = vec![String::new()];
    headers.extend(T::HEADERS.iter().map(|h| h.to_string()));
    let mut table = Table::new(headers);

    for record in &report.records {
        let selected = report.selected.contains(&record.record_id());
        let mut cells = vec![if selected { "[x]" } else { "[ ]" }.to_string()];
        cells.extend(record.cells());
        table.push_row(cells, selected);
    }

    let body = if table.is_empty() {
        "검색 결과가 없습니다.".to_string()
    } else {
        table.render(styled)
    };
    format!("{body}\n\n{}", footer(report))
}

/// `page 2/3 (25 records) « 1 [2] 3 »`, then the selection count.
pub fn footer<T>(report: &Report<'_, T>) -> String {
    let mut parts = vec![format!(
        "page {}/{} ({} records)",
        report.page, report.total_pages, report.total_count
    )];
    if report.has_previous {
        parts.push("«".to_string());
    }
    parts.extend(report.page_window.iter().map(|&p| {
        if p == report.page {
            format!("[{p}]")
        } else {
            p.to_string()
        }
    }));
    if report.has_next {
        parts.push("»".to_string());
    }
    format!("{}\n{} selected", parts.join(" "), report.selected.len())
}
