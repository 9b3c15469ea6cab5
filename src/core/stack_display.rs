// src/core/stack_display.rs

use std::fmt;
use tabled::{
    Table, Tabled,
    settings::{Color, Style, object::{Cell, Rows}},
};

use crate::{
    constants::{CLI_NAME, EMPTY_CELL},
    models::{DeploymentInfo, InstanceInfo, StackSnapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Stack,
    Instance,
    App,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stack => "STACK",
            Self::Instance => "INSTANCE",
            Self::App => "APP",
        })
    }
}

/// One unstyled table row. Styling happens only when rendering.
#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    #[tabled(rename = "Type")]
    pub kind: RowKind,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Public / Private IP")]
    pub ip: String,
    #[tabled(rename = "Completed")]
    pub completed: String,
    #[tabled(rename = "Command")]
    pub command: String,
}

/// Builds the rows for one stack: the stack itself, its instances with a
/// start/stop hint, then its apps with a deploy hint and last deployment.
pub fn build_rows(snapshot: &StackSnapshot) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(1 + snapshot.instances.len() + snapshot.apps.len());

    rows.push(DisplayRow {
        kind: RowKind::Stack,
        name: snapshot.stack.name.clone(),
        status: EMPTY_CELL.to_string(),
        ip: EMPTY_CELL.to_string(),
        completed: EMPTY_CELL.to_string(),
        command: EMPTY_CELL.to_string(),
    });

    for instance in &snapshot.instances {
        rows.push(DisplayRow {
            kind: RowKind::Instance,
            name: instance.hostname.clone(),
            status: instance.status.to_string(),
            ip: ip_cell(instance),
            completed: EMPTY_CELL.to_string(),
            command: format!(
                "{} {} {}",
                CLI_NAME,
                instance.status.opposite_action(),
                instance.hostname
            ),
        });
    }

    let deploy_target = snapshot
        .instances
        .first()
        .map_or("{instance}", |i| i.hostname.as_str());

    for app in &snapshot.apps {
        let (status, completed) = match &app.latest_deployment {
            Some(deployment) => (deployment.status.clone(), completed_cell(deployment)),
            None => (EMPTY_CELL.to_string(), EMPTY_CELL.to_string()),
        };
        rows.push(DisplayRow {
            kind: RowKind::App,
            name: app.short_name.clone(),
            status,
            ip: EMPTY_CELL.to_string(),
            completed,
            command: format!("{} deploy {} {}", CLI_NAME, app.short_name, deploy_target),
        });
    }

    rows
}

fn ip_cell(instance: &InstanceInfo) -> String {
    match (&instance.public_ip, &instance.private_ip) {
        (Some(public), Some(private)) => format!("{} / {}", public, private),
        (None, Some(private)) => format!("{} / {}", EMPTY_CELL, private),
        (Some(public), None) => format!("{} / {}", public, EMPTY_CELL),
        (None, None) => EMPTY_CELL.to_string(),
    }
}

fn completed_cell(deployment: &DeploymentInfo) -> String {
    match (&deployment.completed_at, deployment.duration_seconds) {
        (Some(at), Some(secs)) => format!("{} ({} secs)", at, secs),
        _ => EMPTY_CELL.to_string(),
    }
}

const STATUS_COLUMN: usize = 2;

fn kind_color(kind: RowKind) -> Color {
    match kind {
        RowKind::Stack => Color::FG_BLUE | Color::BOLD,
        RowKind::Instance => Color::FG_MAGENTA | Color::BOLD,
        RowKind::App => Color::FG_CYAN | Color::BOLD,
    }
}

fn status_color(status: &str) -> Option<Color> {
    match status {
        "online" | "successful" => Some(Color::FG_GREEN),
        "stopped" | "failed" => Some(Color::FG_RED),
        EMPTY_CELL => None,
        _ => Some(Color::FG_YELLOW),
    }
}

/// Renders rows as an aligned table. Colours follow the `colored` switch, so
/// `NO_COLOR` and non-terminal output get plain text.
pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::blank());

    if colored::control::SHOULD_COLORIZE.should_colorize() {
        table.modify(Rows::first(), Color::BOLD);
        // Row 0 is the header.
        for (index, row) in rows.iter().enumerate() {
            table.modify(Cell::new(index + 1, 0), kind_color(row.kind));
            table.modify(Cell::new(index + 1, 1), Color::BOLD);
            if let Some(color) = status_color(&row.status) {
                table.modify(Cell::new(index + 1, STATUS_COLUMN), color);
            }
        }
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}

/// Prints one table per stack, separated by blank lines.
pub fn print_snapshots(snapshots: &[StackSnapshot]) {
    println!();
    for snapshot in snapshots {
        print!("{}", render_table(&build_rows(snapshot)));
        println!();
    }
}
