//! Human-readable terminal renderer.

use chrono::Utc;
use openclaw_common::{InstanceSummary, ListOutput, StatusOutput};
use owo_colors::OwoColorize as _;

use crate::output::OutputContext;

/// Renders query results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the instance table. Printed even when `quiet`; it is the
    /// command's result, not progress.
    pub fn render_list(&self, list: &ListOutput) {
        for line in list_table(list) {
            println!("{}", self.style_row(&line));
        }
    }

    fn style_row(&self, row: &TableRow) -> String {
        match row {
            TableRow::Header(text) => text.style(self.ctx.styles.bold).to_string(),
            TableRow::Instance { text, state_col, state } => {
                let (left, right) = text.split_at(*state_col);
                format!("{left}{}", right.style(self.ctx.styles.state(*state)))
            }
        }
    }

    /// Render one instance's status.
    pub fn render_status(&self, status: &StatusOutput) {
        println!();
        println!(
            "  {}",
            format!("Instance '{}'", status.name).style(self.ctx.styles.header)
        );
        println!();
        println!(
            "  {}  {}",
            format!("{:<14}", "State:").style(self.ctx.styles.dim),
            status.state.as_str().style(self.ctx.styles.state(status.state))
        );
        self.kv("Service:", &status.service);
        self.kv(
            "Ports:",
            &format!("gateway {}, bridge {}", status.gateway_port, status.bridge_port),
        );
        self.kv("State dir:", &status.state_dir);
        self.kv("Workspace:", &status.workspace_dir);
        self.kv("Unit file:", &status.unit_file);

        println!();
        match &status.container {
            Some(container) => {
                self.kv("Container:", &short_id(&container.id));
                self.kv("Image:", &container.image);
                self.kv("Status:", &container.status);
                if let Some(started) = container.started_at {
                    let secs = (Utc::now() - started).num_seconds().max(0);
                    self.kv(
                        "Started:",
                        &format!(
                            "{} ({} ago)",
                            started.format("%Y-%m-%d %H:%M:%S UTC"),
                            format_uptime(secs.unsigned_abs())
                        ),
                    );
                }
            }
            None => self.kv("Container:", "not present"),
        }
    }

    fn kv(&self, key: &str, value: &str) {
        println!("  {}  {value}", format!("{key:<14}").style(self.ctx.styles.dim));
    }
}

/// One rendered table line; styling is applied after padding so columns
/// stay aligned with colors on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Header(String),
    Instance {
        text: String,
        state_col: usize,
        state: crate::domain::InstanceState,
    },
}

/// Lay out the `list` table: one header row, then one row per instance.
#[must_use]
pub fn list_table(list: &ListOutput) -> Vec<TableRow> {
    let name_w = column_width("NAME", list.instances.iter().map(|i| i.name.len()));
    let svc_w = column_width("SERVICE", list.instances.iter().map(|i| i.service.len()));

    let row = |name: &str, gw: &str, br: &str, svc: &str| {
        format!("{name:<name_w$}  {gw:<8}  {br:<8}  {svc:<svc_w$}  ")
    };

    let mut rows = vec![TableRow::Header(format!(
        "{}STATE",
        row("NAME", "GATEWAY", "BRIDGE", "SERVICE")
    ))];
    rows.extend(list.instances.iter().map(|i: &InstanceSummary| {
        let prefix = row(
            &i.name,
            &i.gateway_port.to_string(),
            &i.bridge_port.to_string(),
            &i.service,
        );
        TableRow::Instance {
            state_col: prefix.len(),
            text: format!("{prefix}{}", i.state),
            state: i.state,
        }
    }));
    rows
}

fn column_width(header: &str, values: impl Iterator<Item = usize>) -> usize {
    values.fold(header.len(), usize::max)
}

fn short_id(id: &str) -> String {
    id.chars().take(12).collect()
}

/// Format a duration in seconds as `Xd Yh`, `Xh Ym`, or `Xm`.
#[must_use]
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
