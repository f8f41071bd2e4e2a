//! `openclaw-manager list`: every registered instance with live state.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::instance_query::list_instances;
use crate::output::human::HumanRenderer;
use crate::output::{json, progress};

/// Run `openclaw-manager list`.
///
/// # Errors
///
/// Returns an error only if the registry cannot be read.
pub async fn run(app: &AppContext) -> Result<()> {
    let spinner = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner("querying systemd..."));
    let list = list_instances(&app.registry, &app.systemctl, &app.config.layout()).await;
    if let Some(pb) = &spinner {
        progress::finish_clear(pb);
    }
    let list = list?;

    if app.is_json() {
        json::print(&list)
    } else {
        HumanRenderer::new(&app.output).render_list(&list);
        Ok(())
    }
}
