//! `wg approvals` - list currently approved resources

use anyhow::{Context, Result};
use chrono::Utc;

use crate::cli::{ApprovalsArgs, GlobalArgs};
use crate::context::AppContext;

pub async fn execute(args: &ApprovalsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = AppContext::new(global)?;
    let store = ctx.store();

    let resources = store
        .list_approved(args.workspace_id.as_deref())
        .await
        .context("Failed to list approved resources")?;

    // The SQL filter covers approval and revocation; expiration depends on
    // "now" and is applied here.
    let now = Utc::now();
    let mut shown = 0usize;
    for resource in &resources {
        if !resource.currently_approved(now) {
            continue;
        }
        shown += 1;
        let expiration = resource
            .expiration_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<30} {:<16} approved_by={} expires={}",
            resource.resource_name, resource.workspace_id, resource.approved_by, expiration
        );
    }

    println!("{shown} approved resource(s)");
    Ok(())
}
