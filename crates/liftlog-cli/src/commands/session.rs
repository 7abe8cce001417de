use super::context::AppContext;
use anyhow::{Context, Result};
use liftlog_application::BaselineResolver;
use liftlog_core::clock::SystemClock;
use liftlog_core::routine::RouteParam;
use liftlog_core::session::identity_key;
use liftlog_core::timestamp::parse_date;
use std::sync::Arc;

pub async fn show(
    context: &AppContext,
    route: &str,
    date: Option<&str>,
    member: Option<&str>,
) -> Result<()> {
    let route = RouteParam::parse(route, member).context("Route must not be blank")?;
    let date = date
        .map(|raw| parse_date(raw).with_context(|| format!("Invalid date '{}'", raw)))
        .transpose()?;

    let resolver = BaselineResolver::new(
        Arc::new(context.routine_service()?),
        context.journal.clone(),
        Arc::new(SystemClock),
        context.config.freeform_session_name.clone(),
    );
    let resolved = resolver.resolve(&route, date).await?;

    let output = serde_json::json!({
        "identityKey": identity_key(&resolved.session),
        "session": resolved.session,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
