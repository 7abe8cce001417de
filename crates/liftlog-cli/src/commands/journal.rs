use super::context::AppContext;
use anyhow::{Result, bail};
use liftlog_application::PersistenceSync;
use liftlog_core::journal::reconcile as reconcile_records;
use liftlog_core::session::IdentityKey;
use liftlog_core::timestamp::{DATE_FORMAT, parse_date};

pub fn list(context: &AppContext) -> Result<()> {
    let cleaned = reconcile_records(context.journal.read_all());
    if cleaned.records.is_empty() {
        println!("Journal is empty.");
        return Ok(());
    }

    for record in &cleaned.records {
        println!(
            "{}\t{:?}\t{}\t{}\t{} exercises, {} sets",
            record.identity_key(),
            record.kind,
            record.session_name,
            record.save_date,
            record.exercises.len(),
            record.set_count()
        );
    }
    if cleaned.changed {
        println!("(journal needs cleanup, run `liftlog journal reconcile`)");
    }
    Ok(())
}

pub fn reconcile(context: &AppContext, dry_run: bool) -> Result<()> {
    let cleaned = reconcile_records(context.journal.read_all());
    println!(
        "{} timestamps normalized, {} duplicates removed, {} records kept",
        cleaned.normalized,
        cleaned.duplicates_removed,
        cleaned.records.len()
    );

    if !cleaned.changed {
        println!("Journal already clean.");
    } else if dry_run {
        println!("Dry run, nothing written.");
    } else {
        PersistenceSync::new(context.journal.clone()).replace_all(&cleaned.records)?;
        println!("Journal rewritten.");
    }
    Ok(())
}

pub fn remove(context: &AppContext, date: &str, name: &str) -> Result<()> {
    let Some(day) = parse_date(date) else {
        bail!("Invalid date '{}', expected YYYY-MM-DD", date);
    };
    let key = IdentityKey::freeform(&day.format(DATE_FORMAT).to_string(), name);

    if !PersistenceSync::new(context.journal.clone()).remove(&key)? {
        bail!("No journal record for {}", key);
    }
    println!("Removed {}", key);
    Ok(())
}
