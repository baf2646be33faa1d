//! Posted-alert operations

use crate::database::traits::PostedOperations;
use crate::database::{Database, PostedStats};
use crate::errors::{AppError, AppResult};
use crate::types::SwapStep;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info, warn};

impl PostedOperations for Database {
    fn already_posted(&self, txid: &str, step: SwapStep) -> AppResult<bool> {
        let found = self
            .connection()
            .query_row(
                "SELECT 1 FROM posted WHERE txid = ?1 AND step = ?2",
                params![txid, step.as_str()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn mark_posted(
        &mut self,
        txid: &str,
        step: SwapStep,
        amount_sats: Option<u64>,
    ) -> AppResult<bool> {
        // SQLite integers are signed 64-bit; larger totals are recorded without an amount
        let amount = amount_sats.and_then(|sats| match i64::try_from(sats) {
            Ok(amount) => Some(amount),
            Err(_) => {
                warn!(
                    "Amount {} sats for {} does not fit in SQLite, storing NULL",
                    sats,
                    short_txid(txid)
                );
                None
            }
        });
        let posted_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let inserted = self.connection().execute(
            "INSERT OR IGNORE INTO posted (txid, step, amount_sats, posted_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![txid, step.as_str(), amount, posted_at],
        )?;

        if inserted > 0 {
            info!("Marked as posted: {} ({})", short_txid(txid), step);
        } else {
            debug!("Already recorded: {} ({})", short_txid(txid), step);
        }
        Ok(inserted > 0)
    }

    fn get_posted_stats(&self) -> AppResult<PostedStats> {
        let conn = self.connection();
        let mut stats = PostedStats::default();

        let mut stmt = conn.prepare(
            "SELECT step, COUNT(*), COALESCE(SUM(amount_sats), 0)
             FROM posted GROUP BY step",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        for row in rows {
            let (step, count, amount) = row?;
            let step: SwapStep = step.parse().map_err(AppError::InvalidData)?;
            let count = count.max(0) as u64;
            stats.by_step.insert(step, count);
            stats.total += count;
            stats.total_amount_sats = stats.total_amount_sats.saturating_add(amount.max(0) as u64);
        }

        stats.last_posted_at = conn.query_row("SELECT MAX(posted_at) FROM posted", [], |row| {
            row.get::<_, Option<String>>(0)
        })?;

        Ok(stats)
    }

    fn get_posted_steps(&self, txid: &str) -> AppResult<Vec<SwapStep>> {
        let mut stmt = self
            .connection()
            .prepare("SELECT step FROM posted WHERE txid = ?1")?;
        let mut steps = stmt
            .query_map(params![txid], |row| row.get::<_, String>(0))?
            .map(|step| {
                step.map_err(AppError::Database)
                    .and_then(|s| s.parse::<SwapStep>().map_err(AppError::InvalidData))
            })
            .collect::<AppResult<Vec<_>>>()?;
        steps.sort();
        Ok(steps)
    }
}

fn short_txid(txid: &str) -> &str {
    txid.get(..16).unwrap_or(txid)
}
