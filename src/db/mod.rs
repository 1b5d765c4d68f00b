// Database module - SQLite connection, fund total, transactions and AUM snapshots

pub mod models;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::FundError;
use crate::utils::{parse_effective_date, timestamp_from_epoch, DATE_FORMAT};
pub use models::{
    sort_snapshots, sort_transactions, AumSnapshot, FundTotal, Transaction, TransactionKind,
};

/// Open database connection
pub fn open_db(path: &Path) -> Result<Connection> {
    Connection::open(path).context(format!("Failed to open database at {:?}", path))
}

/// Initialize the database with schema
///
/// Creates the parent directory and the database file if needed, then runs
/// the schema SQL. Safe to call on an existing database.
pub fn init_database(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create database directory {:?}", parent))?;
    }

    info!("Initializing database at: {:?}", path);

    let conn = open_db(path)?;
    apply_schema(&conn)?;

    Ok(())
}

/// Run the schema SQL against an open connection
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(include_str!("schema.sql"))
        .context("Failed to execute schema")
}

/// Read the fund total row; a fund with no row yet has a total of zero.
pub fn get_fund_total(conn: &Connection) -> Result<FundTotal> {
    let row = conn
        .query_row(
            "SELECT amount, last_updated FROM fund_total WHERE id = 1",
            [],
            |row| {
                let amount = get_decimal_value(row, 0)?;
                let last_updated: Option<i64> = row.get(1)?;
                Ok((amount, last_updated))
            },
        )
        .optional()
        .context("Failed to read fund total")?;

    Ok(match row {
        Some((amount, last_updated)) => FundTotal {
            amount,
            last_updated: last_updated.and_then(timestamp_from_epoch),
        },
        None => FundTotal {
            amount: Decimal::ZERO,
            last_updated: None,
        },
    })
}

/// Current fund total
pub fn get_current_total(conn: &Connection) -> Result<Decimal> {
    Ok(get_fund_total(conn)?.amount)
}

fn set_current_total(conn: &Connection, amount: Decimal, now: DateTime<Utc>) -> Result<()> {
    conn.execute(
        "INSERT INTO fund_total (id, amount, last_updated) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET amount = excluded.amount, last_updated = excluded.last_updated",
        params![amount.to_string(), now.timestamp()],
    )
    .context("Failed to update fund total")?;
    Ok(())
}

/// Record a buy or sell.
///
/// Reads the current total, applies the signed amount, stores the new total
/// with a server timestamp and inserts the transaction carrying the
/// resulting total. Both writes happen in one SQLite transaction.
pub fn record_transaction(
    conn: &mut Connection,
    kind: TransactionKind,
    amount: Decimal,
    effective_date: NaiveDate,
) -> Result<Transaction> {
    if amount <= Decimal::ZERO {
        return Err(FundError::InvalidAmount(amount.to_string()).into());
    }

    let now = Utc::now();
    let tx = conn.transaction()?;

    let current = get_current_total(&tx)?;
    let resulting_total = current.checked_add(kind.signed(amount)).ok_or_else(|| {
        FundError::Storage(format!("fund total {} overflows when applying {}", current, amount))
    })?;

    set_current_total(&tx, resulting_total, now)?;
    tx.execute(
        "INSERT INTO transactions (kind, amount, date, resulting_total, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            kind.as_str(),
            amount.to_string(),
            effective_date.format(DATE_FORMAT).to_string(),
            resulting_total.to_string(),
            now.timestamp(),
        ],
    )
    .context("Failed to insert transaction")?;
    let id = tx.last_insert_rowid();

    tx.commit()?;

    info!(
        "Recorded {} of {} on {} (total {} -> {})",
        kind.as_str(),
        amount,
        effective_date,
        current,
        resulting_total
    );

    Ok(Transaction {
        id: Some(id),
        ..Transaction::new(kind, amount, effective_date, resulting_total)
    })
}

/// List transactions usable for performance calculations.
///
/// Rows without a resulting total are excluded. The result is ordered by
/// effective date, ties kept in arrival order.
pub fn list_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, amount, date, resulting_total
         FROM transactions
         WHERE resulting_total IS NOT NULL
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let id: i64 = row.get(0)?;
        let kind: String = row.get(1)?;
        let amount = get_decimal_value(row, 2)?;
        let date: String = row.get(3)?;
        let resulting_total = get_decimal_value(row, 4)?;
        Ok((id, kind, amount, date, resulting_total))
    })?;

    let mut transactions = Vec::new();
    for row in rows {
        let (id, kind_str, amount, date_str, resulting_total) = row?;
        let kind = match kind_str.parse::<TransactionKind>() {
            Ok(k) => k,
            Err(_) => {
                warn!("Skipping transaction {} with unknown kind '{}'", id, kind_str);
                continue;
            }
        };
        let effective_date = parse_effective_date(&date_str);
        if effective_date.is_none() {
            debug!("Transaction {} has unparseable date '{}'", id, date_str);
        }
        transactions.push(Transaction {
            id: Some(id),
            kind,
            amount,
            effective_date,
            resulting_total,
        });
    }

    sort_transactions(&mut transactions);
    Ok(transactions)
}

/// Record an AUM snapshot stamped with the current server time
pub fn insert_aum_snapshot(conn: &Connection, amount: Decimal) -> Result<AumSnapshot> {
    insert_aum_snapshot_at(conn, amount, Utc::now())
}

/// Record an AUM snapshot with an explicit timestamp
pub fn insert_aum_snapshot_at(
    conn: &Connection,
    amount: Decimal,
    recorded_at: DateTime<Utc>,
) -> Result<AumSnapshot> {
    conn.execute(
        "INSERT INTO aum_snapshots (amount, recorded_at) VALUES (?1, ?2)",
        params![amount.to_string(), recorded_at.timestamp()],
    )
    .context("Failed to insert AUM snapshot")?;

    info!("Recorded AUM snapshot {} at {}", amount, recorded_at);

    Ok(AumSnapshot {
        id: Some(conn.last_insert_rowid()),
        ..AumSnapshot::new(amount, recorded_at)
    })
}

/// List AUM snapshots ordered by timestamp
pub fn list_aum_snapshots(conn: &Connection) -> Result<Vec<AumSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, recorded_at FROM aum_snapshots ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let recorded_at: Option<i64> = row.get(2)?;
        Ok(AumSnapshot {
            id: Some(row.get(0)?),
            amount: get_decimal_value(row, 1)?,
            recorded_at: recorded_at.and_then(timestamp_from_epoch),
        })
    })?;

    let mut snapshots = rows.collect::<Result<Vec<_>, _>>()?;
    sort_snapshots(&mut snapshots);
    Ok(snapshots)
}

/// Everything the performance engines need, read in one go
#[derive(Debug, Clone)]
pub struct FundData {
    pub total: FundTotal,
    pub transactions: Vec<Transaction>,
    pub snapshots: Vec<AumSnapshot>,
}

/// Read the fund total, transactions and snapshots from one connection
pub fn read_fund_data(conn: &Connection) -> Result<FundData> {
    Ok(FundData {
        total: get_fund_total(conn)?,
        transactions: list_transactions(conn)?,
        snapshots: list_aum_snapshots(conn)?,
    })
}

/// Load fund data on a blocking task so the async caller is not stalled by
/// SQLite I/O.
pub async fn load_fund_data(path: PathBuf) -> Result<FundData> {
    tokio::task::spawn_blocking(move || {
        init_database(&path)?;
        let conn = open_db(&path)?;
        let data = read_fund_data(&conn)?;
        debug!(
            "Loaded {} transactions and {} AUM snapshots",
            data.transactions.len(),
            data.snapshots.len()
        );
        Ok(data)
    })
    .await
    .context("Fund data loader task failed")?
}

/// Helper to read Decimal from SQLite (handles TEXT, INTEGER and REAL)
pub fn get_decimal_value(row: &rusqlite::Row, idx: usize) -> Result<Decimal, rusqlite::Error> {
    use rusqlite::types::ValueRef;

    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => {
            let s = std::str::from_utf8(bytes)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Decimal::from_str(s).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        }
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => {
            Decimal::try_from(f).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        }
        _ => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "decimal".to_string(),
            rusqlite::types::Type::Null,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_fund_total_is_zero() {
        let conn = memory_db();
        let total = get_fund_total(&conn).unwrap();
        assert_eq!(total.amount, Decimal::ZERO);
        assert!(total.last_updated.is_none());
    }

    #[test]
    fn test_record_transaction_maintains_running_total() {
        let mut conn = memory_db();

        let buy =
            record_transaction(&mut conn, TransactionKind::Buy, dec!(100), date(2025, 1, 10))
                .unwrap();
        assert_eq!(buy.resulting_total, dec!(100));
        assert!(buy.id.is_some());

        let sell =
            record_transaction(&mut conn, TransactionKind::Sell, dec!(30.5), date(2025, 2, 1))
                .unwrap();
        assert_eq!(sell.resulting_total, dec!(69.5));

        let total = get_fund_total(&conn).unwrap();
        assert_eq!(total.amount, dec!(69.5));
        assert!(total.last_updated.is_some());
    }

    #[test]
    fn test_record_transaction_rejects_non_positive_amount() {
        let mut conn = memory_db();
        let err = record_transaction(&mut conn, TransactionKind::Buy, dec!(0), date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FundError>(),
            Some(FundError::InvalidAmount(_))
        ));
        assert_eq!(get_current_total(&conn).unwrap(), Decimal::ZERO);
        assert!(list_transactions(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_record_transaction_overflow_is_error_and_writes_nothing() {
        let mut conn = memory_db();
        record_transaction(&mut conn, TransactionKind::Buy, Decimal::MAX, date(2025, 1, 1))
            .unwrap();

        let err = record_transaction(&mut conn, TransactionKind::Buy, dec!(1), date(2025, 1, 2))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FundError>(),
            Some(FundError::Storage(_))
        ));
        assert_eq!(get_current_total(&conn).unwrap(), Decimal::MAX);
        assert_eq!(list_transactions(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_list_transactions_excludes_missing_resulting_total_and_sorts() {
        let mut conn = memory_db();
        record_transaction(&mut conn, TransactionKind::Buy, dec!(50), date(2025, 3, 1)).unwrap();
        record_transaction(&mut conn, TransactionKind::Buy, dec!(10), date(2025, 1, 1)).unwrap();
        conn.execute(
            "INSERT INTO transactions (kind, amount, date, resulting_total) VALUES ('buy', '5', '2024-01-01', NULL)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO transactions (kind, amount, date, resulting_total) VALUES ('sell', '1', 'not-a-date', '59')",
            [],
        )
        .unwrap();

        let txs = list_transactions(&conn).unwrap();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].effective_date, Some(date(2025, 1, 1)));
        assert_eq!(txs[1].effective_date, Some(date(2025, 3, 1)));
        assert!(txs[2].effective_date.is_none());
    }

    #[test]
    fn test_same_day_transactions_keep_arrival_order() {
        let mut conn = memory_db();
        let d = date(2025, 5, 5);
        let first = record_transaction(&mut conn, TransactionKind::Buy, dec!(10), d).unwrap();
        let second = record_transaction(&mut conn, TransactionKind::Sell, dec!(4), d).unwrap();

        let txs = list_transactions(&conn).unwrap();
        assert_eq!(txs[0].id, first.id);
        assert_eq!(txs[1].id, second.id);
    }

    #[test]
    fn test_aum_snapshots_round_trip_in_timestamp_order() {
        let conn = memory_db();
        let later = DateTime::from_timestamp(1_750_000_000, 0).unwrap();
        let earlier = DateTime::from_timestamp(1_740_000_000, 0).unwrap();
        insert_aum_snapshot_at(&conn, dec!(150), later).unwrap();
        insert_aum_snapshot_at(&conn, dec!(100), earlier).unwrap();
        conn.execute(
            "INSERT INTO aum_snapshots (amount, recorded_at) VALUES ('90', NULL)",
            [],
        )
        .unwrap();

        let snaps = list_aum_snapshots(&conn).unwrap();
        assert_eq!(snaps.len(), 3);
        assert_eq!(snaps[0].amount, dec!(100));
        assert_eq!(snaps[0].recorded_at, Some(earlier));
        assert_eq!(snaps[1].amount, dec!(150));
        assert!(snaps[2].recorded_at.is_none());
    }

    #[test]
    fn test_insert_aum_snapshot_uses_server_time() {
        let conn = memory_db();
        let before = Utc::now().timestamp();
        let snap = insert_aum_snapshot(&conn, dec!(1000)).unwrap();
        let stamped = snap.recorded_at.unwrap().timestamp();
        assert!(stamped >= before);
        assert!(stamped <= Utc::now().timestamp());
    }

    #[test]
    fn test_read_fund_data() {
        let mut conn = memory_db();
        record_transaction(&mut conn, TransactionKind::Buy, dec!(200), date(2025, 4, 1)).unwrap();
        insert_aum_snapshot(&conn, dec!(200)).unwrap();

        let data = read_fund_data(&conn).unwrap();
        assert_eq!(data.total.amount, dec!(200));
        assert_eq!(data.transactions.len(), 1);
        assert_eq!(data.snapshots.len(), 1);
    }
}
