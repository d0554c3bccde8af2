//! Data access gateway.
//!
//! Owns the long-lived connection pool and translates (patient,
//! time-bound) requests into ordered `VitalsSample` sequences. All
//! operations are read-only; rows are written by an upstream scoring
//! pipeline. Results always come back newest first.

use async_trait::async_trait;
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::instrument;

use crate::error::{Result, VitalboardError};
use crate::models::vitals::VitalsSample;

/// Database connection pool, acquired once at startup and reused for
/// the lifetime of the process. A connection failure here is fatal;
/// broken connections are re-established by the pool on checkout.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| VitalboardError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn vitals_store(&self) -> VitalsStore {
        VitalsStore::new(self.pool.clone())
    }
}

/// Read seam between the gateway and the presentation layer.
#[async_trait]
pub trait VitalsSource: Send + Sync {
    /// Distinct patient identifiers present in the store. No
    /// pagination; cardinality is assumed small enough to enumerate.
    async fn list_patient_ids(&self) -> Result<Vec<String>>;

    /// Rows with `window_start >= now - lookback`, newest first.
    /// An empty result is not an error.
    async fn fetch_recent(&self, patient_id: &str, lookback: Duration)
        -> Result<Vec<VitalsSample>>;

    /// Rows with `window_start` in the half-open `[start, end + 1 day)`.
    /// The end bound is date-only, so it is advanced one day to cover
    /// the whole end day; a row at exactly midnight after that day is
    /// excluded.
    async fn fetch_range(&self, patient_id: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<VitalsSample>>;
}

#[derive(Clone)]
pub struct VitalsStore {
    pool: SqlitePool,
}

const SELECT_SAMPLE: &str = "SELECT patient_id, window_start, \
     respiratory_rate_value, oxygen_saturation_value, blood_pressure_value, \
     heart_rate_value, temperature_value, consciousness_value, \
     gdnews2_total, overall_confidence, \
     valid_parameter_count, degraded_parameter_count, invalid_parameter_count \
     FROM gdnews2_scores";

impl VitalsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn sample_from_row(row: &SqliteRow) -> Result<VitalsSample> {
        let map_err = |e: sqlx::Error| VitalboardError::Query(e.to_string());

        let ts: i64 = row.try_get("window_start").map_err(map_err)?;
        let window_start = DateTime::<Utc>::from_timestamp(ts, 0)
            .ok_or_else(|| VitalboardError::Query(format!("invalid window_start: {ts}")))?;

        Ok(VitalsSample {
            patient_id: row.try_get("patient_id").map_err(map_err)?,
            window_start,
            respiratory_rate: row.try_get("respiratory_rate_value").map_err(map_err)?,
            oxygen_saturation: row.try_get("oxygen_saturation_value").map_err(map_err)?,
            blood_pressure: row.try_get("blood_pressure_value").map_err(map_err)?,
            heart_rate: row.try_get("heart_rate_value").map_err(map_err)?,
            temperature: row.try_get("temperature_value").map_err(map_err)?,
            consciousness: row.try_get("consciousness_value").map_err(map_err)?,
            score_total: row.try_get("gdnews2_total").map_err(map_err)?,
            overall_confidence: row.try_get("overall_confidence").map_err(map_err)?,
            valid_parameter_count: row.try_get("valid_parameter_count").map_err(map_err)?,
            degraded_parameter_count: row.try_get("degraded_parameter_count").map_err(map_err)?,
            invalid_parameter_count: row.try_get("invalid_parameter_count").map_err(map_err)?,
        })
    }

    fn samples_from_rows(rows: Vec<SqliteRow>) -> Result<Vec<VitalsSample>> {
        rows.iter().map(Self::sample_from_row).collect()
    }
}

#[async_trait]
impl VitalsSource for VitalsStore {
    #[instrument(skip(self))]
    async fn list_patient_ids(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT DISTINCT patient_id FROM gdnews2_scores ORDER BY patient_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| VitalboardError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("patient_id")
                    .map_err(|e: sqlx::Error| VitalboardError::Query(e.to_string()))
            })
            .collect()
    }

    #[instrument(skip(self, lookback), fields(patient_id = %patient_id))]
    async fn fetch_recent(
        &self,
        patient_id: &str,
        lookback: Duration,
    ) -> Result<Vec<VitalsSample>> {
        let threshold = Utc::now() - lookback;

        let rows = sqlx::query(&format!(
            "{SELECT_SAMPLE} WHERE patient_id = ? AND window_start >= ? \
             ORDER BY window_start DESC"
        ))
        .bind(patient_id)
        .bind(threshold.timestamp())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| VitalboardError::Query(e.to_string()))?;

        Self::samples_from_rows(rows)
    }

    #[instrument(skip(self), fields(patient_id = %patient_id))]
    async fn fetch_range(
        &self,
        patient_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<VitalsSample>> {
        let end_exclusive = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| VitalboardError::Query(format!("end date out of range: {end}")))?;

        let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end_exclusive.and_time(NaiveTime::MIN).and_utc().timestamp();

        let rows = sqlx::query(&format!(
            "{SELECT_SAMPLE} WHERE patient_id = ? AND window_start >= ? AND window_start < ? \
             ORDER BY window_start DESC"
        ))
        .bind(patient_id)
        .bind(start_ts)
        .bind(end_ts)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| VitalboardError::Query(e.to_string()))?;

        Self::samples_from_rows(rows)
    }
}
