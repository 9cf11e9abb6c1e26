use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{error, info};
use rusqlite::{params, Connection, Row};
use serde::Serialize;
use tokio::sync::oneshot;

mod migrations;

use crate::models::{FormBreakdown, WorkoutSession};
use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} is out of range: {value}"))
}

fn to_u8(value: i64, field: &str) -> Result<u8> {
    u8::try_from(value).map_err(|_| anyhow!("{field} is out of range: {value}"))
}

fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

fn row_to_workout(row: &Row) -> Result<WorkoutSession> {
    let date: String = row.get("date")?;
    Ok(WorkoutSession {
        id: row.get("id")?,
        exercise_id: row.get("exercise_id")?,
        exercise_name: row.get("exercise_name")?,
        date: parse_datetime(&date, "date")?,
        duration_secs: to_u64(row.get("duration_secs")?, "duration_secs")?,
        reps_completed: to_u32(row.get("reps_completed")?, "reps_completed")?,
        average_accuracy: to_u8(row.get("average_accuracy")?, "average_accuracy")?,
        calories_burned: to_u32(row.get("calories_burned")?, "calories_burned")?,
        form_breakdown: FormBreakdown {
            correct_reps: to_u32(row.get("correct_reps")?, "correct_reps")?,
            incorrect_reps: to_u32(row.get("incorrect_reps")?, "incorrect_reps")?,
        },
    })
}

/// Lifetime totals over the stored workout history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_workouts: u32,
    pub average_accuracy: u8,
    pub total_calories_burned: u64,
}

#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("formcoach-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context("failed to open SQLite database")));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }
                if let Err(err) = conn.pragma_update(None, "foreign_keys", "ON") {
                    error!("Failed to enable foreign keys: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run database migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .with_context(|| "failed to spawn database worker thread")?;

        ready_rx
            .recv()
            .context("database worker exited before signaling readiness")??;

        info!("Database initialized at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to DB thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("database thread terminated unexpectedly"))?
    }

    pub async fn insert_workout(&self, workout: &WorkoutSession) -> Result<()> {
        let record = workout.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO workouts (id, exercise_id, exercise_name, date, duration_secs, reps_completed, average_accuracy, calories_burned, correct_reps, incorrect_reps)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id,
                    record.exercise_id,
                    record.exercise_name,
                    record.date.to_rfc3339(),
                    to_i64(record.duration_secs)?,
                    record.reps_completed,
                    record.average_accuracy,
                    record.calories_burned,
                    record.form_breakdown.correct_reps,
                    record.form_breakdown.incorrect_reps,
                ],
            )
            .with_context(|| "failed to insert workout")?;
            Ok(())
        })
        .await
    }

    pub async fn list_workouts(&self) -> Result<Vec<WorkoutSession>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, exercise_id, exercise_name, date, duration_secs, reps_completed, average_accuracy, calories_burned, correct_reps, incorrect_reps
                 FROM workouts
                 ORDER BY date DESC",
            )?;

            let mut rows = stmt.query([])?;
            let mut workouts = Vec::new();
            while let Some(row) = rows.next()? {
                workouts.push(row_to_workout(row)?);
            }

            Ok(workouts)
        })
        .await
    }

    pub async fn list_workouts_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<WorkoutSession>> {
        let limit = limit as i64;
        let offset = offset as i64;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, exercise_id, exercise_name, date, duration_secs, reps_completed, average_accuracy, calories_burned, correct_reps, incorrect_reps
                 FROM workouts
                 ORDER BY date DESC
                 LIMIT ?1 OFFSET ?2",
            )?;

            let mut rows = stmt.query(params![limit, offset])?;
            let mut workouts = Vec::new();
            while let Some(row) = rows.next()? {
                workouts.push(row_to_workout(row)?);
            }

            Ok(workouts)
        })
        .await
    }

    pub async fn workouts_for_exercise(&self, exercise_id: &str) -> Result<Vec<WorkoutSession>> {
        let exercise_id = exercise_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, exercise_id, exercise_name, date, duration_secs, reps_completed, average_accuracy, calories_burned, correct_reps, incorrect_reps
                 FROM workouts
                 WHERE exercise_id = ?1
                 ORDER BY date DESC",
            )?;

            let mut rows = stmt.query(params![exercise_id])?;
            let mut workouts = Vec::new();
            while let Some(row) = rows.next()? {
                workouts.push(row_to_workout(row)?);
            }

            Ok(workouts)
        })
        .await
    }

    pub async fn delete_workout(&self, workout_id: &str) -> Result<()> {
        let workout_id = workout_id.to_string();
        self.execute(move |conn| {
            conn.execute("DELETE FROM workouts WHERE id = ?1", params![workout_id])
                .with_context(|| "failed to delete workout")?;
            Ok(())
        })
        .await
    }

    pub async fn clear_workouts(&self) -> Result<()> {
        self.execute(|conn| {
            conn.execute("DELETE FROM workouts", [])
                .with_context(|| "failed to clear workout history")?;
            Ok(())
        })
        .await
    }

    pub async fn history_stats(&self) -> Result<HistoryStats> {
        self.execute(|conn| {
            let (count, avg, calories): (i64, f64, i64) = conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(AVG(average_accuracy), 0),
                        COALESCE(SUM(calories_burned), 0)
                 FROM workouts",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

            Ok(HistoryStats {
                total_workouts: to_u32(count, "total_workouts")?,
                average_accuracy: avg.round() as u8,
                total_calories_burned: to_u64(calories, "total_calories_burned")?,
            })
        })
        .await
    }
}
