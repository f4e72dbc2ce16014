// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's snapshot and chosen move is
// written as one line of a JSONL file, which the replay tool reads back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Battlesnake, Board, Direction};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    pub chosen_move: String,
    pub board: Option<Board>,
    pub you: Battlesnake,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(turn: i32, board: Option<Board>, you: Battlesnake, chosen_move: Direction) -> Self {
        LogEntry {
            turn,
            chosen_move: chosen_move.as_str().to_string(),
            board,
            you,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, turn: i32, board: Option<Board>, you: Battlesnake, chosen_move: Direction) {
        if !self.enabled {
            return;
        }

        let logger = self.clone();
        let entry = LogEntry::new(turn, board, you, chosen_move);

        tokio::spawn(async move {
            if let Err(e) = logger.write_entry(&entry).await {
                error!("{}", e);
            }
        });
    }

    /// Appends one entry and flushes it to disk
    pub async fn write_entry(&self, entry: &LogEntry) -> Result<(), String> {
        let mut file_guard = self.file.lock().await;

        let file = match file_guard.as_mut() {
            Some(file) => file,
            None => return Ok(()),
        };

        let json_line = serde_json::to_string(entry)
            .map_err(|e| format!("Failed to serialize debug log entry: {}", e))?;

        file.write_all(format!("{}\n", json_line).as_bytes())
            .await
            .map_err(|e| format!("Failed to write debug log entry: {}", e))?;

        // Flush to ensure data is written to disk
        file.flush()
            .await
            .map_err(|e| format!("Failed to flush debug log: {}", e))
    }
}
