/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

const FALLBACK_LOG_PATH: &str = "/tmp/ilofan_events.jsonl";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub fn default_log_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_STATE_HOME") {
        return Path::new(&xdg).join("ilofan").join("events.jsonl");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".local")
            .join("state")
            .join("ilofan")
            .join("events.jsonl");
    }
    PathBuf::from(FALLBACK_LOG_PATH)
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Start appending events to `path`. Falls back to /tmp if that fails.
/// Returns the path actually in use.
pub fn init_logging(path: &Path) -> io::Result<PathBuf> {
    let (file, used) = match open_append(path) {
        Ok(f) => (f, path.to_path_buf()),
        Err(_) => {
            let fallback = PathBuf::from(FALLBACK_LOG_PATH);
            (open_append(&fallback)?, fallback)
        }
    };
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }
    Ok(used)
}

/// Close the log file. Later `log_event` calls are dropped.
pub fn shutdown_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

#[cfg(test)]
fn is_enabled() -> bool {
    LOG_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Append one JSON line. Silently does nothing unless `init_logging` ran;
/// the terminal is in raw mode so there is nowhere else to report to.
pub fn log_event(event: &str, data: Value) {
    let Ok(mut guard) = LOG_FILE.lock() else {
        return;
    };
    if let Some(f) = guard.as_mut() {
        let line = json!({
            "ts_ms": now_millis(),
            "event": event,
            "data": data,
        })
        .to_string();
        let _ = writeln!(f, "{}", line);
    }
}
