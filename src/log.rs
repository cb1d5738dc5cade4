//! In-app activity buffer for the fetch pipeline, shown in the activity
//! panel instead of going to println/eprintln.

use std::sync::Mutex;

const MAX_ENTRIES: usize = 500;

static BUFFER: std::sync::OnceLock<Mutex<Vec<ActivityEntry>>> = std::sync::OnceLock::new();

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl ActivityEntry {
    pub fn is_error(&self) -> bool {
        self.level == "ERROR"
    }
}

fn buffer() -> &'static Mutex<Vec<ActivityEntry>> {
    BUFFER.get_or_init(|| Mutex::new(Vec::new()))
}

/// Append an activity line. Safe to call from any thread, including the
/// async fetch path.
pub fn app_log(level: &str, message: impl Into<String>) {
    let entry = ActivityEntry {
        time: chrono::Utc::now().format("%H:%M:%S%.3f").to_string(),
        level: level.to_string(),
        message: message.into(),
    };
    if let Ok(mut entries) = buffer().lock() {
        entries.push(entry);
        let overflow = entries.len().saturating_sub(MAX_ENTRIES);
        if overflow > 0 {
            entries.drain(0..overflow);
        }
    }
}

/// Snapshot of the current buffer, oldest first. Call from the UI.
pub fn activity_snapshot() -> Vec<ActivityEntry> {
    buffer().lock().map(|entries| entries.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_entries_show_up_in_snapshot() {
        app_log("INFO", "fetch started");
        app_log("ERROR", "upstream said no");

        let snapshot = activity_snapshot();
        let last = &snapshot[snapshot.len() - 1];
        assert!(last.is_error());
        assert_eq!(last.message, "upstream said no");
    }
}
