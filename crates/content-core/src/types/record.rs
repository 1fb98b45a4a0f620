//! Flat file records polled from the backing service.

use serde::{Deserialize, Deserializer, Serialize};

use super::priority::FilePriority;

/// One entry of a torrent's file list, as returned by the snapshot source.
///
/// Deserialization is permissive: missing or malformed numeric fields become
/// zero and unknown priorities become [`FilePriority::Normal`], so a
/// partially broken payload still produces a usable tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full relative path, including the file name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Size in bytes.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    /// Download priority.
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: FilePriority,
    /// Completed fraction in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub progress: f64,
    /// Distributed copies available in the swarm.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub availability: f64,
}

impl FileRecord {
    /// Create a record with zero progress and availability.
    pub fn new(name: impl Into<String>, size: u64, priority: FilePriority) -> Self {
        Self {
            name: name.into(),
            size,
            priority,
            progress: 0.0,
            availability: 0.0,
        }
    }

    /// Builder-style setter for progress.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Builder-style setter for availability.
    pub fn with_availability(mut self, availability: f64) -> Self {
        self.availability = availability;
        self
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(number.unwrap_or(0))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|f| f.is_finite()).unwrap_or(0.0))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<FilePriority, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(FilePriority::from_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_record() {
        let record: FileRecord = serde_json::from_value(serde_json::json!({
            "name": "album/01.flac",
            "size": 2048,
            "priority": 6,
            "progress": 0.5,
            "availability": 1.25,
        }))
        .unwrap();
        assert_eq!(record.name, "album/01.flac");
        assert_eq!(record.size, 2048);
        assert_eq!(record.priority, FilePriority::High);
        assert_eq!(record.progress, 0.5);
        assert_eq!(record.availability, 1.25);
    }

    #[test]
    fn test_malformed_fields_default() {
        let record: FileRecord = serde_json::from_value(serde_json::json!({
            "name": "a.bin",
            "size": "lots",
            "priority": 42,
            "progress": null,
        }))
        .unwrap();
        assert_eq!(record.size, 0);
        assert_eq!(record.priority, FilePriority::Normal);
        assert_eq!(record.progress, 0.0);
        assert_eq!(record.availability, 0.0);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let record: FileRecord = serde_json::from_value(serde_json::json!({
            "name": "a.bin",
            "size": "10",
            "priority": "0",
            "progress": "1",
        }))
        .unwrap();
        assert_eq!(record.size, 10);
        assert_eq!(record.priority, FilePriority::Ignored);
        assert_eq!(record.progress, 1.0);
    }
}
