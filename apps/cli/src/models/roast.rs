use serde::{Deserialize, Serialize};

/// The analysis produced by the roast service for one submitted resume.
///
/// Fetched once per roast id and treated as immutable for the lifetime of
/// the view. `created_at` is an opaque server timestamp; the client never
/// parses it, only displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastResult {
    pub roast_id: String,
    pub roast_text: String,
    /// Ordered feedback points. Presentation order is meaningful.
    pub feedback_points: Vec<String>,
    /// Percentage in 0..=100.
    pub brutality_level: u8,
    /// Seconds, non-negative.
    pub processing_time: f64,
    pub created_at: String,
}

impl RoastResult {
    /// Brutality as the UI shows it: `87` -> `"87%"`.
    pub fn brutality_display(&self) -> String {
        format!("{}%", self.brutality_level)
    }

    /// Processing time as the UI shows it: `2.3` -> `"2.3s"`.
    pub fn processing_time_display(&self) -> String {
        format!("{}s", self.processing_time)
    }
}

/// Extra numbers from the stats endpoint. Optional fields may be absent
/// depending on server version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastStats {
    pub roast_id: String,
    pub brutality_level: u8,
    pub processing_time: f64,
    pub feedback_count: u32,
    #[serde(default)]
    pub cv_length: Option<u64>,
    #[serde(default)]
    pub from_cache: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoastResult {
        RoastResult {
            roast_id: "abc123".to_string(),
            roast_text: "Bold of you to list Excel as a skill.".to_string(),
            feedback_points: vec!["Quantify your impact".to_string()],
            brutality_level: 87,
            processing_time: 2.3,
            created_at: "2026-08-29T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_brutality_display() {
        assert_eq!(sample().brutality_display(), "87%");
    }

    #[test]
    fn test_processing_time_display() {
        assert_eq!(sample().processing_time_display(), "2.3s");
    }

    #[test]
    fn test_deserialize_service_shape() {
        let body = r#"{
            "roast_id": "r-1",
            "roast_text": "ouch",
            "feedback_points": ["first", "second", "third"],
            "brutality_level": 42,
            "processing_time": 1.5,
            "created_at": "2026-08-29T09:30:00"
        }"#;
        let roast: RoastResult = serde_json::from_str(body).unwrap();
        assert_eq!(roast.roast_id, "r-1");
        assert_eq!(
            roast.feedback_points,
            vec!["first", "second", "third"],
            "feedback order must survive deserialization"
        );
        assert_eq!(roast.brutality_level, 42);
    }

    #[test]
    fn test_stats_optional_fields_absent() {
        let body = r#"{
            "roast_id": "r-1",
            "brutality_level": 60,
            "processing_time": 0.8,
            "feedback_count": 4
        }"#;
        let stats: RoastStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.feedback_count, 4);
        assert!(stats.cv_length.is_none());
        assert!(stats.from_cache.is_none());
    }
}
