//! # API Types
//!
//! Types for API requests and responses.
//!
//! Response types mirror the backend schemas field-for-field. Optional
//! fields are skipped when serializing so a profile written to the
//! session store round-trips to the exact JSON the backend sent.

use serde::{Deserialize, Serialize};

// ==================== Authentication Types ====================

/// Request to register a new user account.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Email address (also the login identifier).
    pub email: String,
    /// Plaintext password; only ever sent over the wire, never stored.
    pub password: String,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response from a successful login: the bearer credential.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token for subsequent requests.
    pub access_token: String,
    /// Token type, always `"bearer"`.
    pub token_type: String,
}

/// The server-authoritative user record, cached client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: i64,
    /// Email address (login identifier).
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Whether the account is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Preferred avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Preferred narration voice ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    /// Preferred narration voice display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    /// Creation timestamp (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last-update timestamp (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial profile update; unset fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// New voice ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    /// New voice display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
}

/// Partial preference update (avatar and narration voice).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreferencesUpdate {
    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// New voice ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    /// New voice display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
}

// ==================== Resource Types ====================

/// A learning topic owned by the current user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Topic {
    /// Topic ID.
    pub id: i64,
    /// Topic title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Owning user ID.
    pub user_id: i64,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last-update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request to create a topic.
#[derive(Debug, Clone, Serialize)]
pub struct TopicCreate {
    /// Topic title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial topic update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopicUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A structured learning path within a topic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearningPath {
    /// Learning path ID.
    pub id: i64,
    /// Path title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Planned duration in weeks.
    pub duration_weeks: i32,
    /// Parent topic ID.
    pub topic_id: i64,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last-update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request to create a learning path under a topic.
#[derive(Debug, Clone, Serialize)]
pub struct LearningPathCreate {
    /// Path title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned duration in weeks.
    pub duration_weeks: i32,
    /// Parent topic ID.
    pub topic_id: i64,
}

/// Partial learning path update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LearningPathUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New duration in weeks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<i32>,
}

/// A single lesson within a learning path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lesson {
    /// Lesson ID.
    pub id: i64,
    /// Lesson title.
    pub title: String,
    /// Lesson body content.
    pub content: String,
    /// Optional narration script (used for video generation).
    #[serde(default)]
    pub script: Option<String>,
    /// Week number within the path.
    pub week_number: i32,
    /// Day number within the week.
    pub day_number: i32,
    /// Parent learning path ID.
    pub learning_path_id: i64,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last-update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request to create a lesson in a learning path.
#[derive(Debug, Clone, Serialize)]
pub struct LessonCreate {
    /// Lesson title.
    pub title: String,
    /// Lesson body content.
    pub content: String,
    /// Optional narration script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Week number within the path.
    pub week_number: i32,
    /// Day number within the week.
    pub day_number: i32,
    /// Parent learning path ID.
    pub learning_path_id: i64,
}

/// Partial lesson update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LessonUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New narration script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// New week number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<i32>,
    /// New day number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<i32>,
}

/// Generation state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    /// Generation in progress.
    Processing,
    /// Generation finished, `video_url` is populated.
    Completed,
    /// Generation failed.
    Failed,
}

/// A generated narration video for a lesson.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    /// Video ID.
    pub id: i64,
    /// Video title.
    pub title: String,
    /// URL of the rendered video (empty while processing).
    pub video_url: String,
    /// URL of the narration audio track.
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Narration transcript.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Generation state.
    pub status: VideoStatus,
    /// Parent lesson ID.
    pub lesson_id: i64,
    /// Voice used for narration.
    #[serde(default)]
    pub voice_id: Option<String>,
    /// Avatar used for the video.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request to start video generation for a lesson.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateVideoRequest {
    /// Lesson to narrate.
    pub lesson_id: i64,
    /// Voice override; the backend falls back to the user's default voice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

/// Acknowledgement that video generation was started.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateVideoResponse {
    /// Human-readable status message.
    pub message: String,
    /// ID of the video record being generated.
    pub video_id: i64,
    /// Initial generation state (always `"processing"`).
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trips_minimal_json() {
        let json = r#"{"id":1,"email":"a@b.com"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.id, 1);
        assert_eq!(profile.email, "a@b.com");
        assert!(profile.full_name.is_none());

        // None fields are skipped, so the stored shape matches the wire shape
        let out: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&profile).unwrap()).unwrap();
        assert_eq!(out, serde_json::json!({"id": 1, "email": "a@b.com"}));
    }

    #[test]
    fn test_profile_preserves_preferences() {
        let json = r#"{"id":7,"email":"x@y.com","full_name":"X","is_active":true,"voice_id":"v1","voice_name":"Aria"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.full_name.as_deref(), Some("X"));
        assert_eq!(profile.is_active, Some(true));
        assert_eq!(profile.voice_id.as_deref(), Some("v1"));
        assert_eq!(profile.voice_name.as_deref(), Some("Aria"));
    }

    #[test]
    fn test_partial_update_skips_unset_fields() {
        let update = ProfileUpdate {
            full_name: Some("New Name".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"full_name": "New Name"}));
    }

    #[test]
    fn test_video_status_parsing() {
        let json = r#"{"id":3,"title":"Video for Intro","video_url":"","status":"processing","lesson_id":9}"#;
        let video: Video = serde_json::from_str(json).unwrap();

        assert_eq!(video.status, VideoStatus::Processing);
        assert!(video.audio_url.is_none());
    }
}
