//! # API Client
//!
//! HTTP client for communicating with the Lexora backend.
//!
//! This module provides the [`ApiClient`] for making API requests
//! against the versioned REST surface. Every request attaches the
//! current bearer credential, and a 401 on any response clears the
//! durable session store and fires the unauthorized hook.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use types::{
    GenerateVideoRequest, GenerateVideoResponse, LearningPath, LearningPathCreate,
    LearningPathUpdate, Lesson, LessonCreate, LessonUpdate, LoginRequest, PreferencesUpdate,
    ProfileUpdate, RegisterRequest, TokenResponse, Topic, TopicCreate, TopicUpdate, UserProfile,
    Video, VideoStatus,
};
