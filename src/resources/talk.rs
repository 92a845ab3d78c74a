use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::entity::Entity;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Talk {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub thumbsup: i32,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_of_talk: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Create and full-replace share one payload: every mutable field, no id.
#[derive(Debug, Deserialize)]
pub struct TalkPayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub thumbsup: i32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_of_talk: Option<OffsetDateTime>,
}

#[async_trait]
impl Entity for Talk {
    const TABLE: &'static str = "techtalks";
    const PATH: &'static str = "techtalks";
    const KIND: &'static str = "Tech Talk";
    const COLUMNS: &'static str =
        "id, title, description, thumbsup, completed, time_of_talk, created_at, updated_at";

    type Create = TalkPayload;
    type Update = TalkPayload;

    async fn insert(db: &PgPool, input: TalkPayload) -> Result<Self, ApiError> {
        let row = sqlx::query_as::<_, Talk>(
            r#"
            INSERT INTO techtalks (title, description, thumbsup, completed, time_of_talk)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, thumbsup, completed, time_of_talk,
                      created_at, updated_at
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.thumbsup)
        .bind(input.completed)
        .bind(input.time_of_talk)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    async fn replace(
        db: &PgPool,
        id: i64,
        input: TalkPayload,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Talk>(
            r#"
            UPDATE techtalks
            SET title = $1, description = $2, thumbsup = $3, completed = $4,
                time_of_talk = $5, updated_at = now()
            WHERE id = $6
            RETURNING id, title, description, thumbsup, completed, time_of_talk,
                      created_at, updated_at
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.thumbsup)
        .bind(input.completed)
        .bind(input.time_of_talk)
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn payload_defaults_thumbsup_and_completed() {
        let payload: TalkPayload =
            serde_json::from_str(r#"{"title": "X", "description": "Y"}"#).unwrap();
        assert_eq!(payload.thumbsup, 0);
        assert!(!payload.completed);
        assert!(payload.time_of_talk.is_none());
    }

    #[test]
    fn payload_rejects_missing_title() {
        let err = serde_json::from_str::<TalkPayload>(r#"{"description": "Y"}"#).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn payload_has_no_id_field() {
        // A caller-supplied id has nowhere to land; it is simply ignored
        // by deserialization rather than overriding the server-assigned one.
        let payload: TalkPayload =
            serde_json::from_str(r#"{"id": 99, "title": "X", "description": "Y"}"#).unwrap();
        assert_eq!(payload.title, "X");
    }

    #[test]
    fn talk_serializes_timestamps_as_rfc3339() {
        let talk = Talk {
            id: 1,
            title: "X".into(),
            description: "Y".into(),
            thumbsup: 0,
            completed: false,
            time_of_talk: None,
            created_at: datetime!(2024-01-02 03:04:05 UTC),
            updated_at: None,
        };
        let json = serde_json::to_value(&talk).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["created_at"], "2024-01-02T03:04:05Z");
        assert_eq!(json["updated_at"], serde_json::Value::Null);
    }
}
