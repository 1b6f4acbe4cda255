//! PostgreSQL implementation of IdeaStore.
//!
//! Every conditional mutation is a single guarded SQL statement, so the
//! predicate and the write reach the database as one atomic request. Owner
//! references are resolved to display names on read by joining `users`.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;

use crate::domain::foundation::{
    AdditionId, CommentId, DomainError, ErrorCode, IdeaId, Timestamp, UserId, UserRef, VoterId,
};
use crate::domain::idea::{Addition, Comment, Idea, VoteValue};
use crate::ports::IdeaStore;

/// PostgreSQL implementation of IdeaStore.
#[derive(Clone)]
pub struct PostgresIdeaStore {
    pool: PgPool,
}

impl PostgresIdeaStore {
    /// Creates a new PostgresIdeaStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn idea_exists(&self, id: &IdeaId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ideas WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check idea existence", e))?;
        Ok(result.0 > 0)
    }

    /// Loads the addition tree for a set of ideas, grouped by idea id.
    async fn load_additions(
        &self,
        idea_ids: &[uuid::Uuid],
    ) -> Result<HashMap<uuid::Uuid, Vec<Addition>>, DomainError> {
        let addition_rows = sqlx::query(
            r#"
            SELECT a.id, a.idea_id, a.owner_id, a.category, a.content,
                   COALESCE(u.name, a.owner_id) AS owner_name
            FROM idea_additions a
            LEFT JOIN users u ON u.id = a.owner_id
            WHERE a.idea_id = ANY($1)
            ORDER BY a.seq
            "#,
        )
        .bind(idea_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch additions", e))?;

        let comment_rows = sqlx::query(
            r#"
            SELECT c.id, c.addition_id, c.owner_id, c.body,
                   COALESCE(u.name, c.owner_id) AS owner_name
            FROM idea_comments c
            JOIN idea_additions a ON a.id = c.addition_id
            LEFT JOIN users u ON u.id = c.owner_id
            WHERE a.idea_id = ANY($1)
            ORDER BY c.seq
            "#,
        )
        .bind(idea_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch comments", e))?;

        let mut comments_by_addition: HashMap<uuid::Uuid, Vec<Comment>> = HashMap::new();
        for row in comment_rows {
            let addition_id: uuid::Uuid = get(&row, "addition_id")?;
            let id: uuid::Uuid = get(&row, "id")?;
            let owner = row_owner(&row)?;
            let body: String = get(&row, "body")?;
            comments_by_addition
                .entry(addition_id)
                .or_default()
                .push(Comment::reconstitute(CommentId::from_uuid(id), owner, body));
        }

        let mut additions_by_idea: HashMap<uuid::Uuid, Vec<Addition>> = HashMap::new();
        for row in addition_rows {
            let idea_id: uuid::Uuid = get(&row, "idea_id")?;
            let id: uuid::Uuid = get(&row, "id")?;
            let owner = row_owner(&row)?;
            let category: String = get(&row, "category")?;
            let content: serde_json::Value = get(&row, "content")?;
            let comments = comments_by_addition.remove(&id).unwrap_or_default();
            additions_by_idea.entry(idea_id).or_default().push(
                Addition::reconstitute(AdditionId::from_uuid(id), owner, category, content, comments),
            );
        }

        Ok(additions_by_idea)
    }
}

#[async_trait]
impl IdeaStore for PostgresIdeaStore {
    async fn insert(&self, idea: &Idea) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ideas (
                id, title, owner_id, summary, content, upvotes, downvotes,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(idea.id().as_uuid())
        .bind(idea.title())
        .bind(idea.owner().map(|o| o.id.as_str()))
        .bind(idea.summary())
        .bind(idea.content())
        .bind(Vec::<String>::new())
        .bind(Vec::<String>::new())
        .bind(idea.created_at().as_datetime())
        .bind(idea.updated_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_title_conflict(&e) => Err(DomainError::new(
                ErrorCode::DuplicateTitle,
                format!("An idea titled '{}' already exists", idea.title()),
            )
            .with_detail("title", idea.title())),
            Err(e) => Err(db_error("Failed to insert idea", e)),
        }
    }

    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT i.id, i.title, i.owner_id, i.summary, i.content,
                   i.upvotes, i.downvotes, i.created_at, i.updated_at,
                   COALESCE(u.name, i.owner_id) AS owner_name
            FROM ideas i
            LEFT JOIN users u ON u.id = i.owner_id
            WHERE i.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch idea", e))?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let mut additions = self.load_additions(&[*id.as_uuid()]).await?;
        let idea = row_to_idea(row, additions.remove(id.as_uuid()).unwrap_or_default())?;
        Ok(Some(idea))
    }

    async fn list(&self) -> Result<Vec<Idea>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.title, i.owner_id, i.summary, i.content,
                   i.upvotes, i.downvotes, i.created_at, i.updated_at,
                   COALESCE(u.name, i.owner_id) AS owner_name
            FROM ideas i
            LEFT JOIN users u ON u.id = i.owner_id
            ORDER BY i.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list ideas", e))?;

        let idea_ids: Vec<uuid::Uuid> = rows
            .iter()
            .map(|row| get::<uuid::Uuid>(row, "id"))
            .collect::<Result<_, _>>()?;
        let mut additions_by_idea = self.load_additions(&idea_ids).await?;

        rows.into_iter()
            .map(|row| {
                let id: uuid::Uuid = get(&row, "id")?;
                row_to_idea(row, additions_by_idea.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn update_content(
        &self,
        id: &IdeaId,
        owner_claim: &UserId,
        summary: Option<String>,
        content: Option<String>,
    ) -> Result<(), DomainError> {
        // Compound match-then-update: the owner check travels with the
        // mutation in one statement.
        let result = sqlx::query(
            r#"
            UPDATE ideas
            SET summary = $3, content = $4, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_claim.as_str())
        .bind(summary)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update idea", e))?;

        if result.rows_affected() == 0 {
            // Zero rows means either a bad claim or a missing idea; the
            // probe only classifies the error after the fact.
            if self.idea_exists(id).await? {
                return Err(DomainError::new(
                    ErrorCode::NotOwner,
                    "Only the idea's owner may edit it",
                )
                .with_detail("idea_id", id.to_string())
                .with_detail("claimed_by", owner_claim.to_string()));
            }
            return Err(idea_not_found(ErrorCode::IdeaNotFound, id));
        }

        Ok(())
    }

    async fn apply_vote(
        &self,
        id: &IdeaId,
        voter: &VoterId,
        value: VoteValue,
    ) -> Result<(), DomainError> {
        // One guarded statement per direction: append to the chosen set and
        // pull from the opposite, unless the voter is already in the chosen
        // set. No read-then-write gap exists for concurrent voters to race.
        let query = match value {
            VoteValue::Up => {
                r#"
                UPDATE ideas
                SET upvotes = array_append(upvotes, $2),
                    downvotes = array_remove(downvotes, $2),
                    updated_at = NOW()
                WHERE id = $1 AND NOT ($2 = ANY(upvotes))
                "#
            }
            VoteValue::Down => {
                r#"
                UPDATE ideas
                SET downvotes = array_append(downvotes, $2),
                    upvotes = array_remove(upvotes, $2),
                    updated_at = NOW()
                WHERE id = $1 AND NOT ($2 = ANY(downvotes))
                "#
            }
        };

        let result = sqlx::query(query)
            .bind(id.as_uuid())
            .bind(voter.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to apply vote", e))?;

        if result.rows_affected() == 0 {
            // Either a same-direction re-vote (a deliberate no-op) or a
            // missing idea; only the latter is an error.
            if !self.idea_exists(id).await? {
                return Err(idea_not_found(ErrorCode::VoteTargetNotFound, id));
            }
            tracing::debug!(idea_id = %id, "same-direction re-vote ignored");
        }

        Ok(())
    }

    async fn push_addition(&self, id: &IdeaId, addition: Addition) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;

        if !touch_idea(&mut tx, id).await? {
            return Err(idea_not_found(ErrorCode::IdeaNotFound, id));
        }

        sqlx::query(
            r#"
            INSERT INTO idea_additions (id, idea_id, owner_id, category, content)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(addition.id().as_uuid())
        .bind(id.as_uuid())
        .bind(addition.owner().map(|o| o.id.as_str()))
        .bind(addition.category())
        .bind(addition.content())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert addition", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit addition", e))
    }

    async fn push_comment(
        &self,
        id: &IdeaId,
        addition_id: &AdditionId,
        comment: Comment,
    ) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;

        if !touch_idea(&mut tx, id).await? {
            return Err(idea_not_found(ErrorCode::IdeaNotFound, id));
        }

        // The guard ensures the addition belongs to this idea; inserting
        // against a foreign addition id matches zero rows.
        let result = sqlx::query(
            r#"
            INSERT INTO idea_comments (id, addition_id, owner_id, body)
            SELECT $1, a.id, $4, $5
            FROM idea_additions a
            WHERE a.id = $2 AND a.idea_id = $3
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(addition_id.as_uuid())
        .bind(id.as_uuid())
        .bind(comment.owner().map(|o| o.id.as_str()))
        .bind(comment.text())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert comment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AdditionNotFound,
                format!("Addition not found: {}", addition_id),
            )
            .with_detail("addition_id", addition_id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit comment", e))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn begin(pool: &PgPool) -> Result<Transaction<'_, Postgres>, DomainError> {
    pool.begin()
        .await
        .map_err(|e| db_error("Failed to open transaction", e))
}

/// Bumps `updated_at`, doubling as the idea existence check inside a
/// transaction. Returns whether the idea exists.
async fn touch_idea(
    tx: &mut Transaction<'_, Postgres>,
    id: &IdeaId,
) -> Result<bool, DomainError> {
    let result = sqlx::query("UPDATE ideas SET updated_at = NOW() WHERE id = $1")
        .bind(id.as_uuid())
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to touch idea", e))?;
    Ok(result.rows_affected() > 0)
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::warn!(error = %e, "{}", context);
    DomainError::store(format!("{}: {}", context, e))
}

fn idea_not_found(code: ErrorCode, id: &IdeaId) -> DomainError {
    DomainError::new(code, format!("Idea not found: {}", id))
        .with_detail("idea_id", id.to_string())
}

fn is_title_conflict(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.constraint())
        .map(|c| c == "ideas_title_key")
        .unwrap_or(false)
}

fn get<'r, T>(row: &'r sqlx::postgres::PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::store(format!("Failed to get {}: {}", column, e)))
}

fn row_owner(row: &sqlx::postgres::PgRow) -> Result<Option<UserRef>, DomainError> {
    let owner_id: Option<String> = get(row, "owner_id")?;
    let owner_name: Option<String> = get(row, "owner_name")?;
    match owner_id {
        Some(id) => {
            let id = UserId::new(id).map_err(|e| DomainError::store(e.to_string()))?;
            let name = owner_name.unwrap_or_else(|| id.as_str().to_string());
            Ok(Some(UserRef::new(id, name)))
        }
        None => Ok(None),
    }
}

fn row_to_idea(row: sqlx::postgres::PgRow, additions: Vec<Addition>) -> Result<Idea, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let title: String = get(&row, "title")?;
    let owner = row_owner(&row)?;
    let summary: Option<String> = get(&row, "summary")?;
    let content: Option<String> = get(&row, "content")?;
    let upvotes: Vec<String> = get(&row, "upvotes")?;
    let downvotes: Vec<String> = get(&row, "downvotes")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get(&row, "updated_at")?;

    let upvotes = voters(upvotes)?;
    let downvotes = voters(downvotes)?;

    Ok(Idea::reconstitute(
        IdeaId::from_uuid(id),
        title,
        owner,
        summary,
        content,
        upvotes,
        downvotes,
        additions,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn voters(values: Vec<String>) -> Result<Vec<VoterId>, DomainError> {
    values
        .into_iter()
        .map(|v| VoterId::new(v).map_err(|e| DomainError::store(e.to_string())))
        .collect()
}
