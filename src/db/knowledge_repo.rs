// src/db/knowledge_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::knowledge::{ArticleFilter, ArticleStatus, KnowledgeArticle, UpdateArticlePayload},
};

#[derive(Clone)]
pub struct KnowledgeRepository {
    pool: PgPool,
}

impl KnowledgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        author_id: Option<Uuid>,
        title: &str,
        content: &str,
        category: Option<&str>,
        tags: &[String],
    ) -> Result<KnowledgeArticle, AppError> {
        let article = sqlx::query_as::<_, KnowledgeArticle>(
            r#"
            INSERT INTO knowledge_articles (author_id, title, content, category, tags, status)
            VALUES ($1, $2, $3, $4, $5, 'draft')
            RETURNING *
            "#,
        )
        .bind(author_id)
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(article)
    }

    /// Busca e já contabiliza a visualização.
    pub async fn fetch_and_count_view(&self, id: Uuid) -> Result<Option<KnowledgeArticle>, AppError> {
        let article = sqlx::query_as::<_, KnowledgeArticle>(
            "UPDATE knowledge_articles SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<KnowledgeArticle>, AppError> {
        let article = sqlx::query_as::<_, KnowledgeArticle>("SELECT * FROM knowledge_articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    pub async fn search(&self, filter: &ArticleFilter) -> Result<Vec<KnowledgeArticle>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM knowledge_articles WHERE 1 = 1");

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(category) = filter.category.as_deref() {
            qb.push(" AND category = ").push_bind(category.to_string());
        }
        if let Some(q) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
            let term = format!("%{}%", q.trim());
            qb.push(" AND (title ILIKE ")
                .push_bind(term.clone())
                .push(" OR content ILIKE ")
                .push_bind(term)
                .push(")");
        }

        qb.push(" ORDER BY views DESC, updated_at DESC LIMIT 100");

        let articles = qb
            .build_query_as::<KnowledgeArticle>()
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateArticlePayload,
    ) -> Result<Option<KnowledgeArticle>, AppError> {
        let article = sqlx::query_as::<_, KnowledgeArticle>(
            r#"
            UPDATE knowledge_articles SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                tags = COALESCE($5, tags),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title.as_deref())
        .bind(input.content.as_deref())
        .bind(input.category.as_deref())
        .bind(input.tags.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ArticleStatus,
    ) -> Result<Option<KnowledgeArticle>, AppError> {
        let article = sqlx::query_as::<_, KnowledgeArticle>(
            "UPDATE knowledge_articles SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM knowledge_articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
