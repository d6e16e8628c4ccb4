// src/services/knowledge_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::KnowledgeRepository,
    models::{
        auth::Role,
        knowledge::{ArticleFilter, ArticleStatus, CreateArticlePayload, KnowledgeArticle, UpdateArticlePayload},
    },
};

#[derive(Clone)]
pub struct KnowledgeService {
    repo: KnowledgeRepository,
}

/// Visitantes (viewer) só enxergam artigos publicados, seja qual for o filtro pedido.
pub fn effective_filter(role: Role, mut filter: ArticleFilter) -> ArticleFilter {
    if !role.is_staff() {
        filter.status = Some(ArticleStatus::Published);
    }
    filter
}

impl KnowledgeService {
    pub fn new(repo: KnowledgeRepository) -> Self {
        Self { repo }
    }

    pub async fn create_article(
        &self,
        author_id: Option<Uuid>,
        payload: &CreateArticlePayload,
    ) -> Result<KnowledgeArticle, AppError> {
        self.repo
            .create(
                author_id,
                payload.title.trim(),
                &payload.content,
                payload.category.as_deref(),
                &payload.tags,
            )
            .await
    }

    pub async fn get_article(&self, role: Role, id: Uuid) -> Result<KnowledgeArticle, AppError> {
        if !role.is_staff() {
            // Confere antes de contar a visualização
            let article = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound("Artigo"))?;
            if article.status != ArticleStatus::Published {
                return Err(AppError::NotFound("Artigo"));
            }
        }

        self.repo
            .fetch_and_count_view(id)
            .await?
            .ok_or(AppError::NotFound("Artigo"))
    }

    pub async fn search_articles(&self, role: Role, filter: ArticleFilter) -> Result<Vec<KnowledgeArticle>, AppError> {
        self.repo.search(&effective_filter(role, filter)).await
    }

    pub async fn update_article(&self, id: Uuid, payload: &UpdateArticlePayload) -> Result<KnowledgeArticle, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Artigo"))
    }

    pub async fn set_status(&self, id: Uuid, status: ArticleStatus) -> Result<KnowledgeArticle, AppError> {
        let article = self.repo
            .set_status(id, status)
            .await?
            .ok_or(AppError::NotFound("Artigo"))?;

        tracing::info!("📚 Artigo '{}' agora está {:?}", article.title, status);
        Ok(article)
    }

    pub async fn delete_article(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Artigo"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewers_only_see_published() {
        let filter = ArticleFilter {
            status: Some(ArticleStatus::Draft),
            ..Default::default()
        };
        assert_eq!(
            effective_filter(Role::Viewer, filter).status,
            Some(ArticleStatus::Published)
        );
    }

    #[test]
    fn staff_filter_is_untouched() {
        let filter = ArticleFilter {
            status: Some(ArticleStatus::Draft),
            ..Default::default()
        };
        assert_eq!(effective_filter(Role::Agent, filter).status, Some(ArticleStatus::Draft));
        assert_eq!(effective_filter(Role::Admin, ArticleFilter::default()).status, None);
    }
}
