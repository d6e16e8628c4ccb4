// src/models/nps.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NpsCategory {
    Promoter,
    Passive,
    Detractor,
}

impl NpsCategory {
    pub fn from_score(score: i16) -> Self {
        match score {
            9..=10 => NpsCategory::Promoter,
            7..=8 => NpsCategory::Passive,
            _ => NpsCategory::Detractor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NpsResponse {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub ticket_id: Option<Uuid>,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNpsPayload {
    pub client_id: Option<Uuid>,
    pub ticket_id: Option<Uuid>,

    #[validate(range(min = 0, max = 10, message = "A nota deve estar entre 0 e 10."))]
    pub score: i16,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NpsSummary {
    pub total: i64,
    pub promoters: i64,
    pub passives: i64,
    pub detractors: i64,
    /// %promotores - %detratores, arredondado (-100 a 100)
    pub score: i32,
}

impl NpsSummary {
    pub fn from_scores<I: IntoIterator<Item = i16>>(scores: I) -> Self {
        let mut summary = NpsSummary::default();
        for score in scores {
            summary.total += 1;
            match NpsCategory::from_score(score) {
                NpsCategory::Promoter => summary.promoters += 1,
                NpsCategory::Passive => summary.passives += 1,
                NpsCategory::Detractor => summary.detractors += 1,
            }
        }
        summary.score = nps_score(summary.promoters, summary.detractors, summary.total);
        summary
    }

    pub fn from_counts(promoters: i64, passives: i64, detractors: i64) -> Self {
        let total = promoters + passives + detractors;
        Self {
            total,
            promoters,
            passives,
            detractors,
            score: nps_score(promoters, detractors, total),
        }
    }
}

pub fn nps_score(promoters: i64, detractors: i64, total: i64) -> i32 {
    if total == 0 {
        return 0;
    }
    let diff = (promoters - detractors) as f64 * 100.0 / total as f64;
    diff.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_scores() {
        assert_eq!(NpsCategory::from_score(10), NpsCategory::Promoter);
        assert_eq!(NpsCategory::from_score(9), NpsCategory::Promoter);
        assert_eq!(NpsCategory::from_score(8), NpsCategory::Passive);
        assert_eq!(NpsCategory::from_score(7), NpsCategory::Passive);
        assert_eq!(NpsCategory::from_score(6), NpsCategory::Detractor);
        assert_eq!(NpsCategory::from_score(0), NpsCategory::Detractor);
    }

    #[test]
    fn summary_from_scores() {
        let summary = NpsSummary::from_scores([10, 9, 9, 8, 7, 3, 0]);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.promoters, 3);
        assert_eq!(summary.passives, 2);
        assert_eq!(summary.detractors, 2);
        // (3 - 2) / 7 = 14.28%
        assert_eq!(summary.score, 14);
    }

    #[test]
    fn empty_summary_scores_zero() {
        assert_eq!(NpsSummary::from_scores(Vec::<i16>::new()).score, 0);
        assert_eq!(NpsSummary::from_counts(0, 5, 5).score, -50);
    }
}
