// src/models/goal.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "goal_period", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "goal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    // Membro da equipe dono da meta; None = meta da equipe toda
    pub owner_id: Option<Uuid>,

    #[schema(example = "Tickets resolvidos no mês")]
    pub title: String,
    pub description: Option<String>,

    #[schema(value_type = f64, example = 150.0)]
    pub target_value: Decimal,
    #[schema(value_type = f64, example = 42.0)]
    pub current_value: Decimal,

    pub period: GoalPeriod,
    pub status: GoalStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Percentual atingido, 0 a 100 (não passa de 100 mesmo se a meta for superada).
    pub fn progress_percent(&self) -> Decimal {
        progress_percent(self.current_value, self.target_value)
    }
}

pub fn progress_percent(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let pct = (current / target * Decimal::ONE_HUNDRED).round_dp(2);
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

// Meta + progresso calculado, como o painel mostra
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    #[schema(value_type = f64)]
    pub progress_percent: Decimal,
}

impl From<Goal> for GoalProgress {
    fn from(goal: Goal) -> Self {
        let progress_percent = goal.progress_percent();
        Self { goal, progress_percent }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalPayload {
    pub owner_id: Option<Uuid>,

    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres."))]
    pub title: String,
    pub description: Option<String>,

    #[schema(value_type = f64)]
    pub target_value: Decimal,
    pub period: GoalPeriod,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalProgressPayload {
    #[schema(value_type = f64)]
    pub current_value: Decimal,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GoalFilter {
    pub owner_id: Option<Uuid>,
    pub status: Option<GoalStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn progress_is_capped() {
        assert_eq!(progress_percent(Decimal::from(50), Decimal::from(200)), Decimal::from(25));
        assert_eq!(progress_percent(Decimal::from(300), Decimal::from(200)), Decimal::ONE_HUNDRED);
        assert_eq!(progress_percent(Decimal::from(-5), Decimal::from(200)), Decimal::ZERO);
    }

    #[test]
    fn zero_target_has_no_progress() {
        assert_eq!(progress_percent(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn progress_rounds_to_two_places() {
        assert_eq!(
            progress_percent(Decimal::from(1), Decimal::from(3)),
            Decimal::new(3333, 2)
        );
    }
}
