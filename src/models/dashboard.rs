// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{
    goal::GoalProgress,
    nps::NpsSummary,
    ticket::{TicketPriority, TicketStatus},
};

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: TicketStatus,
    pub total: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    pub priority: TicketPriority,
    pub total: i64,
}

// Os cards do topo do painel
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub tickets_by_status: Vec<StatusCount>,
    // Só tickets ainda não resolvidos
    pub open_by_priority: Vec<PriorityCount>,
    pub avg_resolution_hours: Option<f64>,
    pub nps: NpsSummary,
    pub active_goals: Vec<GoalProgress>,
}
