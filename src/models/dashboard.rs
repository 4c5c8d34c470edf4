// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// 1. Resumo do painel (cards do topo + gráficos)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_customers: usize,
    pub total_sales: usize,
    pub total_services: usize,
    pub total_revenue: Decimal,
    pub pending_services: usize,
    pub service_status: ServiceStatusCounts,
    /// Janeiro primeiro.
    pub monthly_sales: Vec<Decimal>,
    #[schema(value_type = Vec<Object>)]
    pub recent_customers: Vec<Value>,
    pub recent_activity: Vec<ActivityEntry>,
}

// 2. Distribuição de estados dos serviços (gráfico de rosca)
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Customer,
    Sale,
    Service,
}

// 3. Atividade recente
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[schema(example = "customer-1")]
    pub id: String,
    pub kind: ActivityKind,
    pub name: String,
    pub timestamp: Option<DateTime<Utc>>,
}
