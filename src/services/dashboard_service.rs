// src/services/dashboard_service.rs

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    common::{dates::parse_timestamp, error::AppError},
    models::{
        dashboard::{ActivityEntry, ActivityKind, DashboardSummary, ServiceStatusCounts},
        resource::{Resource, ServiceStatus},
    },
    services::{
        backend::Auth,
        resource_service::{ResourceAction, ResourceService},
    },
};

const RECENT_PER_KIND: usize = 5;
const RECENT_ACTIVITY_LIMIT: usize = 10;
const RECENT_CUSTOMERS_LIMIT: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    resources: ResourceService,
}

impl DashboardService {
    pub fn new(resources: ResourceService) -> Self {
        Self { resources }
    }

    pub async fn get_summary(
        &self,
        token: &str,
        request_id: Option<&str>,
    ) -> Result<DashboardSummary, AppError> {
        let fetch = |resource| {
            self.resources
                .relay(resource, ResourceAction::List, Auth::Bearer(token), request_id)
        };

        // As três coleções em paralelo; o primeiro erro derruba o resumo inteiro
        let (customers, sales, services) = tokio::try_join!(
            fetch(Resource::Customers),
            fetch(Resource::Sales),
            fetch(Resource::Services),
        )?;

        let customers = records(Resource::Customers, &customers.body)?;
        let sales = records(Resource::Sales, &sales.body)?;
        let services = records(Resource::Services, &services.body)?;

        Ok(summarize(&customers, &sales, &services))
    }
}

/// Aceita um array puro ou um objeto que o embrulhe em `<recurso>` ou `data`.
pub fn records(resource: Resource, body: &Value) -> Result<Vec<Value>, AppError> {
    let list = match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => [resource.segment(), "data"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    };

    list.cloned().ok_or_else(|| {
        AppError::UnexpectedPayload(format!("{resource}: esperava uma lista de registros"))
    })
}

pub fn summarize(customers: &[Value], sales: &[Value], services: &[Value]) -> DashboardSummary {
    let total_revenue: Decimal = sales.iter().filter_map(|s| s.get("price").and_then(decimal_of)).sum();

    let mut monthly_sales = vec![Decimal::ZERO; 12];
    for sale in sales {
        let month = timestamp_of(sale, &["creationDate", "created_at"]).map(|d| d.month0() as usize);
        let price = sale.get("price").and_then(decimal_of);
        if let (Some(month), Some(price)) = (month, price) {
            monthly_sales[month] += price;
        }
    }

    let service_status = count_statuses(services);

    let mut recent_customers: Vec<Value> = customers.to_vec();
    recent_customers.sort_by_key(|c| std::cmp::Reverse(timestamp_of(c, &["created_at"])));
    recent_customers.truncate(RECENT_CUSTOMERS_LIMIT);

    DashboardSummary {
        total_customers: customers.len(),
        total_sales: sales.len(),
        total_services: services.len(),
        total_revenue,
        pending_services: count_pending(services),
        service_status,
        monthly_sales,
        recent_customers,
        recent_activity: recent_activity(customers, sales, services),
    }
}

// Sem estado, ou estado desconhecido, conta como pendente
pub fn count_statuses(services: &[Value]) -> ServiceStatusCounts {
    let mut counts = ServiceStatusCounts::default();
    for service in services {
        let status = status_field(service)
            .and_then(ServiceStatus::parse)
            .unwrap_or(ServiceStatus::Pending);

        match status {
            ServiceStatus::Pending => counts.pending += 1,
            ServiceStatus::InProgress => counts.in_progress += 1,
            ServiceStatus::Completed => counts.completed += 1,
            ServiceStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

/// Cards do topo: só `pending` explícito ou serviço sem estado algum.
pub fn count_pending(services: &[Value]) -> usize {
    services
        .iter()
        .filter(|service| match status_field(service) {
            None => true,
            Some(raw) => ServiceStatus::parse(raw) == Some(ServiceStatus::Pending),
        })
        .count()
}

fn status_field(service: &Value) -> Option<&str> {
    ["status", "state"]
        .iter()
        .find_map(|key| service.get(*key).and_then(Value::as_str))
}

fn recent_activity(customers: &[Value], sales: &[Value], services: &[Value]) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = Vec::new();

    for customer in customers.iter().take(RECENT_PER_KIND) {
        let id = id_of(customer, &["customer_id", "id"]);
        entries.push(ActivityEntry {
            id: format!("customer-{id}"),
            kind: ActivityKind::Customer,
            name: text_of(customer, "name").unwrap_or_default(),
            timestamp: timestamp_of(customer, &["created_at"]),
        });
    }

    for sale in sales.iter().take(RECENT_PER_KIND) {
        let id = id_of(sale, &["sale_id", "id"]);
        entries.push(ActivityEntry {
            id: format!("sale-{id}"),
            kind: ActivityKind::Sale,
            name: format!("Venta #{id}"),
            timestamp: timestamp_of(sale, &["creationDate", "created_at"]),
        });
    }

    for service in services.iter().take(RECENT_PER_KIND) {
        let id = id_of(service, &["service_id", "id"]);
        entries.push(ActivityEntry {
            id: format!("service-{id}"),
            kind: ActivityKind::Service,
            name: text_of(service, "name").unwrap_or_default(),
            timestamp: timestamp_of(service, &["updated_at", "created_at"]),
        });
    }

    // Mais recentes primeiro; registros sem data vão para o fim
    entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
    entries.truncate(RECENT_ACTIVITY_LIMIT);
    entries
}

fn id_of(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match record.get(*key) {
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

fn text_of(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

// Preço pode vir como número ou como string ("1200.50")
fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn timestamp_of(record: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find_map(parse_timestamp)
}
