// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;
use crate::values;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Products,
    Notes,
    Budgets,
    Orders,
}

impl ResourceKind {
    pub const ALL: [Self; 4] = [Self::Products, Self::Notes, Self::Budgets, Self::Orders];

    /// Path segment of the collection on the shop API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Notes => "notes",
            Self::Budgets => "budgets",
            Self::Orders => "orders",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "products" => Some(Self::Products),
            "notes" => Some(Self::Notes),
            "budgets" => Some(Self::Budgets),
            "orders" => Some(Self::Orders),
            _ => None,
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Self::Products => "product",
            Self::Notes => "note",
            Self::Budgets => "budget",
            Self::Orders => "order",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[serde(rename = "Aberto")]
    Open,
    #[serde(rename = "Em análise")]
    UnderReview,
    #[serde(rename = "Aprovado")]
    Approved,
    #[serde(rename = "Recusado")]
    Rejected,
}

impl BudgetStatus {
    pub const ALL: [Self; 4] = [Self::Open, Self::UnderReview, Self::Approved, Self::Rejected];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Aberto",
            Self::UnderReview => "Em análise",
            Self::Approved => "Aprovado",
            Self::Rejected => "Recusado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == value)
    }

    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Open | Self::UnderReview)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Aguardando Pagamento")]
    AwaitingPayment,
    #[serde(rename = "Entregue")]
    Delivered,
}

impl OrderStatus {
    pub const ALL: [Self; 2] = [Self::AwaitingPayment, Self::Delivered];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingPayment => "Aguardando Pagamento",
            Self::Delivered => "Entregue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatusFilter {
    #[default]
    All,
    AwaitingPayment,
    Delivered,
}

impl OrderStatusFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::AwaitingPayment => "awaiting",
            Self::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "awaiting" => Some(Self::AwaitingPayment),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn matches(self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::AwaitingPayment => order.status == OrderStatus::AwaitingPayment,
            Self::Delivered => order.status == OrderStatus::Delivered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "fabricante")]
    pub manufacturer: String,
    #[serde(rename = "validade", default, with = "values::optional_date")]
    pub expires_on: Option<Date>,
    #[serde(rename = "custo", with = "values::money")]
    pub cost_cents: i64,
    #[serde(rename = "venda", with = "values::money")]
    pub price_cents: i64,
    #[serde(rename = "quantidade", deserialize_with = "values::integer::deserialize")]
    pub quantity: i64,
    #[serde(rename = "codigo", default)]
    pub barcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "fabricante")]
    pub manufacturer: String,
    #[serde(rename = "validade", with = "values::optional_date")]
    pub expires_on: Option<Date>,
    #[serde(rename = "custo", with = "values::money")]
    pub cost_cents: i64,
    #[serde(rename = "venda", with = "values::money")]
    pub price_cents: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "codigo")]
    pub barcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor", with = "values::money")]
    pub amount_cents: i64,
    #[serde(rename = "vencimento", with = "values::date")]
    pub due_on: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor", with = "values::money")]
    pub amount_cents: i64,
    #[serde(rename = "vencimento", with = "values::date")]
    pub due_on: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    #[serde(rename = "fornecedor")]
    pub supplier: String,
    #[serde(rename = "valor", with = "values::money")]
    pub amount_cents: i64,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(default = "default_budget_status")]
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBudget {
    #[serde(rename = "fornecedor")]
    pub supplier: String,
    #[serde(rename = "valor", with = "values::money")]
    pub amount_cents: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "total", with = "values::money")]
    pub total_cents: i64,
    #[serde(default = "default_order_status")]
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "total", with = "values::money")]
    pub total_cents: i64,
    pub status: OrderStatus,
}

const fn default_budget_status() -> BudgetStatus {
    BudgetStatus::Open
}

const fn default_order_status() -> OrderStatus {
    OrderStatus::AwaitingPayment
}

/// Distinct supplier names across budgets, sorted case-insensitively.
pub fn suppliers(budgets: &[Budget]) -> Vec<&str> {
    let mut names: Vec<&str> = budgets
        .iter()
        .map(|budget| budget.supplier.trim())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_by_key(|name| name.to_lowercase());
    names.dedup_by(|left, right| left.to_lowercase() == right.to_lowercase());
    names
}
