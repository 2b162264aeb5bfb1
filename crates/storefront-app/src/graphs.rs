// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Budget, BudgetStatus, Note, Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphView {
    #[default]
    Sales,
    Customers,
    Finance,
}

impl GraphView {
    pub const ALL: [Self; 3] = [Self::Sales, Self::Customers, Self::Finance];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "vendas",
            Self::Customers => "clientes",
            Self::Finance => "financeiro",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesReport {
    pub order_count: usize,
    pub total_sales_cents: i64,
    pub invoiced_cents: i64,
    pub awaiting_cents: i64,
    pub average_ticket_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerTotals {
    pub name: String,
    pub orders: usize,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinanceReport {
    pub invoiced_cents: i64,
    pub notes_payable_cents: i64,
    pub approved_budgets_cents: i64,
}

impl FinanceReport {
    pub const fn expenses_cents(&self) -> i64 {
        self.notes_payable_cents
            .saturating_add(self.approved_budgets_cents)
    }

    pub const fn balance_cents(&self) -> i64 {
        self.invoiced_cents.saturating_sub(self.expenses_cents())
    }
}

/// Aggregates behind the graphs tab, computed from the loaded lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphsReport {
    pub sales: SalesReport,
    /// Most orders first, then highest total, then name.
    pub customers: Vec<CustomerTotals>,
    pub finance: FinanceReport,
}

impl GraphsReport {
    pub fn build(notes: &[Note], budgets: &[Budget], orders: &[Order]) -> Self {
        let total_sales_cents = sum(orders.iter().map(|order| order.total_cents));
        let invoiced_cents = sum(
            orders
                .iter()
                .filter(|order| order.status == OrderStatus::Delivered)
                .map(|order| order.total_cents),
        );
        let awaiting_cents = sum(
            orders
                .iter()
                .filter(|order| order.status == OrderStatus::AwaitingPayment)
                .map(|order| order.total_cents),
        );
        let average_ticket_cents = match i64::try_from(orders.len()) {
            Ok(count) if count > 0 => total_sales_cents / count,
            _ => 0,
        };

        Self {
            sales: SalesReport {
                order_count: orders.len(),
                total_sales_cents,
                invoiced_cents,
                awaiting_cents,
                average_ticket_cents,
            },
            customers: customer_totals(orders),
            finance: FinanceReport {
                invoiced_cents,
                notes_payable_cents: sum(notes.iter().map(|note| note.amount_cents)),
                approved_budgets_cents: sum(
                    budgets
                        .iter()
                        .filter(|budget| budget.status == BudgetStatus::Approved)
                        .map(|budget| budget.amount_cents),
                ),
            },
        }
    }

    pub fn distinct_customers(&self) -> usize {
        self.customers.len()
    }
}

fn sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

// Customer names group case-insensitively; the first spelling seen is kept.
fn customer_totals(orders: &[Order]) -> Vec<CustomerTotals> {
    let mut totals: Vec<(String, CustomerTotals)> = Vec::new();
    for order in orders {
        let name = order.customer.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        match totals.iter_mut().find(|(seen, _)| *seen == key) {
            Some((_, entry)) => {
                entry.orders += 1;
                entry.total_cents = entry.total_cents.saturating_add(order.total_cents);
            }
            None => totals.push((
                key,
                CustomerTotals {
                    name: name.to_owned(),
                    orders: 1,
                    total_cents: order.total_cents,
                },
            )),
        }
    }

    let mut customers: Vec<CustomerTotals> = totals.into_iter().map(|(_, entry)| entry).collect();
    customers.sort_by(|left, right| {
        right
            .orders
            .cmp(&left.orders)
            .then_with(|| right.total_cents.cmp(&left.total_cents))
            .then_with(|| left.name.to_lowercase().cmp(&right.name.to_lowercase()))
    });
    customers
}
