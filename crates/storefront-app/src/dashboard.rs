// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, Duration};

use crate::{Budget, Note, Order, OrderStatus, Product};

pub const LATEST_ORDERS: usize = 5;
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
pub const DEFAULT_DUE_WINDOW_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub low_stock_threshold: i64,
    pub due_window_days: i64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            due_window_days: DEFAULT_DUE_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub total_sales_cents: i64,
    pub invoiced_cents: i64,
    pub latest_orders: Vec<Order>,
    pub low_stock: Vec<Product>,
    pub pending_budgets: usize,
    pub notes_due: Vec<Note>,
    pub overdue_notes: usize,
}

impl DashboardSnapshot {
    pub fn build(
        products: &[Product],
        notes: &[Note],
        budgets: &[Budget],
        orders: &[Order],
        today: Date,
        options: DashboardOptions,
    ) -> Self {
        let total_sales_cents = orders.iter().map(|order| order.total_cents).sum();
        let invoiced_cents = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Delivered)
            .map(|order| order.total_cents)
            .sum();

        let mut latest_orders = orders.to_vec();
        latest_orders.sort_by(|left, right| right.id.cmp(&left.id));
        latest_orders.truncate(LATEST_ORDERS);

        let mut low_stock: Vec<Product> = products
            .iter()
            .filter(|product| product.quantity <= options.low_stock_threshold)
            .cloned()
            .collect();
        low_stock.sort_by(|left, right| {
            left.quantity
                .cmp(&right.quantity)
                .then_with(|| left.id.cmp(&right.id))
        });

        let horizon = options
            .due_window_days
            .max(0)
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|seconds| today.checked_add(Duration::seconds(seconds)))
            .unwrap_or(Date::MAX);
        let mut notes_due: Vec<Note> = notes
            .iter()
            .filter(|note| note.due_on >= today && note.due_on <= horizon)
            .cloned()
            .collect();
        notes_due.sort_by(|left, right| {
            left.due_on
                .cmp(&right.due_on)
                .then_with(|| left.id.cmp(&right.id))
        });

        Self {
            total_sales_cents,
            invoiced_cents,
            latest_orders,
            low_stock,
            pending_budgets: budgets
                .iter()
                .filter(|budget| budget.status.is_pending())
                .count(),
            notes_due,
            overdue_notes: notes.iter().filter(|note| note.due_on < today).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardOptions, DashboardSnapshot};
    use crate::{
        Budget, BudgetId, BudgetStatus, Note, NoteId, Order, OrderId, OrderStatus, Product,
        ProductId,
    };
    use anyhow::Result;
    use time::{Date, Month};

    fn order(id: i64, total_cents: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            customer: format!("Cliente {id}"),
            total_cents,
            status,
        }
    }

    fn product(id: i64, quantity: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produto {id}"),
            manufacturer: "Fornecedor X".to_owned(),
            expires_on: None,
            cost_cents: 100,
            price_cents: 200,
            quantity,
            barcode: String::new(),
        }
    }

    fn note(id: i64, due_on: Date) -> Note {
        Note {
            id: NoteId::new(id),
            description: format!("Nota Fiscal {id:03}"),
            amount_cents: 50_000,
            due_on,
        }
    }

    fn budget(id: i64, status: BudgetStatus) -> Budget {
        Budget {
            id: BudgetId::new(id),
            supplier: "Fornecedor X".to_owned(),
            amount_cents: 80_000,
            description: String::new(),
            status,
        }
    }

    #[test]
    fn snapshot_sums_sales_and_keeps_latest_orders() {
        let orders: Vec<Order> = (1..=7)
            .map(|id| {
                let status = if id % 2 == 0 {
                    OrderStatus::Delivered
                } else {
                    OrderStatus::AwaitingPayment
                };
                order(id, id * 1_000, status)
            })
            .collect();
        let today = Date::MIN;
        let snapshot = DashboardSnapshot::build(&[], &[], &[], &orders, today, DashboardOptions::default());

        assert_eq!(snapshot.total_sales_cents, 28_000);
        assert_eq!(snapshot.invoiced_cents, 12_000);
        let ids: Vec<i64> = snapshot.latest_orders.iter().map(|o| o.id.get()).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn snapshot_lists_low_stock_lowest_first() {
        let products = vec![product(1, 30), product(2, 5), product(3, 2), product(4, 6)];
        let snapshot = DashboardSnapshot::build(
            &products,
            &[],
            &[],
            &[],
            Date::MIN,
            DashboardOptions::default(),
        );
        let ids: Vec<i64> = snapshot.low_stock.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn snapshot_splits_due_and_overdue_notes() -> Result<()> {
        let today = Date::from_calendar_date(2025, Month::June, 20)?;
        let notes = vec![
            note(1, Date::from_calendar_date(2025, Month::June, 30)?),
            note(2, Date::from_calendar_date(2025, Month::June, 25)?),
            note(3, Date::from_calendar_date(2025, Month::June, 1)?),
            note(4, Date::from_calendar_date(2025, Month::December, 1)?),
            note(5, today),
        ];
        let budgets = vec![
            budget(1, BudgetStatus::Open),
            budget(2, BudgetStatus::UnderReview),
            budget(3, BudgetStatus::Approved),
        ];
        let snapshot = DashboardSnapshot::build(
            &[],
            &notes,
            &budgets,
            &[],
            today,
            DashboardOptions {
                low_stock_threshold: 5,
                due_window_days: 10,
            },
        );

        let ids: Vec<i64> = snapshot.notes_due.iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![5, 2, 1]);
        assert_eq!(snapshot.overdue_notes, 1);
        assert_eq!(snapshot.pending_budgets, 2);
        Ok(())
    }

    #[test]
    fn huge_due_window_reaches_every_future_note() -> Result<()> {
        let today = Date::from_calendar_date(2025, Month::June, 20)?;
        let notes = vec![
            note(1, Date::from_calendar_date(9999, Month::December, 31)?),
            note(2, Date::from_calendar_date(2025, Month::June, 19)?),
        ];
        let snapshot = DashboardSnapshot::build(
            &[],
            &notes,
            &[],
            &[],
            today,
            DashboardOptions {
                low_stock_threshold: i64::MAX,
                due_window_days: i64::MAX,
            },
        );

        let ids: Vec<i64> = snapshot.notes_due.iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(snapshot.overdue_notes, 1);
        Ok(())
    }
}
