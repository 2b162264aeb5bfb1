// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Sample records served by `storefront --demo`.

use storefront_app::{
    Budget, BudgetId, BudgetStatus, Note, NoteId, Order, OrderId, OrderStatus, Product, ProductId,
};
use time::macros::date;

use crate::MemoryCollection;

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Produto A".to_owned(),
            manufacturer: "Fornecedor X".to_owned(),
            expires_on: Some(date!(2025 - 12 - 31)),
            cost_cents: 1_000,
            price_cents: 1_500,
            quantity: 30,
            barcode: "123456789".to_owned(),
        },
        Product {
            id: ProductId::new(2),
            name: "Produto B".to_owned(),
            manufacturer: "Fornecedor Y".to_owned(),
            expires_on: Some(date!(2026 - 03 - 20)),
            cost_cents: 2_000,
            price_cents: 3_000,
            quantity: 50,
            barcode: "987654321".to_owned(),
        },
        Product {
            id: ProductId::new(3),
            name: "Produto C".to_owned(),
            manufacturer: "Fornecedor X".to_owned(),
            expires_on: None,
            cost_cents: 450,
            price_cents: 990,
            quantity: 2,
            barcode: "555000111".to_owned(),
        },
    ]
}

pub fn notes() -> Vec<Note> {
    vec![
        Note {
            id: NoteId::new(1),
            description: "Nota Fiscal 001".to_owned(),
            amount_cents: 50_000,
            due_on: date!(2025 - 07 - 30),
        },
        Note {
            id: NoteId::new(2),
            description: "Nota Fiscal 002".to_owned(),
            amount_cents: 70_000,
            due_on: date!(2025 - 08 - 05),
        },
    ]
}

pub fn budgets() -> Vec<Budget> {
    vec![
        Budget {
            id: BudgetId::new(1),
            supplier: "Fornecedor X".to_owned(),
            amount_cents: 80_000,
            description: String::new(),
            status: BudgetStatus::Open,
        },
        Budget {
            id: BudgetId::new(2),
            supplier: "Fornecedor Y".to_owned(),
            amount_cents: 150_000,
            description: String::new(),
            status: BudgetStatus::UnderReview,
        },
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId::new(1),
            customer: "Cliente A".to_owned(),
            total_cents: 12_000,
            status: OrderStatus::AwaitingPayment,
        },
        Order {
            id: OrderId::new(2),
            customer: "Cliente B".to_owned(),
            total_cents: 30_000,
            status: OrderStatus::Delivered,
        },
        Order {
            id: OrderId::new(3),
            customer: "Cliente C".to_owned(),
            total_cents: 15_000,
            status: OrderStatus::AwaitingPayment,
        },
    ]
}

/// One seeded in-memory collection per resource.
pub struct DemoShop {
    pub products: MemoryCollection<Product>,
    pub notes: MemoryCollection<Note>,
    pub budgets: MemoryCollection<Budget>,
    pub orders: MemoryCollection<Order>,
}

impl DemoShop {
    pub fn seeded() -> Self {
        Self {
            products: MemoryCollection::new(products()),
            notes: MemoryCollection::new(notes()),
            budgets: MemoryCollection::new(budgets()),
            orders: MemoryCollection::new(orders()),
        }
    }
}
