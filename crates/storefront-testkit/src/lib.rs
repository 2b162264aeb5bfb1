// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use storefront_api::MemoryCollection;
use storefront_app::{
    ApiError, BudgetStatus, CollectionClient, NewBudget, NewNote, NewOrder, NewProduct,
    OrderStatus, Resource,
};
use time::{Date, Duration, Month};

const PRODUCT_NAMES: [&str; 12] = [
    "Arroz 5kg",
    "Feijão Carioca",
    "Café Torrado",
    "Açúcar Cristal",
    "Óleo de Soja",
    "Macarrão Espaguete",
    "Leite Integral",
    "Farinha de Trigo",
    "Sabão em Pó",
    "Detergente",
    "Papel Toalha",
    "Biscoito Maizena",
];

const MANUFACTURERS: [&str; 8] = [
    "Fornecedor X",
    "Fornecedor Y",
    "Distribuidora Sul",
    "Atacado Central",
    "Alimentos Brasil",
    "Casa Limpa",
    "Grão Dourado",
    "Laticínios Serra",
];

const CUSTOMERS: [&str; 10] = [
    "Cliente A",
    "Cliente B",
    "Cliente C",
    "Ana Souza",
    "Bruno Lima",
    "Carla Dias",
    "Diego Rocha",
    "Elisa Prado",
    "Fábio Nunes",
    "Gabriela Reis",
];

const BUDGET_NOTES: [&str; 6] = [
    "reposição mensal",
    "pedido de emergência",
    "cotação anual",
    "entrega parcelada",
    "frete incluso",
    "",
];

const REFERENCE_YEAR: i32 = 2025;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible shop records.
#[derive(Debug, Clone)]
pub struct ShopFaker {
    rng: DeterministicRng,
}

impl ShopFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn product(&mut self) -> NewProduct {
        let cost_cents = self.int_range(100, 50_000);
        let markup = self.int_range(110, 200);
        NewProduct {
            name: self.pick(&PRODUCT_NAMES).to_owned(),
            manufacturer: self.pick(&MANUFACTURERS).to_owned(),
            expires_on: self.rng.bool().then(|| self.date_in_year(REFERENCE_YEAR + 1)),
            cost_cents,
            price_cents: cost_cents * markup / 100,
            quantity: self.int_range(0, 120),
            barcode: format!("{:09}", self.int_range(0, 999_999_999)),
        }
    }

    pub fn note(&mut self) -> NewNote {
        NewNote {
            description: format!("Nota Fiscal {:03}", self.int_range(1, 999)),
            amount_cents: self.int_range(10_000, 500_000),
            due_on: self.date_in_year(REFERENCE_YEAR),
        }
    }

    pub fn budget(&mut self) -> NewBudget {
        let status = BudgetStatus::ALL[self.rng.int_n(BudgetStatus::ALL.len())];
        NewBudget {
            supplier: self.pick(&MANUFACTURERS).to_owned(),
            amount_cents: self.int_range(50_000, 2_000_000),
            description: self.pick(&BUDGET_NOTES).to_owned(),
            status,
        }
    }

    pub fn order(&mut self) -> NewOrder {
        let status = OrderStatus::ALL[self.rng.int_n(OrderStatus::ALL.len())];
        NewOrder {
            customer: self.pick(&CUSTOMERS).to_owned(),
            total_cents: self.int_range(1_000, 300_000),
            status,
        }
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let start = Date::from_calendar_date(year, Month::January, 1).unwrap_or(Date::MIN);
        let offset = self.int_range(0, 364);
        start.saturating_add(Duration::days(offset))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Builds `count` records with ids `1..=count` from generated inputs.
pub fn records<R: Resource>(
    count: i64,
    mut input: impl FnMut() -> R::Input,
) -> Vec<R>
where
    R::Id: From<i64>,
{
    (1..=count)
        .map(|id| R::from_input(R::Id::from(id), input()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug)]
struct Script<R: Resource> {
    store: MemoryCollection<R>,
    calls: Vec<CallKind>,
    failures: Vec<(CallKind, ApiError)>,
}

/// Collection client backed by memory that records every call and can be
/// told to fail specific ones. Clones share state, so a test can keep a
/// handle after handing one to a screen.
#[derive(Debug)]
pub struct ScriptedClient<R: Resource> {
    script: Rc<RefCell<Script<R>>>,
}

impl<R: Resource> Clone for ScriptedClient<R> {
    fn clone(&self) -> Self {
        Self {
            script: Rc::clone(&self.script),
        }
    }
}

impl<R> ScriptedClient<R>
where
    R: Resource,
    R::Id: From<i64> + Into<i64>,
{
    pub fn new(records: Vec<R>) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                store: MemoryCollection::new(records),
                calls: Vec::new(),
                failures: Vec::new(),
            })),
        }
    }

    /// Makes the next `kind` call return `error` instead of touching the store.
    pub fn fail_next(&self, kind: CallKind, error: ApiError) {
        self.script.borrow_mut().failures.push((kind, error));
    }

    pub fn calls(&self) -> Vec<CallKind> {
        self.script.borrow().calls.clone()
    }

    pub fn records(&self) -> Vec<R> {
        self.script.borrow().store.records().to_vec()
    }

    fn run<T>(
        &self,
        kind: CallKind,
        call: impl FnOnce(&mut MemoryCollection<R>) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut script = self.script.borrow_mut();
        script.calls.push(kind);
        if let Some(index) = script.failures.iter().position(|(k, _)| *k == kind) {
            let (_, error) = script.failures.remove(index);
            return Err(error);
        }
        call(&mut script.store)
    }
}

impl<R> CollectionClient<R> for ScriptedClient<R>
where
    R: Resource,
    R::Id: From<i64> + Into<i64>,
{
    fn list(&mut self) -> Result<Vec<R>, ApiError> {
        self.run(CallKind::List, |store| store.list())
    }

    fn create(&mut self, input: &R::Input) -> Result<String, ApiError> {
        self.run(CallKind::Create, |store| store.create(input))
    }

    fn update(&mut self, record: &R) -> Result<String, ApiError> {
        self.run(CallKind::Update, |store| store.update(record))
    }

    fn delete(&mut self, id: R::Id) -> Result<String, ApiError> {
        self.run(CallKind::Delete, |store| store.delete(id))
    }
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn fixture_today() -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::July, 20).unwrap_or(Date::MIN)
}
