// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use storefront_app::{
    Budget, BudgetId, BudgetStatus, DraftField, FormDraft, Note, NoteId, Order, OrderId,
    OrderStatus, Product, Resource, ResourceScreen, ScreenContext, ScreenMode,
};
use storefront_testkit::{CallKind, ScriptedClient, ShopFaker, records};
use time::{Date, Month};

const SEEDS: u64 = 40;

/// Opens a create form, fills every field by wire key from `input`, submits,
/// and checks that the refreshed list holds the new record.
fn create_through_screen<R>(seeded: Vec<R>, input: R::Input) -> Result<()>
where
    R: Resource,
    R::Id: From<i64> + Into<i64>,
{
    let client = ScriptedClient::new(seeded);
    let mut screen = ResourceScreen::new(client.clone(), ScreenContext::default());
    screen.enter_list()?;
    let before = screen.state().items.len();

    let filled = R::from_input(R::Id::from(0), input.clone()).to_draft();
    screen.enter_create();
    for field in <R::Draft as FormDraft>::Field::ALL {
        screen.update_draft_key(field.key(), filled.value(*field))?;
    }
    screen.submit()?;

    assert_eq!(screen.mode(), ScreenMode::List);
    assert_eq!(screen.state().items.len(), before + 1);
    assert!(
        screen
            .state()
            .items
            .iter()
            .any(|item| *item == R::from_input(item.id(), input.clone())),
        "created {} missing from list: {input:?}",
        R::KIND.singular()
    );
    assert_eq!(screen.state().error, None);
    assert_eq!(
        client.calls(),
        vec![CallKind::List, CallKind::Create, CallKind::List]
    );
    Ok(())
}

#[test]
fn generated_products_are_listed_after_create() -> Result<()> {
    for seed in 1..=SEEDS {
        let mut faker = ShopFaker::new(seed);
        let seeded = records::<Product>(3, || faker.product());
        create_through_screen(seeded, faker.product())?;
    }
    Ok(())
}

#[test]
fn generated_notes_are_listed_after_create() -> Result<()> {
    for seed in 1..=SEEDS {
        let mut faker = ShopFaker::new(seed);
        let seeded = records::<Note>(2, || faker.note());
        create_through_screen(seeded, faker.note())?;
    }
    Ok(())
}

#[test]
fn generated_budgets_are_listed_after_create() -> Result<()> {
    for seed in 1..=SEEDS {
        let mut faker = ShopFaker::new(seed);
        let seeded = records::<Budget>(2, || faker.budget());
        create_through_screen(seeded, faker.budget())?;
    }
    Ok(())
}

#[test]
fn generated_orders_are_listed_after_create() -> Result<()> {
    for seed in 1..=SEEDS {
        let mut faker = ShopFaker::new(seed);
        let seeded = records::<Order>(4, || faker.order());
        create_through_screen(seeded, faker.order())?;
    }
    Ok(())
}

#[test]
fn note_edit_round_trips_through_the_screen() -> Result<()> {
    let mut faker = ShopFaker::new(7);
    let client = ScriptedClient::new(records::<Note>(3, || faker.note()));
    let mut screen = ResourceScreen::new(client.clone(), ScreenContext::default());
    screen.enter_list()?;

    screen.enter_edit_by_id(NoteId::new(2))?;
    assert_eq!(screen.mode(), ScreenMode::Edit);
    screen.update_draft_key("valor", "1.234,56")?;
    screen.update_draft_key("vencimento", "15/08/2025")?;
    screen.submit()?;

    let stored = client.records();
    let edited = stored
        .iter()
        .find(|note| note.id == NoteId::new(2))
        .ok_or_else(|| anyhow::anyhow!("note 2 should still exist"))?;
    assert_eq!(edited.amount_cents, 123_456);
    assert_eq!(edited.due_on, Date::from_calendar_date(2025, Month::August, 15)?);
    assert_eq!(screen.state().items, stored);
    assert_eq!(screen.state().status.as_deref(), Some("note 2 updated"));
    Ok(())
}

#[test]
fn budget_edit_accepts_status_in_any_case() -> Result<()> {
    let mut faker = ShopFaker::new(11);
    let client = ScriptedClient::new(records::<Budget>(2, || faker.budget()));
    let mut screen = ResourceScreen::new(client.clone(), ScreenContext::default());
    screen.enter_list()?;

    screen.enter_edit_by_id(BudgetId::new(1))?;
    screen.update_draft_key("status", "EM ANÁLISE")?;
    screen.update_draft_key("fornecedor", "Fornecedor Novo")?;
    screen.submit()?;

    let edited = &screen.state().items[0];
    assert_eq!(edited.status, BudgetStatus::UnderReview);
    assert_eq!(edited.supplier, "Fornecedor Novo");
    assert_eq!(client.records()[1], screen.state().items[1]);
    Ok(())
}

#[test]
fn order_delete_waits_for_confirmation() -> Result<()> {
    let mut faker = ShopFaker::new(3);
    let client = ScriptedClient::new(records::<Order>(3, || faker.order()));
    let mut screen = ResourceScreen::new(client.clone(), ScreenContext::default());
    screen.enter_list()?;

    screen.request_remove(OrderId::new(2))?;
    assert!(!client.calls().contains(&CallKind::Delete));
    assert!(screen.cancel_remove());

    screen.request_remove(OrderId::new(3))?;
    screen.confirm_remove()?;
    assert_eq!(
        client.calls(),
        vec![CallKind::List, CallKind::Delete, CallKind::List]
    );
    let ids: Vec<i64> = screen.state().items.iter().map(|order| order.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);
    Ok(())
}

#[test]
fn order_status_typed_in_capitals_is_saved() -> Result<()> {
    let client = ScriptedClient::<Order>::new(Vec::new());
    let mut screen = ResourceScreen::new(client.clone(), ScreenContext::default());
    screen.enter_create();
    screen.update_draft_key("cliente", "Cliente Z")?;
    screen.update_draft_key("total", "99,90")?;
    screen.update_draft_key("status", "ENTREGUE")?;
    screen.submit()?;

    let created = &client.records()[0];
    assert_eq!(created.status, OrderStatus::Delivered);
    assert_eq!(created.total_cents, 9_990);
    Ok(())
}
