// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use storefront_app::{ApiError, CollectionClient, Resource};
use tracing::debug;

/// In-process collection used by `--demo` and tests. Ids are assigned the
/// way an auto-increment column would: one past the largest id ever seen.
#[derive(Debug, Clone)]
pub struct MemoryCollection<R: Resource> {
    records: Vec<R>,
    next_id: i64,
}

impl<R> MemoryCollection<R>
where
    R: Resource,
    R::Id: From<i64> + Into<i64>,
{
    pub fn new(records: Vec<R>) -> Self {
        let next_id = records
            .iter()
            .map(|record| Into::<i64>::into(record.id()))
            .max()
            .unwrap_or(0)
            + 1;
        Self { records, next_id }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    fn position(&self, id: R::Id) -> Result<usize, ApiError> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| {
                ApiError::server(
                    Some(404),
                    format!("{} {id} not found", R::KIND.singular()),
                )
            })
    }
}

impl<R> Default for MemoryCollection<R>
where
    R: Resource,
    R::Id: From<i64> + Into<i64>,
{
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R> CollectionClient<R> for MemoryCollection<R>
where
    R: Resource,
    R::Id: From<i64> + Into<i64>,
{
    fn list(&mut self) -> Result<Vec<R>, ApiError> {
        Ok(self.records.clone())
    }

    fn create(&mut self, input: &R::Input) -> Result<String, ApiError> {
        let id = R::Id::from(self.next_id);
        self.next_id += 1;
        self.records.push(R::from_input(id, input.clone()));
        debug!(kind = R::KIND.as_str(), %id, "memory create");
        Ok(format!("{} {id} created", R::KIND.singular()))
    }

    fn update(&mut self, record: &R) -> Result<String, ApiError> {
        let index = self.position(record.id())?;
        self.records[index] = record.clone();
        Ok(format!("{} {} updated", R::KIND.singular(), record.id()))
    }

    fn delete(&mut self, id: R::Id) -> Result<String, ApiError> {
        let index = self.position(id)?;
        self.records.remove(index);
        Ok(format!("{} {id} deleted", R::KIND.singular()))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryCollection;
    use storefront_app::{
        ApiError, CollectionClient, NewOrder, Order, OrderId, OrderStatus,
    };

    fn order(id: i64) -> Order {
        Order {
            id: OrderId::new(id),
            customer: format!("Cliente {id}"),
            total_cents: 10_000,
            status: OrderStatus::AwaitingPayment,
        }
    }

    #[test]
    fn create_assigns_ids_after_the_largest_seed() -> Result<(), ApiError> {
        let mut orders = MemoryCollection::new(vec![order(3), order(7)]);
        orders.create(&NewOrder {
            customer: "Cliente Z".to_owned(),
            total_cents: 500,
            status: OrderStatus::Delivered,
        })?;

        let listed = orders.list()?;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[2].id, OrderId::new(8));
        assert_eq!(listed[2].customer, "Cliente Z");
        Ok(())
    }

    #[test]
    fn update_and_delete_require_a_known_id() -> Result<(), ApiError> {
        let mut orders = MemoryCollection::new(vec![order(1)]);

        let mut changed = order(1);
        changed.status = OrderStatus::Delivered;
        orders.update(&changed)?;
        assert_eq!(orders.records()[0].status, OrderStatus::Delivered);

        assert!(matches!(
            orders.update(&order(9)),
            Err(ApiError::Server { status: Some(404), .. })
        ));
        assert!(matches!(
            orders.delete(OrderId::new(9)),
            Err(ApiError::Server { status: Some(404), .. })
        ));

        orders.delete(OrderId::new(1))?;
        assert!(orders.records().is_empty());
        Ok(())
    }
}
