// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::values::{format_date, format_decimal};
use crate::{
    ApiError, Budget, BudgetDraft, BudgetId, FormDraft, NewBudget, NewNote, NewOrder, NewProduct,
    Note, NoteDraft, NoteId, Order, OrderDraft, OrderId, Product, ProductDraft, ProductId,
    ResourceKind,
};

/// A record of one remote collection.
pub trait Resource: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    type Id: Copy + Eq + fmt::Debug + fmt::Display + Serialize;
    /// Payload for creating a record: every field except the id.
    type Input: Clone + fmt::Debug + PartialEq + Serialize;
    type Draft: FormDraft<Output = Self::Input>;

    const KIND: ResourceKind;

    fn id(&self) -> Self::Id;
    /// Field matched by the search box and used as the row title.
    fn display_field(&self) -> &str;
    fn from_input(id: Self::Id, input: Self::Input) -> Self;
    fn to_draft(&self) -> Self::Draft;
}

/// Calls against one remote collection. Write calls return the server's
/// confirmation message, which may be empty.
pub trait CollectionClient<R: Resource> {
    fn list(&mut self) -> Result<Vec<R>, ApiError>;
    fn create(&mut self, input: &R::Input) -> Result<String, ApiError>;
    fn update(&mut self, record: &R) -> Result<String, ApiError>;
    fn delete(&mut self, id: R::Id) -> Result<String, ApiError>;
}

impl<R: Resource, C: CollectionClient<R> + ?Sized> CollectionClient<R> for Box<C> {
    fn list(&mut self) -> Result<Vec<R>, ApiError> {
        (**self).list()
    }

    fn create(&mut self, input: &R::Input) -> Result<String, ApiError> {
        (**self).create(input)
    }

    fn update(&mut self, record: &R) -> Result<String, ApiError> {
        (**self).update(record)
    }

    fn delete(&mut self, id: R::Id) -> Result<String, ApiError> {
        (**self).delete(id)
    }
}

impl Resource for Product {
    type Id = ProductId;
    type Input = NewProduct;
    type Draft = ProductDraft;

    const KIND: ResourceKind = ResourceKind::Products;

    fn id(&self) -> ProductId {
        self.id
    }

    fn display_field(&self) -> &str {
        &self.name
    }

    fn from_input(id: ProductId, input: NewProduct) -> Self {
        Self {
            id,
            name: input.name,
            manufacturer: input.manufacturer,
            expires_on: input.expires_on,
            cost_cents: input.cost_cents,
            price_cents: input.price_cents,
            quantity: input.quantity,
            barcode: input.barcode,
        }
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            manufacturer: self.manufacturer.clone(),
            expires_on: self.expires_on.map(format_date).unwrap_or_default(),
            cost: format_decimal(self.cost_cents),
            price: format_decimal(self.price_cents),
            quantity: self.quantity.to_string(),
            barcode: self.barcode.clone(),
        }
    }
}

impl Resource for Note {
    type Id = NoteId;
    type Input = NewNote;
    type Draft = NoteDraft;

    const KIND: ResourceKind = ResourceKind::Notes;

    fn id(&self) -> NoteId {
        self.id
    }

    fn display_field(&self) -> &str {
        &self.description
    }

    fn from_input(id: NoteId, input: NewNote) -> Self {
        Self {
            id,
            description: input.description,
            amount_cents: input.amount_cents,
            due_on: input.due_on,
        }
    }

    fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            description: self.description.clone(),
            amount: format_decimal(self.amount_cents),
            due_on: format_date(self.due_on),
        }
    }
}

impl Resource for Budget {
    type Id = BudgetId;
    type Input = NewBudget;
    type Draft = BudgetDraft;

    const KIND: ResourceKind = ResourceKind::Budgets;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn display_field(&self) -> &str {
        &self.supplier
    }

    fn from_input(id: BudgetId, input: NewBudget) -> Self {
        Self {
            id,
            supplier: input.supplier,
            amount_cents: input.amount_cents,
            description: input.description,
            status: input.status,
        }
    }

    fn to_draft(&self) -> BudgetDraft {
        BudgetDraft {
            supplier: self.supplier.clone(),
            amount: format_decimal(self.amount_cents),
            description: self.description.clone(),
            status: self.status.as_str().to_owned(),
        }
    }
}

impl Resource for Order {
    type Id = OrderId;
    type Input = NewOrder;
    type Draft = OrderDraft;

    const KIND: ResourceKind = ResourceKind::Orders;

    fn id(&self) -> OrderId {
        self.id
    }

    fn display_field(&self) -> &str {
        &self.customer
    }

    fn from_input(id: OrderId, input: NewOrder) -> Self {
        Self {
            id,
            customer: input.customer,
            total_cents: input.total_cents,
            status: input.status,
        }
    }

    fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            customer: self.customer.clone(),
            total: format_decimal(self.total_cents),
            status: self.status.as_str().to_owned(),
        }
    }
}
