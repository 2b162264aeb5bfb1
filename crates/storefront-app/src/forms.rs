// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use time::Date;

use crate::values::{parse_date, parse_integer, parse_money};
use crate::{
    BudgetStatus, InvalidField, NewBudget, NewNote, NewOrder, NewProduct, OrderStatus,
    ValidationError,
};

/// A named input of a draft. `key` is the field name on the wire.
pub trait DraftField: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn key(self) -> &'static str;
    fn label(self) -> &'static str;
    fn is_required(self) -> bool;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

/// Raw form input for one resource. Values stay as typed text until
/// `validate` turns them into the payload sent to the API.
pub trait FormDraft: Default + Clone + fmt::Debug + PartialEq {
    type Field: DraftField;
    type Output;

    fn value(&self, field: Self::Field) -> &str;
    fn value_mut(&mut self, field: Self::Field) -> &mut String;
    fn validate(&self) -> Result<Self::Output, ValidationError>;

    fn set(&mut self, field: Self::Field, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    fn is_blank(&self) -> bool {
        Self::Field::ALL
            .iter()
            .all(|field| self.value(*field).trim().is_empty())
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        Self::Field::ALL
            .iter()
            .filter(|field| field.is_required() && self.value(**field).trim().is_empty())
            .map(|field| field.key())
            .collect()
    }
}

macro_rules! draft_form {
    (
        $field:ident, $draft:ident -> $output:ty, $validate:ident {
            $($variant:ident => $member:ident ($key:literal, $label:literal, $required:literal)),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $field {
            $($variant),+
        }

        impl DraftField for $field {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn is_required(self) -> bool {
                match self {
                    $(Self::$variant => $required),+
                }
            }
        }

        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $draft {
            $(pub $member: String),+
        }

        impl FormDraft for $draft {
            type Field = $field;
            type Output = $output;

            fn value(&self, field: $field) -> &str {
                match field {
                    $($field::$variant => &self.$member),+
                }
            }

            fn value_mut(&mut self, field: $field) -> &mut String {
                match field {
                    $($field::$variant => &mut self.$member),+
                }
            }

            fn validate(&self) -> Result<$output, ValidationError> {
                $validate(self)
            }
        }
    };
}

draft_form!(ProductField, ProductDraft -> NewProduct, validate_product {
    Name => name("nome", "Nome", true),
    Manufacturer => manufacturer("fabricante", "Fabricante", true),
    ExpiresOn => expires_on("validade", "Validade", false),
    Cost => cost("custo", "Preço de Custo", true),
    Price => price("venda", "Preço de Venda", true),
    Quantity => quantity("quantidade", "Quantidade", true),
    Barcode => barcode("codigo", "Código de Barras", false),
});

draft_form!(NoteField, NoteDraft -> NewNote, validate_note {
    Description => description("descricao", "Descrição", true),
    Amount => amount("valor", "Valor", true),
    DueOn => due_on("vencimento", "Data de Vencimento", true),
});

draft_form!(BudgetField, BudgetDraft -> NewBudget, validate_budget {
    Supplier => supplier("fornecedor", "Fornecedor", true),
    Amount => amount("valor", "Valor", true),
    Description => description("descricao", "Descrição", false),
    Status => status("status", "Status", false),
});

draft_form!(OrderField, OrderDraft -> NewOrder, validate_order {
    Customer => customer("cliente", "Cliente", true),
    Total => total("total", "Total", true),
    Status => status("status", "Status", false),
});

/// Collects every problem in a draft before reporting, so the user sees all
/// of them at once. Accessors return placeholders for bad input; the
/// placeholder payload is discarded whenever any problem was recorded.
struct Checker<'a, D: FormDraft> {
    draft: &'a D,
    error: ValidationError,
}

impl<'a, D: FormDraft> Checker<'a, D> {
    fn new(draft: &'a D) -> Self {
        Self {
            draft,
            error: ValidationError {
                missing: draft.missing_fields(),
                invalid: Vec::new(),
            },
        }
    }

    fn raw(&self, field: D::Field) -> &'a str {
        self.draft.value(field).trim()
    }

    fn invalid(&mut self, field: D::Field, reason: impl Into<String>) {
        self.error.invalid.push(InvalidField {
            key: field.key(),
            reason: reason.into(),
        });
    }

    fn text(&self, field: D::Field) -> String {
        self.raw(field).to_owned()
    }

    fn money(&mut self, field: D::Field) -> i64 {
        let raw = self.raw(field);
        if raw.is_empty() {
            return 0;
        }
        parse_money(raw).unwrap_or_else(|| {
            self.invalid(field, format!("{raw:?} is not an amount (for example 10,50)"));
            0
        })
    }

    fn count(&mut self, field: D::Field) -> i64 {
        let raw = self.raw(field);
        if raw.is_empty() {
            return 0;
        }
        match parse_integer(raw) {
            Some(value) if value >= 0 => value,
            Some(_) => {
                self.invalid(field, "cannot be negative");
                0
            }
            None => {
                self.invalid(field, format!("{raw:?} is not a whole number"));
                0
            }
        }
    }

    fn optional_date(&mut self, field: D::Field) -> Option<Date> {
        let raw = self.raw(field);
        if raw.is_empty() {
            return None;
        }
        let parsed = parse_date(raw);
        if parsed.is_none() {
            self.invalid(
                field,
                format!("{raw:?} is not a date (use YYYY-MM-DD or DD/MM/YYYY)"),
            );
        }
        parsed
    }

    fn date(&mut self, field: D::Field) -> Date {
        self.optional_date(field).unwrap_or(Date::MIN)
    }

    fn choice<T: Copy>(
        &mut self,
        field: D::Field,
        parse: fn(&str) -> Option<T>,
        options: &[&str],
        default: T,
    ) -> T {
        let raw = self.raw(field);
        if raw.is_empty() {
            return default;
        }
        parse(raw).unwrap_or_else(|| {
            self.invalid(field, format!("expected one of: {}", options.join(", ")));
            default
        })
    }

    fn finish<T>(self, output: T) -> Result<T, ValidationError> {
        if self.error.is_empty() {
            Ok(output)
        } else {
            Err(self.error)
        }
    }
}

fn validate_product(draft: &ProductDraft) -> Result<NewProduct, ValidationError> {
    let mut check = Checker::new(draft);
    let product = NewProduct {
        name: check.text(ProductField::Name),
        manufacturer: check.text(ProductField::Manufacturer),
        expires_on: check.optional_date(ProductField::ExpiresOn),
        cost_cents: check.money(ProductField::Cost),
        price_cents: check.money(ProductField::Price),
        quantity: check.count(ProductField::Quantity),
        barcode: check.text(ProductField::Barcode),
    };
    if !product.barcode.is_empty() && !product.barcode.chars().all(|ch| ch.is_ascii_digit()) {
        check.invalid(ProductField::Barcode, "barcode must contain digits only");
    }
    check.finish(product)
}

fn validate_note(draft: &NoteDraft) -> Result<NewNote, ValidationError> {
    let mut check = Checker::new(draft);
    let note = NewNote {
        description: check.text(NoteField::Description),
        amount_cents: check.money(NoteField::Amount),
        due_on: check.date(NoteField::DueOn),
    };
    check.finish(note)
}

fn validate_budget(draft: &BudgetDraft) -> Result<NewBudget, ValidationError> {
    let mut check = Checker::new(draft);
    let statuses = BudgetStatus::ALL.map(BudgetStatus::as_str);
    let budget = NewBudget {
        supplier: check.text(BudgetField::Supplier),
        amount_cents: check.money(BudgetField::Amount),
        description: check.text(BudgetField::Description),
        status: check.choice(
            BudgetField::Status,
            BudgetStatus::parse,
            &statuses,
            BudgetStatus::Open,
        ),
    };
    check.finish(budget)
}

fn validate_order(draft: &OrderDraft) -> Result<NewOrder, ValidationError> {
    let mut check = Checker::new(draft);
    let statuses = OrderStatus::ALL.map(OrderStatus::as_str);
    let order = NewOrder {
        customer: check.text(OrderField::Customer),
        total_cents: check.money(OrderField::Total),
        status: check.choice(
            OrderField::Status,
            OrderStatus::parse,
            &statuses,
            OrderStatus::AwaitingPayment,
        ),
    };
    check.finish(order)
}
