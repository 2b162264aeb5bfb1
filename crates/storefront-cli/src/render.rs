// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use storefront_app::values::{format_date_br, format_money};
use storefront_app::{
    Budget, DashboardSnapshot, DraftField, FormDraft, GraphView, GraphsReport, Note, Order,
    OrderStatusFilter, Product, Resource, ScreenMode,
};

const BAR_WIDTH: usize = 30;

/// Text forms of a record: one line for lists, labeled fields for `show <id>`.
pub trait Row: Resource {
    fn summary(&self) -> String;

    fn details(&self) -> Vec<(&'static str, String)>;

    fn passes(&self, _filter: OrderStatusFilter) -> bool {
        true
    }
}

impl Row for Product {
    fn summary(&self) -> String {
        let mut line = format!(
            "#{} {} | {} | custo {} | venda {} | qtd {}",
            self.id,
            self.name,
            self.manufacturer,
            format_money(self.cost_cents),
            format_money(self.price_cents),
            self.quantity,
        );
        if let Some(expires_on) = self.expires_on {
            line.push_str(&format!(" | validade {}", format_date_br(expires_on)));
        }
        if !self.barcode.is_empty() {
            line.push_str(&format!(" | código {}", self.barcode));
        }
        line
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nome", self.name.clone()),
            ("Fabricante", self.manufacturer.clone()),
            (
                "Validade",
                self.expires_on.map(format_date_br).unwrap_or_else(|| "-".to_owned()),
            ),
            ("Preço de Custo", format_money(self.cost_cents)),
            ("Preço de Venda", format_money(self.price_cents)),
            (
                "Margem",
                format_money(self.price_cents.saturating_sub(self.cost_cents)),
            ),
            ("Quantidade", self.quantity.to_string()),
            ("Código de Barras", or_dash(&self.barcode)),
        ]
    }
}

impl Row for Note {
    fn summary(&self) -> String {
        format!(
            "#{} {} | {} | vence {}",
            self.id,
            self.description,
            format_money(self.amount_cents),
            format_date_br(self.due_on),
        )
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Descrição", self.description.clone()),
            ("Valor", format_money(self.amount_cents)),
            ("Data de Vencimento", format_date_br(self.due_on)),
        ]
    }
}

impl Row for Budget {
    fn summary(&self) -> String {
        let mut line = format!(
            "#{} {} | {} | {}",
            self.id,
            self.supplier,
            format_money(self.amount_cents),
            self.status.as_str(),
        );
        if !self.description.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.description);
        }
        line
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Fornecedor", self.supplier.clone()),
            ("Valor", format_money(self.amount_cents)),
            ("Descrição", or_dash(&self.description)),
            ("Status", self.status.as_str().to_owned()),
        ]
    }
}

impl Row for Order {
    fn summary(&self) -> String {
        format!(
            "#{} {} | {} | {}",
            self.id,
            self.customer,
            format_money(self.total_cents),
            self.status.as_str(),
        )
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Cliente", self.customer.clone()),
            ("Total", format_money(self.total_cents)),
            ("Status", self.status.as_str().to_owned()),
        ]
    }

    fn passes(&self, filter: OrderStatusFilter) -> bool {
        filter.matches(self)
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn list<R: Row>(items: &[&R], search_term: &str, filter: OrderStatusFilter) -> String {
    let rows: Vec<&&R> = items.iter().filter(|item| item.passes(filter)).collect();
    let resource = R::KIND.as_str();

    let search_term = search_term.trim();
    let mut lines = vec![if search_term.is_empty() {
        format!("{resource}: {} shown", rows.len())
    } else {
        format!("{resource}: {} matching {search_term:?}", rows.len())
    }];
    if rows.is_empty() {
        lines.push("  (nothing to show)".to_owned());
    }
    lines.extend(rows.iter().map(|row| format!("  {}", row.summary())));
    finish(lines)
}

pub fn detail<R: Row>(record: &R) -> String {
    let mut lines = vec![format!("{} #{}", R::KIND.singular(), record.id())];
    lines.extend(
        record
            .details()
            .into_iter()
            .map(|(label, value)| format!("  {label:<20} {value}")),
    );
    finish(lines)
}

pub fn draft<D: FormDraft>(kind: &str, mode: ScreenMode, draft: &D) -> String {
    let mut lines = vec![format!("{} {kind}", mode.as_str())];
    lines.extend(D::Field::ALL.iter().map(|field| {
        let marker = if field.is_required() { "*" } else { " " };
        format!(
            "  {marker}{:<12} {:<20} {}",
            field.key(),
            field.label(),
            draft.value(*field)
        )
    }));
    lines.push("  (* required; `set <key> <value>` then `submit`)".to_owned());
    finish(lines)
}

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut lines = vec![
        format!("vendas totais: {}", format_money(snapshot.total_sales_cents)),
        format!("faturado:      {}", format_money(snapshot.invoiced_cents)),
        "últimos pedidos:".to_owned(),
    ];
    if snapshot.latest_orders.is_empty() {
        lines.push("  (nenhum)".to_owned());
    }
    lines.extend(
        snapshot
            .latest_orders
            .iter()
            .map(|order| format!("  {}", order.summary())),
    );

    lines.push("estoque crítico:".to_owned());
    if snapshot.low_stock.is_empty() {
        lines.push("  (nenhum)".to_owned());
    }
    lines.extend(
        snapshot
            .low_stock
            .iter()
            .map(|product| format!("  {} - {} unidades", product.name, product.quantity)),
    );

    lines.push(format!("orçamentos pendentes: {}", snapshot.pending_budgets));

    lines.push("notas a vencer:".to_owned());
    if snapshot.notes_due.is_empty() {
        lines.push("  (nenhuma)".to_owned());
    }
    lines.extend(snapshot.notes_due.iter().map(|note| {
        format!(
            "  {} - Vence em: {}",
            note.description,
            format_date_br(note.due_on)
        )
    }));
    if snapshot.overdue_notes > 0 {
        lines.push(format!("notas vencidas: {}", snapshot.overdue_notes));
    }
    finish(lines)
}

/// `#` bar scaled against `max`; any positive value gets at least one mark.
fn bar(value: i64, max: i64) -> String {
    if value <= 0 || max <= 0 {
        return String::new();
    }
    let scaled = i128::from(value) * BAR_WIDTH as i128 / i128::from(max);
    let width = usize::try_from(scaled).unwrap_or(BAR_WIDTH).clamp(1, BAR_WIDTH);
    "#".repeat(width)
}

fn bar_line(label: &str, cents: i64, max: i64) -> String {
    format!("  {label:<14} {:<30} {}", bar(cents, max), format_money(cents))
}

pub fn graphs(view: GraphView, report: &GraphsReport) -> String {
    let tabs: Vec<String> = GraphView::ALL
        .iter()
        .map(|candidate| {
            if *candidate == view {
                format!("[{}]", candidate.as_str())
            } else {
                candidate.as_str().to_owned()
            }
        })
        .collect();
    let mut lines = vec![format!("gráficos: {}", tabs.join(" "))];

    match view {
        GraphView::Sales => {
            let sales = &report.sales;
            let max = sales.total_sales_cents;
            lines.push(format!("total de vendas: {}", format_money(max)));
            lines.push(bar_line("faturado", sales.invoiced_cents, max));
            lines.push(bar_line("aguardando", sales.awaiting_cents, max));
            lines.push(format!(
                "pedidos: {} | ticket médio: {}",
                sales.order_count,
                format_money(sales.average_ticket_cents)
            ));
        }
        GraphView::Customers => {
            lines.push(format!("clientes: {}", report.distinct_customers()));
            if report.customers.is_empty() {
                lines.push("  (nenhum)".to_owned());
            }
            let max = report
                .customers
                .iter()
                .map(|entry| entry.total_cents)
                .max()
                .unwrap_or(0);
            lines.extend(report.customers.iter().map(|entry| {
                format!(
                    "{} ({} pedidos)",
                    bar_line(&entry.name, entry.total_cents, max),
                    entry.orders
                )
            }));
        }
        GraphView::Finance => {
            let finance = &report.finance;
            let max = finance.invoiced_cents.max(finance.expenses_cents());
            lines.push("faturamento x despesas:".to_owned());
            lines.push(bar_line("faturamento", finance.invoiced_cents, max));
            lines.push(bar_line("despesas", finance.expenses_cents(), max));
            lines.push(format!(
                "  notas a pagar: {} | orçamentos aprovados: {}",
                format_money(finance.notes_payable_cents),
                format_money(finance.approved_budgets_cents)
            ));
            lines.push(format!("saldo: {}", format_money(finance.balance_cents())));
        }
    }
    finish(lines)
}
