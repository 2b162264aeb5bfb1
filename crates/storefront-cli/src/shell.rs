// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use std::io::{BufRead, Write};
use storefront_app::{
    AppCommand, AppEvent, AppState, Budget, CollectionClient, DashboardOptions,
    DashboardSnapshot, GraphView, GraphsReport, Note, Order, OrderStatusFilter, Product,
    ResourceKind, ResourceScreen, ScreenContext, ScreenError, TabKind, suppliers,
};
use time::Date;
use tracing::debug;

use crate::render::{self, Row};

pub type BoxedClient<R> = Box<dyn CollectionClient<R>>;

/// The four remote collections the shell works against.
pub struct Collections {
    pub products: BoxedClient<Product>,
    pub notes: BoxedClient<Note>,
    pub budgets: BoxedClient<Budget>,
    pub orders: BoxedClient<Order>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Tab(TabKind),
    Next,
    Prev,
    List,
    Search(String),
    Filter(OrderStatusFilter),
    Suppliers,
    New,
    Edit(i64),
    Set { key: String, value: String },
    Show(Option<i64>),
    Submit,
    Delete(i64),
    Confirm,
    Cancel,
    Dashboard,
    Graph(GraphView),
    Whoami,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "help" | "?" => Command::Help,
        "tab" => {
            let tab = TabKind::parse(rest).ok_or_else(|| {
                anyhow!("`tab` needs one of: {}", tab_names().join(", "))
            })?;
            Command::Tab(tab)
        }
        "next" => Command::Next,
        "prev" => Command::Prev,
        "list" => Command::List,
        "search" => Command::Search(rest.to_owned()),
        "filter" => {
            let filter = OrderStatusFilter::parse(rest)
                .ok_or_else(|| anyhow!("`filter` needs one of: all, awaiting, delivered"))?;
            Command::Filter(filter)
        }
        "suppliers" => Command::Suppliers,
        "new" => Command::New,
        "edit" => Command::Edit(parse_id("edit", rest)?),
        "set" => {
            let (key, value) = match rest.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => (rest, ""),
            };
            if key.is_empty() {
                bail!("`set` needs a field key, for example `set nome Produto A`");
            }
            Command::Set {
                key: key.to_owned(),
                value: value.to_owned(),
            }
        }
        "show" if rest.is_empty() => Command::Show(None),
        "show" => Command::Show(Some(parse_id("show", rest)?)),
        "submit" | "save" => Command::Submit,
        "delete" => Command::Delete(parse_id("delete", rest)?),
        "confirm" => Command::Confirm,
        "cancel" => Command::Cancel,
        "dashboard" => Command::Dashboard,
        "graph" => {
            let view = GraphView::parse(rest).ok_or_else(|| {
                anyhow!("`graph` needs one of: vendas, clientes, financeiro")
            })?;
            Command::Graph(view)
        }
        "whoami" => Command::Whoami,
        "quit" | "exit" => Command::Quit,
        unknown => bail!("unknown command {unknown:?}; type `help` to see the commands"),
    };
    Ok(Some(command))
}

fn parse_id(command: &str, raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| anyhow!("`{command}` needs a numeric id, got {raw:?}"))
}

fn tab_names() -> Vec<&'static str> {
    TabKind::ALL.iter().map(|tab| tab.label()).collect()
}

/// Type-erased view of one resource screen, so commands can address the
/// screen of the active tab without knowing its record type.
trait ScreenOps {
    fn refresh(&mut self) -> Result<(), ScreenError>;
    fn search(&mut self, term: &str);
    fn create(&mut self);
    fn edit(&mut self, id: i64) -> Result<(), ScreenError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ScreenError>;
    fn submit(&mut self) -> Result<(), ScreenError>;
    fn remove(&mut self, id: i64) -> Result<(), ScreenError>;
    fn confirm(&mut self) -> Result<(), ScreenError>;
    fn cancel(&mut self) -> bool;
    fn status(&self) -> Option<&str>;
    fn render_list(&self, filter: OrderStatusFilter) -> String;
    fn render_form(&self) -> Option<String>;
    fn render_detail(&self, id: i64) -> Result<String, ScreenError>;
}

impl<R, C> ScreenOps for ResourceScreen<R, C>
where
    R: Row,
    R::Id: From<i64>,
    C: CollectionClient<R>,
{
    fn refresh(&mut self) -> Result<(), ScreenError> {
        self.enter_list()
    }

    fn search(&mut self, term: &str) {
        ResourceScreen::search(self, term);
    }

    fn create(&mut self) {
        self.enter_create();
    }

    fn edit(&mut self, id: i64) -> Result<(), ScreenError> {
        self.enter_edit_by_id(R::Id::from(id))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ScreenError> {
        self.update_draft_key(key, value)
    }

    fn submit(&mut self) -> Result<(), ScreenError> {
        ResourceScreen::submit(self)
    }

    fn remove(&mut self, id: i64) -> Result<(), ScreenError> {
        self.request_remove(R::Id::from(id))
    }

    fn confirm(&mut self) -> Result<(), ScreenError> {
        self.confirm_remove()
    }

    fn cancel(&mut self) -> bool {
        self.cancel_remove() || self.cancel_form()
    }

    fn status(&self) -> Option<&str> {
        self.state().status.as_deref()
    }

    fn render_list(&self, filter: OrderStatusFilter) -> String {
        render::list(&self.visible_items(), &self.state().search_term, filter)
    }

    fn render_form(&self) -> Option<String> {
        let draft = self.state().draft()?;
        Some(render::draft(R::KIND.singular(), self.mode(), draft))
    }

    fn render_detail(&self, id: i64) -> Result<String, ScreenError> {
        let record = self
            .state()
            .find(R::Id::from(id))
            .ok_or_else(|| ScreenError::UnknownItem {
                kind: R::KIND.singular(),
                id: id.to_string(),
            })?;
        Ok(render::detail(record))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

pub struct Shell {
    app: AppState,
    context: ScreenContext,
    source: String,
    dashboard: DashboardOptions,
    today: Date,
    order_filter: OrderStatusFilter,
    graph_view: GraphView,
    products: ResourceScreen<Product, BoxedClient<Product>>,
    notes: ResourceScreen<Note, BoxedClient<Note>>,
    budgets: ResourceScreen<Budget, BoxedClient<Budget>>,
    orders: ResourceScreen<Order, BoxedClient<Order>>,
}

impl Shell {
    pub fn new(
        collections: Collections,
        context: ScreenContext,
        source: impl Into<String>,
        dashboard: DashboardOptions,
        today: Date,
    ) -> Self {
        Self {
            app: AppState::default(),
            source: source.into(),
            dashboard,
            today,
            order_filter: OrderStatusFilter::default(),
            graph_view: GraphView::default(),
            products: ResourceScreen::new(collections.products, context.clone()),
            notes: ResourceScreen::new(collections.notes, context.clone()),
            budgets: ResourceScreen::new(collections.budgets, context.clone()),
            orders: ResourceScreen::new(collections.orders, context.clone()),
            context,
        }
    }

    pub fn active_tab(&self) -> TabKind {
        self.app.active_tab
    }

    pub fn status_line(&self) -> Option<&str> {
        self.app.status_line.as_deref()
    }

    pub fn prompt(&self) -> String {
        let user = self.context.user.as_deref().unwrap_or("anonymous");
        let mut prompt = format!("{user}@storefront [{}", self.app.active_tab.label());
        if let Some(kind) = self.app.active_tab.resource() {
            let mode = self.ops(kind).render_form().map(|_| " draft").unwrap_or("");
            prompt.push_str(mode);
        } else if self.app.active_tab == TabKind::Graphs {
            prompt.push(' ');
            prompt.push_str(self.graph_view.as_str());
        }
        if self.app.status_line.is_some() {
            prompt.push_str(" !");
        }
        prompt.push_str("]> ");
        prompt
    }

    /// Shows the start tab the same way `tab <name>` would.
    pub fn open(&mut self, tab: TabKind) -> String {
        if tab != self.app.active_tab {
            self.app.dispatch(AppCommand::SelectTab(tab));
        }
        match self.show_tab() {
            Ok(text) => text,
            Err(error) => self.fail(error),
        }
    }

    pub fn execute(&mut self, line: &str) -> Step {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Step::Continue(String::new()),
            Err(error) => return Step::Continue(self.fail(error)),
        };
        debug!(?command, tab = self.app.active_tab.label(), "shell command");

        if command == Command::Quit {
            return Step::Quit;
        }
        match self.run(command) {
            Ok(text) => {
                self.app.dispatch(AppCommand::ClearStatus);
                Step::Continue(text)
            }
            Err(error) => Step::Continue(self.fail(error)),
        }
    }

    fn fail(&mut self, error: anyhow::Error) -> String {
        let message = format!("{error:#}");
        self.app.dispatch(AppCommand::SetStatus(message.clone()));
        format!("error: {message}\n")
    }

    fn run(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Help => Ok(help_text()),
            Command::Tab(tab) => self.switch(AppCommand::SelectTab(tab)),
            Command::Next => self.switch(AppCommand::NextTab),
            Command::Prev => self.switch(AppCommand::PrevTab),
            Command::List => {
                let kind = self.resource_tab()?;
                self.ops_mut(kind).refresh()?;
                Ok(self.ops(kind).render_list(self.order_filter))
            }
            Command::Search(term) => {
                let kind = self.resource_tab()?;
                let filter = self.order_filter;
                let ops = self.ops_mut(kind);
                ops.search(&term);
                Ok(ops.render_list(filter))
            }
            Command::Filter(filter) => {
                if self.resource_tab()? != ResourceKind::Orders {
                    bail!("`filter` applies to orders -- run `tab orders` first");
                }
                self.order_filter = filter;
                Ok(self.orders_view())
            }
            Command::Suppliers => {
                self.budgets.enter_list()?;
                let names = suppliers(&self.budgets.state().items);
                let mut lines = vec![format!("suppliers: {}", names.len())];
                lines.extend(names.iter().map(|name| format!("  {name}")));
                lines.push(String::new());
                Ok(lines.join("\n"))
            }
            Command::New => {
                let kind = self.resource_tab()?;
                let ops = self.ops_mut(kind);
                ops.create();
                Ok(ops.render_form().unwrap_or_default())
            }
            Command::Edit(id) => {
                let kind = self.resource_tab()?;
                let ops = self.ops_mut(kind);
                ops.edit(id)?;
                Ok(ops.render_form().unwrap_or_default())
            }
            Command::Set { key, value } => {
                let kind = self.resource_tab()?;
                self.ops_mut(kind).set(&key, &value)?;
                Ok(String::new())
            }
            Command::Show(Some(id)) => {
                let kind = self.resource_tab()?;
                Ok(self.ops(kind).render_detail(id)?)
            }
            Command::Show(None) => {
                let kind = self.resource_tab()?;
                let ops = self.ops(kind);
                Ok(ops
                    .render_form()
                    .unwrap_or_else(|| ops.render_list(self.order_filter)))
            }
            Command::Submit => {
                let kind = self.resource_tab()?;
                self.ops_mut(kind).submit()?;
                Ok(self.status_then_list(kind))
            }
            Command::Delete(id) => {
                let kind = self.resource_tab()?;
                let ops = self.ops_mut(kind);
                ops.remove(id)?;
                Ok(format!("{}\n", ops.status().unwrap_or_default()))
            }
            Command::Confirm => {
                let kind = self.resource_tab()?;
                self.ops_mut(kind).confirm()?;
                Ok(self.status_then_list(kind))
            }
            Command::Cancel => {
                let kind = self.resource_tab()?;
                if self.ops_mut(kind).cancel() {
                    Ok("cancelled\n".to_owned())
                } else {
                    Ok("nothing to cancel\n".to_owned())
                }
            }
            Command::Dashboard => Ok(self.dashboard_view()),
            Command::Graph(view) => {
                self.graph_view = view;
                self.app.dispatch(AppCommand::SelectTab(TabKind::Graphs));
                Ok(self.graphs_view())
            }
            Command::Whoami => Ok(format!(
                "user:  {}\ntheme: {}\napi:   {}\n",
                self.context.user.as_deref().unwrap_or("anonymous"),
                self.context.theme.as_str(),
                self.source,
            )),
            Command::Quit => Ok(String::new()),
        }
    }

    fn switch(&mut self, command: AppCommand) -> Result<String> {
        let events = self.app.dispatch(command);
        if !events
            .iter()
            .any(|event| matches!(event, AppEvent::TabChanged(_)))
        {
            return Ok(format!("already on {}\n", self.app.active_tab.label()));
        }
        self.show_tab()
    }

    fn show_tab(&mut self) -> Result<String> {
        match self.app.active_tab.resource() {
            Some(kind) => {
                self.ops_mut(kind).refresh()?;
                Ok(self.ops(kind).render_list(self.order_filter))
            }
            None if self.app.active_tab == TabKind::Graphs => Ok(self.graphs_view()),
            None => Ok(self.dashboard_view()),
        }
    }

    fn resource_tab(&self) -> Result<ResourceKind> {
        self.app.active_tab.resource().ok_or_else(|| {
            anyhow!(
                "the {} tab has no records -- switch with `tab <products|notes|budgets|orders>`",
                self.app.active_tab.label()
            )
        })
    }

    fn ops(&self, kind: ResourceKind) -> &dyn ScreenOps {
        match kind {
            ResourceKind::Products => &self.products,
            ResourceKind::Notes => &self.notes,
            ResourceKind::Budgets => &self.budgets,
            ResourceKind::Orders => &self.orders,
        }
    }

    fn ops_mut(&mut self, kind: ResourceKind) -> &mut dyn ScreenOps {
        match kind {
            ResourceKind::Products => &mut self.products,
            ResourceKind::Notes => &mut self.notes,
            ResourceKind::Budgets => &mut self.budgets,
            ResourceKind::Orders => &mut self.orders,
        }
    }

    fn status_then_list(&self, kind: ResourceKind) -> String {
        let ops = self.ops(kind);
        let mut out = String::new();
        if let Some(status) = ops.status() {
            out.push_str(status);
            out.push('\n');
        }
        out.push_str(&ops.render_list(self.order_filter));
        out
    }

    fn orders_view(&self) -> String {
        format!(
            "filter: {}\n{}",
            self.order_filter.as_str(),
            self.orders.render_list(self.order_filter)
        )
    }

    /// Reloads `kinds`, returning one warning line per failed collection.
    fn refresh_all(&mut self, kinds: &[ResourceKind]) -> String {
        kinds
            .iter()
            .filter_map(|kind| {
                self.ops_mut(*kind)
                    .refresh()
                    .err()
                    .map(|error| format!("warning: {}: {error}\n", kind.as_str()))
            })
            .collect()
    }

    /// Refreshes every collection, then summarizes whatever loaded.
    fn dashboard_view(&mut self) -> String {
        let mut out = self.refresh_all(&ResourceKind::ALL);
        let snapshot = DashboardSnapshot::build(
            &self.products.state().items,
            &self.notes.state().items,
            &self.budgets.state().items,
            &self.orders.state().items,
            self.today,
            self.dashboard,
        );
        out.push_str(&render::dashboard(&snapshot));
        out
    }

    fn graphs_view(&mut self) -> String {
        let mut out = self.refresh_all(&[
            ResourceKind::Notes,
            ResourceKind::Budgets,
            ResourceKind::Orders,
        ]);
        let report = GraphsReport::build(
            &self.notes.state().items,
            &self.budgets.state().items,
            &self.orders.state().items,
        );
        out.push_str(&render::graphs(self.graph_view, &report));
        out
    }
}

/// Reads commands line by line until `quit` or end of input.
pub fn run_shell<I: BufRead, W: Write>(
    shell: &mut Shell,
    start_tab: TabKind,
    input: I,
    mut output: W,
) -> Result<()> {
    output
        .write_all(shell.open(start_tab).as_bytes())
        .context("write to stdout")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", shell.prompt()).context("write to stdout")?;
        output.flush().context("flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command from stdin")?;
        match shell.execute(&line) {
            Step::Continue(text) => output.write_all(text.as_bytes()).context("write to stdout")?,
            Step::Quit => break,
        }
    }
    writeln!(output).context("write to stdout")?;
    Ok(())
}

fn help_text() -> String {
    [
        "commands:",
        "  tab <name>                                      switch tab (dashboard, products,",
        "                                                  notes, budgets, orders, graphs)",
        "  next | prev                                     cycle tabs",
        "  list                                            reload the active tab",
        "  search <term>                                   filter by name (empty clears)",
        "  filter <all|awaiting|delivered>                 filter orders by status",
        "  suppliers                                       list budget suppliers",
        "  new | edit <id>                                 open a draft",
        "  set <key> <value>                               change a draft field",
        "  show [id]                                       show the draft, the list or one record",
        "  submit                                          save the draft",
        "  delete <id> then confirm | cancel               remove a record",
        "  cancel                                          drop the draft",
        "  dashboard                                       shop summary",
        "  graph <vendas|clientes|financeiro>              switch the graphs view",
        "  whoami                                          session info",
        "  quit | exit                                     leave",
        "",
    ]
    .join("\n")
}
