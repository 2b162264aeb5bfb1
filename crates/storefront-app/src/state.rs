// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Dashboard,
    Products,
    Notes,
    Budgets,
    Orders,
    Graphs,
}

impl TabKind {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Products,
        Self::Notes,
        Self::Budgets,
        Self::Orders,
        Self::Graphs,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Notes => "notes",
            Self::Budgets => "budgets",
            Self::Orders => "orders",
            Self::Graphs => "graphs",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.label() == value)
    }

    pub const fn resource(self) -> Option<ResourceKind> {
        match self {
            Self::Dashboard | Self::Graphs => None,
            Self::Products => Some(ResourceKind::Products),
            Self::Notes => Some(ResourceKind::Notes),
            Self::Budgets => Some(ResourceKind::Budgets),
            Self::Orders => Some(ResourceKind::Orders),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_tab: TabKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: TabKind::Dashboard,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(TabKind),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(TabKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(tab) => {
                if tab == self.active_tab {
                    return Vec::new();
                }
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
