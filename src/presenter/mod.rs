//! Presenter
//!
//! Turns a [`ContractView`] and a [`NavHistory`] into what the dashboard
//! shows. [`Overview::build`] selects and formats the values; [`page`]
//! renders them as HTML and the JSON route serializes them as-is.
//!
//! Two read-only slices of the history are shown:
//! - the chart window (default 90 records), chronological
//! - the table window (default 30 records), newest first

pub mod chart;
pub mod format;
pub mod page;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::chain::{ChainResult, ContractAddress, ContractView};
use crate::config::{ChainConfig, DashboardConfig};
use crate::history::{NavHistory, NavRecord, ParsedDate};
use chart::ChartPoint;
use format::{format_nav, format_supply};

/// Layout settings for a render
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    pub title: String,
    pub chart_window: usize,
    pub table_window: usize,
    pub explorer_url: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default(), &ChainConfig::default())
    }
}

impl PresenterConfig {
    pub fn from_config(dashboard: &DashboardConfig, chain: &ChainConfig) -> Self {
        Self {
            title: dashboard.title.clone(),
            chart_window: dashboard.chart_window,
            table_window: dashboard.table_window,
            explorer_url: chain.explorer_url.trim_end_matches('/').to_string(),
        }
    }

    /// Explorer page for a contract
    pub fn explorer_link(&self, contract: &ContractAddress) -> String {
        format!("{}/address/{}", self.explorer_url, contract)
    }
}

/// One history row as shown on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub date: Option<NaiveDate>,
    /// Original cell text when the date could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_date: Option<String>,
    pub nav: Option<Decimal>,
    pub daily_return: Option<Decimal>,
}

impl From<&NavRecord> for HistoryRow {
    fn from(record: &NavRecord) -> Self {
        let raw_date = match &record.date {
            ParsedDate::Missing { raw } => Some(raw.clone()),
            ParsedDate::Valid(_) => None,
        };

        Self {
            date: record.date.date(),
            raw_date,
            nav: record.nav,
            daily_return: record.daily_return,
        }
    }
}

/// Everything a single dashboard render shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub title: String,
    pub name: String,
    pub symbol: String,
    pub contract: String,
    pub explorer_link: String,
    /// Block the on-chain values were read at, when pinned
    pub block: Option<u64>,
    pub nav: Decimal,
    pub nav_display: String,
    /// Raw 18-decimal total supply, as a decimal string
    pub total_supply_raw: String,
    pub total_supply_display: String,
    /// Chart window, oldest first
    pub chart: Vec<HistoryRow>,
    /// Table window, newest first
    pub table: Vec<HistoryRow>,
    pub history_rows: usize,
    /// Rows dropped for having an unparseable date
    pub excluded_undated: usize,
}

impl Overview {
    pub fn build(
        view: &ContractView,
        history: &NavHistory,
        contract: &ContractAddress,
        excluded_undated: usize,
        config: &PresenterConfig,
    ) -> ChainResult<Self> {
        let nav = view.nav()?;

        Ok(Self {
            title: config.title.clone(),
            name: view.name.clone(),
            symbol: view.symbol.clone(),
            contract: contract.checksummed(),
            explorer_link: config.explorer_link(contract),
            block: view.block,
            nav,
            nav_display: format_nav(nav),
            total_supply_raw: view.total_supply_raw.to_string(),
            total_supply_display: format_supply(view.total_supply_whole(), &view.symbol),
            chart: history
                .tail(config.chart_window)
                .iter()
                .map(HistoryRow::from)
                .collect(),
            table: history
                .tail_descending(config.table_window)
                .into_iter()
                .map(HistoryRow::from)
                .collect(),
            history_rows: history.len(),
            excluded_undated,
        })
    }

    /// Chart window rows that have both a date and a NAV
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.chart
            .iter()
            .filter_map(|row| {
                Some(ChartPoint {
                    date: row.date?,
                    nav: row.nav?.to_f64()?,
                })
            })
            .collect()
    }
}
