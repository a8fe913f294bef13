use std::{collections::HashSet, fmt::Debug};

use bobiare_common::Pesos;
use chrono::{Datelike, Duration, Months, NaiveDate};
use log::*;

use crate::{
    db_types::OrderStatusType,
    helpers::{format_long_date_es, month_name_es, weekday_name_es},
    shop_api::{
        admin_fixtures::{sample_deliveries, sample_orders},
        admin_objects::{AdminDashboard, AdminOrder, Calendar, CalendarDay, CalendarView, Delivery, OrderQuery},
    },
};

/// Number of rows in the dashboard's recent orders and upcoming deliveries panels
pub const DASHBOARD_PANEL_SIZE: usize = 4;
/// Deliveries shown inside a month cell before collapsing into "+N más"
pub const MONTH_CELL_PREVIEW: usize = 2;

/// `AdminApi` serves the back-office pages: the dashboard, the orders table and the delivery calendar.
pub struct AdminApi {
    orders: Vec<AdminOrder>,
    deliveries: Vec<Delivery>,
}

impl Debug for AdminApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdminApi ({} orders, {} deliveries)", self.orders.len(), self.deliveries.len())
    }
}

impl Default for AdminApi {
    fn default() -> Self {
        Self::new(sample_orders(), sample_deliveries())
    }
}

impl AdminApi {
    pub fn new(orders: Vec<AdminOrder>, deliveries: Vec<Delivery>) -> Self {
        Self { orders, deliveries }
    }

    pub fn dashboard(&self) -> AdminDashboard {
        let pending_orders = self
            .orders
            .iter()
            .filter(|o| matches!(o.status, OrderStatusType::Pending | OrderStatusType::Processing))
            .count();
        let revenue =
            self.orders.iter().filter(|o| o.status != OrderStatusType::Cancelled).map(|o| o.total).sum::<Pesos>();
        let customers = self.orders.iter().map(|o| o.email.to_lowercase()).collect::<HashSet<_>>().len();
        let mut recent_orders = self.orders.clone();
        recent_orders.sort_by(|a, b| b.date.cmp(&a.date));
        recent_orders.truncate(DASHBOARD_PANEL_SIZE);
        let mut upcoming_deliveries = self.deliveries.clone();
        upcoming_deliveries.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        upcoming_deliveries.truncate(DASHBOARD_PANEL_SIZE);
        AdminDashboard {
            total_orders: self.orders.len(),
            pending_orders,
            revenue,
            customers,
            recent_orders,
            upcoming_deliveries,
        }
    }

    /// The orders table, filtered and sorted according to `query`. Without a sort field the orders keep their
    /// natural order.
    pub fn orders(&self, query: &OrderQuery) -> Vec<AdminOrder> {
        let mut orders = self.orders.iter().filter(|o| query.matches(o)).cloned().collect::<Vec<_>>();
        orders.sort_by(|a, b| query.sort.compare(a, b));
        trace!("💻️ {} of {} orders match {query:?}", orders.len(), self.orders.len());
        orders
    }

    /// Deliveries on exactly `date`, earliest first
    pub fn deliveries_on(&self, date: NaiveDate) -> Vec<Delivery> {
        let mut result = self.deliveries.iter().filter(|d| d.date == date).cloned().collect::<Vec<_>>();
        result.sort_by(|a, b| a.time.cmp(&b.time));
        result
    }

    /// The calendar page for `view` around `date`, after moving `step` periods forward (or back, when negative).
    pub fn calendar(&self, view: CalendarView, date: NaiveDate, step: i32) -> Calendar {
        let date = step_date(view, date, step);
        let (title, cells) = match view {
            CalendarView::Month => {
                let first = date.with_day(1).unwrap_or(date);
                let padding = first.weekday().num_days_from_sunday() as usize;
                let mut cells = vec![None; padding];
                cells.extend(month_days(first).map(|d| Some(self.calendar_day(d, Some(MONTH_CELL_PREVIEW)))));
                (format!("{} de {}", month_name_es(date.month()), date.year()), cells)
            },
            CalendarView::Week => {
                let start = week_start(date);
                let cells = (0..7).map(|i| Some(self.calendar_day(start + Duration::days(i), None))).collect();
                (format!("Semana del {}", format_long_date_es(start)), cells)
            },
            CalendarView::Day => {
                let title = format!("{}, {}", weekday_name_es(date), format_long_date_es(date));
                (title, vec![Some(self.calendar_day(date, None))])
            },
        };
        Calendar { view, date, title, cells }
    }

    fn calendar_day(&self, date: NaiveDate, preview: Option<usize>) -> CalendarDay {
        let mut deliveries = self.deliveries_on(date);
        let mut more = 0;
        if let Some(limit) = preview {
            more = deliveries.len().saturating_sub(limit);
            deliveries.truncate(limit);
        }
        let day_name = weekday_name_es(date).chars().take(3).collect();
        CalendarDay { date, day: date.day(), day_name, deliveries, more }
    }
}

/// Moves `date` by `step` months, weeks or days. Moving by months keeps the day of the month where possible and
/// clamps to the last day of shorter months.
pub fn step_date(view: CalendarView, date: NaiveDate, step: i32) -> NaiveDate {
    let moved = match view {
        CalendarView::Month if step >= 0 => date.checked_add_months(Months::new(step.unsigned_abs())),
        CalendarView::Month => date.checked_sub_months(Months::new(step.unsigned_abs())),
        CalendarView::Week => date.checked_add_signed(Duration::weeks(i64::from(step))),
        CalendarView::Day => date.checked_add_signed(Duration::days(i64::from(step))),
    };
    moved.unwrap_or_else(|| {
        warn!("💻️ Cannot move {date} by {step} {view} steps. Staying put");
        date
    })
}

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn month_days(first: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let month = first.month();
    first.iter_days().take_while(move |d| d.month() == month)
}
