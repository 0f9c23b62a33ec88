//! Store units, the unit registry and period reports.

mod report;
mod unit;

pub use report::{
    unit_report, ReportPeriod, SaleSummary, StaffEvent, StaffEventKind, UnitReport,
};
pub use unit::{Location, StoreUnit, UnitRegistry, UnitUpdate};
