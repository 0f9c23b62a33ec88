//! Per-unit activity reports over a date range.

use super::unit::StoreUnit;
use crate::error::RetailError;
use crate::ids::{EmployeeId, SaleId};
use crate::money::Money;
use crate::staff::StaffDirectory;
use chrono::NaiveDate;
use serde::Serialize;

/// A validated, inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    /// Build a period, rejecting inverted ranges and future starts.
    pub fn new(from: NaiveDate, to: NaiveDate, today: NaiveDate) -> Result<Self, RetailError> {
        if from > to {
            return Err(RetailError::InvalidPeriod(format!(
                "start {} is after end {}",
                from.format("%Y/%m/%d"),
                to.format("%Y/%m/%d")
            )));
        }
        if from > today {
            return Err(RetailError::InvalidPeriod(format!(
                "start {} is in the future",
                from.format("%Y/%m/%d")
            )));
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// One finalized sale inside the report window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleSummary {
    pub id: SaleId,
    pub date: NaiveDate,
    pub cashier: Option<EmployeeId>,
    pub items: u64,
    pub total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StaffEventKind {
    Hired,
    Terminated,
}

/// A hire or termination of an employee assigned to the unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffEvent {
    pub kind: StaffEventKind,
    pub employee: EmployeeId,
    pub name: String,
    pub date: NaiveDate,
}

/// Everything that happened at one unit during a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitReport {
    pub sales: Vec<SaleSummary>,
    pub revenue: Money,
    pub staff_events: Vec<StaffEvent>,
}

impl UnitReport {
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty() && self.staff_events.is_empty()
    }
}

/// Report a unit's sales and staff movement inside a period.
///
/// Sales without a finalization date are still open and skipped, as are
/// staff ids the directory can no longer resolve. A period with no
/// activity yields an empty report, not an error.
pub fn unit_report(
    unit: &StoreUnit,
    staff: &StaffDirectory,
    period: ReportPeriod,
) -> Result<UnitReport, RetailError> {
    let mut sales = Vec::new();
    let mut totals = Vec::new();
    for sale in &unit.sales {
        let Some(date) = sale.finalized_on else {
            continue;
        };
        if !period.contains(date) {
            continue;
        }
        let total = sale.total.unwrap_or_default();
        totals.push(total);
        sales.push(SaleSummary {
            id: sale.id.clone(),
            date,
            cashier: sale.cashier.clone(),
            items: sale.item_count(),
            total,
        });
    }
    let revenue = Money::try_sum(totals, Default::default())?;

    let mut staff_events = Vec::new();
    for id in &unit.staff {
        let Ok(employee) = staff.get(id) else {
            continue;
        };
        if period.contains(employee.hired_on) {
            staff_events.push(StaffEvent {
                kind: StaffEventKind::Hired,
                employee: employee.id.clone(),
                name: employee.name.clone(),
                date: employee.hired_on,
            });
        }
        if let Some(date) = employee.terminated_on {
            if period.contains(date) {
                staff_events.push(StaffEvent {
                    kind: StaffEventKind::Terminated,
                    employee: employee.id.clone(),
                    name: employee.name.clone(),
                    date,
                });
            }
        }
    }
    staff_events.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(UnitReport {
        sales,
        revenue,
        staff_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::unit::Location;
    use crate::catalog::{Catalog, Product};
    use crate::cart::Cart;
    use crate::ids::{ProductCode, UnitCode};
    use crate::money::Currency;
    use crate::staff::Employee;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 30)
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .register(Product::new(
                ProductCode::new("4006381333931"),
                "Pen",
                "Stabilo",
                "stationery",
                0.02,
                Money::new(599, Currency::BRL),
            ))
            .unwrap();
        catalog
    }

    fn unit_with_sales() -> (StoreUnit, StaffDirectory) {
        let mut unit = StoreUnit::new(
            UnitCode::new("U1"),
            "Centro",
            Location {
                latitude: -23.55,
                longitude: -46.63,
            },
        );
        let catalog = catalog();

        let mut staff = StaffDirectory::new();
        staff
            .hire(Employee::new(
                EmployeeId::new("E1"),
                "Maria Silva",
                "cashier",
                date(2024, 3, 1),
            ))
            .unwrap();
        unit.assign_staff(EmployeeId::new("E1"));

        let mut sale = Cart::new(SaleId::new("S1"));
        sale.add_line(ProductCode::new("4006381333931"), 2).unwrap();
        sale.finalize(&catalog, date(2024, 3, 10), Some(EmployeeId::new("E1")))
            .unwrap();
        unit.record_sale(sale).unwrap();

        let mut late = Cart::new(SaleId::new("S2"));
        late.add_line(ProductCode::new("4006381333931"), 1).unwrap();
        late.finalize(&catalog, date(2024, 5, 2), Some(EmployeeId::new("E1")))
            .unwrap();
        unit.record_sale(late).unwrap();

        (unit, staff)
    }

    #[test]
    fn test_period_validation() {
        assert!(ReportPeriod::new(date(2024, 3, 1), date(2024, 2, 1), today()).is_err());
        assert!(ReportPeriod::new(date(2024, 7, 1), date(2024, 7, 2), today()).is_err());
        assert!(ReportPeriod::new(date(2024, 3, 1), date(2024, 3, 31), today()).is_ok());
    }

    #[test]
    fn test_report_filters_by_period() {
        let (unit, staff) = unit_with_sales();
        let period = ReportPeriod::new(date(2024, 3, 1), date(2024, 3, 31), today()).unwrap();

        let report = unit_report(&unit, &staff, period).unwrap();
        assert_eq!(report.sales.len(), 1);
        assert_eq!(report.sales[0].id, SaleId::new("S1"));
        assert_eq!(report.revenue, Money::new(1198, Currency::BRL));

        // E1 was hired inside the window.
        assert_eq!(report.staff_events.len(), 1);
        assert_eq!(report.staff_events[0].kind, StaffEventKind::Hired);
    }

    #[test]
    fn test_empty_period_is_ok() {
        let (unit, staff) = unit_with_sales();
        let period = ReportPeriod::new(date(2023, 1, 1), date(2023, 1, 31), today()).unwrap();

        let report = unit_report(&unit, &staff, period).unwrap();
        assert!(report.is_empty());
        assert!(report.revenue.is_zero());
    }

    #[test]
    fn test_unresolved_staff_id_skipped() {
        let (mut unit, staff) = unit_with_sales();
        unit.assign_staff(EmployeeId::new("GHOST"));
        let period = ReportPeriod::new(date(2024, 1, 1), date(2024, 6, 1), today()).unwrap();

        let report = unit_report(&unit, &staff, period).unwrap();
        assert!(report
            .staff_events
            .iter()
            .all(|e| e.employee != EmployeeId::new("GHOST")));
    }

    #[test]
    fn test_termination_event_reported() {
        let (unit, mut staff) = unit_with_sales();
        staff
            .terminate(&EmployeeId::new("E1"), date(2024, 4, 15))
            .unwrap();
        let period = ReportPeriod::new(date(2024, 4, 1), date(2024, 4, 30), today()).unwrap();

        let report = unit_report(&unit, &staff, period).unwrap();
        assert_eq!(report.staff_events.len(), 1);
        assert_eq!(report.staff_events[0].kind, StaffEventKind::Terminated);
        assert_eq!(report.staff_events[0].date, date(2024, 4, 15));
    }
}
