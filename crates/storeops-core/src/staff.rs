//! Employees and the staff directory.

use crate::error::RetailError;
use crate::ids::EmployeeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A store employee.
///
/// Termination is soft: the record stays in the directory with a
/// termination date so sales history keeps resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    #[serde(with = "crate::dates")]
    pub hired_on: NaiveDate,
    #[serde(with = "crate::dates::optional")]
    pub terminated_on: Option<NaiveDate>,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        role: impl Into<String>,
        hired_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
            hired_on,
            terminated_on: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.terminated_on.is_none()
    }

    fn apply(&mut self, update: EmployeeUpdate) {
        match update {
            EmployeeUpdate::Name(name) => self.name = name,
            EmployeeUpdate::Role(role) => self.role = role,
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.id, self.name, self.role)?;
        if let Some(date) = self.terminated_on {
            write!(f, " [terminated {}]", date.format("%Y/%m/%d"))?;
        }
        Ok(())
    }
}

/// A single field change to an employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeUpdate {
    Name(String),
    Role(String),
}

/// All employees across the company, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffDirectory {
    employees: BTreeMap<EmployeeId, Employee>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new employee; the id must be unused and the name non-blank.
    pub fn hire(&mut self, employee: Employee) -> Result<(), RetailError> {
        if employee.name.trim().is_empty() {
            return Err(RetailError::Validation("employee name is blank".into()));
        }
        if self.employees.contains_key(&employee.id) {
            return Err(RetailError::EmployeeAlreadyExists(employee.id.to_string()));
        }
        self.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Look an employee up by id, active or not.
    pub fn get(&self, id: &EmployeeId) -> Result<&Employee, RetailError> {
        self.employees
            .get(id)
            .ok_or_else(|| RetailError::EmployeeNotFound(id.to_string()))
    }

    /// Look an employee up only if still active.
    pub fn get_active(&self, id: &EmployeeId) -> Result<&Employee, RetailError> {
        let employee = self.get(id)?;
        if !employee.is_active() {
            return Err(RetailError::AlreadyTerminated(id.to_string()));
        }
        Ok(employee)
    }

    /// Case-insensitive substring search over employee names.
    pub fn search_by_name(&self, text: &str, include_inactive: bool) -> Vec<&Employee> {
        let needle = text.to_lowercase();
        self.employees
            .values()
            .filter(|e| include_inactive || e.is_active())
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// List employees, optionally keeping terminated ones.
    pub fn list(&self, include_inactive: bool) -> Vec<&Employee> {
        self.employees
            .values()
            .filter(|e| include_inactive || e.is_active())
            .collect()
    }

    /// Mark an employee terminated as of the given date.
    pub fn terminate(&mut self, id: &EmployeeId, date: NaiveDate) -> Result<(), RetailError> {
        let employee = self
            .employees
            .get_mut(id)
            .ok_or_else(|| RetailError::EmployeeNotFound(id.to_string()))?;
        if !employee.is_active() {
            return Err(RetailError::AlreadyTerminated(id.to_string()));
        }
        employee.terminated_on = Some(date);
        Ok(())
    }

    /// Apply field updates to an employee record.
    pub fn update(
        &mut self,
        id: &EmployeeId,
        updates: Vec<EmployeeUpdate>,
    ) -> Result<&Employee, RetailError> {
        let employee = self
            .employees
            .get_mut(id)
            .ok_or_else(|| RetailError::EmployeeNotFound(id.to_string()))?;
        for update in updates {
            employee.apply(update);
        }
        Ok(employee)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn directory() -> StaffDirectory {
        let mut staff = StaffDirectory::new();
        staff
            .hire(Employee::new(
                EmployeeId::new("E1"),
                "Maria Silva",
                "cashier",
                date(2023, 1, 10),
            ))
            .unwrap();
        staff
            .hire(Employee::new(
                EmployeeId::new("E2"),
                "Joao Souza",
                "manager",
                date(2022, 6, 1),
            ))
            .unwrap();
        staff
    }

    #[test]
    fn test_hire_duplicate_id_rejected() {
        let mut staff = directory();
        let result = staff.hire(Employee::new(
            EmployeeId::new("E1"),
            "Other",
            "cashier",
            date(2024, 1, 1),
        ));
        assert!(matches!(result, Err(RetailError::EmployeeAlreadyExists(_))));
    }

    #[test]
    fn test_terminate_is_soft() {
        let mut staff = directory();
        staff.terminate(&EmployeeId::new("E1"), date(2024, 2, 1)).unwrap();

        // Record survives with a termination date.
        let employee = staff.get(&EmployeeId::new("E1")).unwrap();
        assert!(!employee.is_active());
        assert_eq!(employee.terminated_on, Some(date(2024, 2, 1)));

        let result = staff.terminate(&EmployeeId::new("E1"), date(2024, 3, 1));
        assert!(matches!(result, Err(RetailError::AlreadyTerminated(_))));
    }

    #[test]
    fn test_get_active_filters_terminated() {
        let mut staff = directory();
        staff.terminate(&EmployeeId::new("E1"), date(2024, 2, 1)).unwrap();

        assert!(staff.get(&EmployeeId::new("E1")).is_ok());
        assert!(matches!(
            staff.get_active(&EmployeeId::new("E1")),
            Err(RetailError::AlreadyTerminated(_))
        ));
    }

    #[test]
    fn test_search_by_name_case_insensitive() {
        let staff = directory();
        let hits = staff.search_by_name("silva", false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, EmployeeId::new("E1"));
        assert!(staff.search_by_name("nobody", false).is_empty());
    }

    #[test]
    fn test_search_skips_terminated_unless_asked() {
        let mut staff = directory();
        staff.terminate(&EmployeeId::new("E1"), date(2024, 2, 1)).unwrap();
        assert!(staff.search_by_name("silva", false).is_empty());
        assert_eq!(staff.search_by_name("silva", true).len(), 1);
    }

    #[test]
    fn test_hire_blank_name_rejected() {
        let mut staff = directory();
        let result = staff.hire(Employee::new(
            EmployeeId::new("E9"),
            "  ",
            "cashier",
            date(2024, 1, 1),
        ));
        assert!(matches!(result, Err(RetailError::Validation(_))));
    }

    #[test]
    fn test_list_filters_inactive() {
        let mut staff = directory();
        staff.terminate(&EmployeeId::new("E1"), date(2024, 2, 1)).unwrap();
        assert_eq!(staff.list(false).len(), 1);
        assert_eq!(staff.list(true).len(), 2);
    }

    #[test]
    fn test_update_applies_fields() {
        let mut staff = directory();
        let employee = staff
            .update(
                &EmployeeId::new("E1"),
                vec![
                    EmployeeUpdate::Role("supervisor".into()),
                    EmployeeUpdate::Name("Maria S. Costa".into()),
                ],
            )
            .unwrap();
        assert_eq!(employee.role, "supervisor");
        assert_eq!(employee.name, "Maria S. Costa");
    }
}
