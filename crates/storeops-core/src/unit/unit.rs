//! Store units and the company-wide unit registry.

use crate::cart::Cart;
use crate::error::RetailError;
use crate::ids::{EmployeeId, InventoryCode, UnitCode};
use crate::inventory::Inventory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Geographic coordinates of a store unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// One physical store: its inventory, assigned staff and sale history.
///
/// Units are deactivated, never deleted, so their sale history remains
/// reportable.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreUnit {
    pub code: UnitCode,
    pub name: String,
    pub location: Location,
    pub inventory: Inventory,
    pub staff: Vec<EmployeeId>,
    pub sales: Vec<Cart>,
    pub active: bool,
}

impl StoreUnit {
    /// Create an active unit with an empty inventory.
    pub fn new(code: UnitCode, name: impl Into<String>, location: Location) -> Self {
        let inventory_code = InventoryCode::new(format!("INV-{}", code));
        Self {
            code,
            name: name.into(),
            location,
            inventory: Inventory::new(inventory_code),
            staff: Vec::new(),
            sales: Vec::new(),
            active: true,
        }
    }

    /// Append a finalized sale to this unit's history.
    pub fn record_sale(&mut self, sale: Cart) -> Result<(), RetailError> {
        if !self.active {
            return Err(RetailError::UnitInactive(self.code.to_string()));
        }
        if !sale.is_finalized() {
            return Err(RetailError::Validation(format!(
                "sale {} is not finalized",
                sale.id
            )));
        }
        self.sales.push(sale);
        Ok(())
    }

    /// Assign an employee to this unit. Re-assigning is a no-op.
    pub fn assign_staff(&mut self, id: EmployeeId) {
        if !self.staff.contains(&id) {
            self.staff.push(id);
        }
    }

    /// Remove an employee from this unit's roster.
    pub fn unassign_staff(&mut self, id: &EmployeeId) -> bool {
        let before = self.staff.len();
        self.staff.retain(|e| e != id);
        self.staff.len() < before
    }

    fn apply(&mut self, update: UnitUpdate) {
        match update {
            UnitUpdate::Name(name) => self.name = name,
            UnitUpdate::Location(location) => self.location = location,
        }
    }
}

/// A single field change to a store unit.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitUpdate {
    Name(String),
    Location(Location),
}

impl fmt::Display for StoreUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({:.4}, {:.4})",
            self.code, self.name, self.location.latitude, self.location.longitude
        )?;
        if !self.active {
            write!(f, " [inactive]")?;
        }
        Ok(())
    }
}

/// All store units, keyed by unit code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitRegistry {
    units: BTreeMap<UnitCode, StoreUnit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit; the code must be unused and the name non-blank.
    pub fn add(&mut self, unit: StoreUnit) -> Result<(), RetailError> {
        if unit.name.trim().is_empty() {
            return Err(RetailError::Validation("unit name is blank".into()));
        }
        if self.units.contains_key(&unit.code) {
            return Err(RetailError::UnitAlreadyExists(unit.code.to_string()));
        }
        self.units.insert(unit.code.clone(), unit);
        Ok(())
    }

    pub fn get(&self, code: &UnitCode) -> Result<&StoreUnit, RetailError> {
        self.units
            .get(code)
            .ok_or_else(|| RetailError::UnitNotFound(code.to_string()))
    }

    pub fn get_mut(&mut self, code: &UnitCode) -> Result<&mut StoreUnit, RetailError> {
        self.units
            .get_mut(code)
            .ok_or_else(|| RetailError::UnitNotFound(code.to_string()))
    }

    /// Soft-deactivate a unit; deactivating twice is an error.
    pub fn deactivate(&mut self, code: &UnitCode) -> Result<(), RetailError> {
        let unit = self.get_mut(code)?;
        if !unit.active {
            return Err(RetailError::UnitInactive(code.to_string()));
        }
        unit.active = false;
        Ok(())
    }

    /// Apply field changes to an active unit. Deactivated units are
    /// frozen and cannot be edited.
    pub fn update(
        &mut self,
        code: &UnitCode,
        updates: Vec<UnitUpdate>,
    ) -> Result<&StoreUnit, RetailError> {
        let unit = self
            .units
            .get_mut(code)
            .ok_or_else(|| RetailError::UnitNotFound(code.to_string()))?;
        if !unit.active {
            return Err(RetailError::UnitInactive(code.to_string()));
        }
        for update in updates {
            unit.apply(update);
        }
        Ok(unit)
    }

    /// List units, optionally keeping deactivated ones.
    pub fn list(&self, include_inactive: bool) -> Vec<&StoreUnit> {
        self.units
            .values()
            .filter(|u| include_inactive || u.active)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
