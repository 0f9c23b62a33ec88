//! Dataset directory loading and saving.

use crate::error::DataError;
use crate::records::{
    UnitRecord, EMPLOYEES_FILE, INVENTORIES_FILE, PRODUCTS_FILE, SALES_FILE, UNITS_FILE,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use storeops_core::cart::Cart;
use storeops_core::catalog::{Catalog, Product};
use storeops_core::ids::{EmployeeId, InventoryCode, ProductCode, SaleId, UnitCode};
use storeops_core::inventory::{Inventory, InventorySnapshot};
use storeops_core::staff::{Employee, StaffDirectory};
use storeops_core::unit::{StoreUnit, UnitRegistry};
use tracing::{debug, info};

/// Everything the application operates on, rebuilt from one dataset
/// directory.
#[derive(Debug, Default)]
pub struct Dataset {
    pub catalog: Catalog,
    pub staff: StaffDirectory,
    pub units: UnitRegistry,
}

/// A dataset directory of five JSON files.
///
/// Collections load in dependency order (products, employees,
/// inventories, sales, units) so every cross-reference can be resolved
/// as it is encountered; any dangling reference fails the whole load.
/// Missing files load as empty collections.
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the full dataset from disk.
    pub fn load(&self) -> Result<Dataset, DataError> {
        let products: BTreeMap<ProductCode, Product> = self.read_map(PRODUCTS_FILE)?;
        let mut catalog = Catalog::new();
        for product in products.into_values() {
            catalog.register(product)?;
        }
        debug!(count = catalog.len(), "loaded product catalog");

        let employees: BTreeMap<EmployeeId, Employee> = self.read_map(EMPLOYEES_FILE)?;
        let mut staff = StaffDirectory::new();
        for employee in employees.into_values() {
            staff.hire(employee)?;
        }
        debug!(count = staff.len(), "loaded staff directory");

        let mut snapshots: BTreeMap<InventoryCode, InventorySnapshot> =
            self.read_map(INVENTORIES_FILE)?;
        let mut sales: BTreeMap<SaleId, Cart> = self.read_map(SALES_FILE)?;
        let unit_records: BTreeMap<UnitCode, UnitRecord> = self.read_map(UNITS_FILE)?;

        let mut units = UnitRegistry::new();
        for record in unit_records.into_values() {
            let snapshot =
                snapshots
                    .remove(&record.inventory)
                    .ok_or_else(|| DataError::UnknownInventory {
                        unit: record.code.to_string(),
                        inventory: record.inventory.to_string(),
                    })?;
            let inventory = Inventory::from_snapshot(snapshot, &catalog)?;

            for id in &record.staff {
                if staff.get(id).is_err() {
                    return Err(DataError::UnknownEmployee {
                        unit: record.code.to_string(),
                        employee: id.to_string(),
                    });
                }
            }

            let mut unit_sales = Vec::with_capacity(record.sales.len());
            for id in &record.sales {
                let sale = sales.remove(id).ok_or_else(|| DataError::UnknownSale {
                    unit: record.code.to_string(),
                    sale: id.to_string(),
                })?;
                unit_sales.push(sale);
            }

            let mut unit = StoreUnit::new(record.code, record.name, record.location);
            unit.inventory = inventory;
            unit.staff = record.staff;
            unit.sales = unit_sales;
            unit.active = record.active;
            units.add(unit)?;
        }

        info!(
            products = catalog.len(),
            employees = staff.len(),
            units = units.len(),
            "dataset loaded"
        );
        Ok(Dataset {
            catalog,
            staff,
            units,
        })
    }

    /// Write the full dataset back to disk, pretty-printed.
    pub fn save(&self, dataset: &Dataset) -> Result<(), DataError> {
        fs::create_dir_all(&self.dir).map_err(|source| DataError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let products: BTreeMap<&ProductCode, &Product> =
            dataset.catalog.iter().map(|p| (&p.code, p)).collect();
        self.write_map(PRODUCTS_FILE, &products)?;

        let employees: BTreeMap<&EmployeeId, &Employee> =
            dataset.staff.iter().map(|e| (&e.id, e)).collect();
        self.write_map(EMPLOYEES_FILE, &employees)?;

        let mut snapshots: BTreeMap<InventoryCode, InventorySnapshot> = BTreeMap::new();
        let mut sales: BTreeMap<&SaleId, &Cart> = BTreeMap::new();
        let mut unit_records: BTreeMap<&UnitCode, UnitRecord> = BTreeMap::new();
        for unit in dataset.units.iter() {
            let snapshot = unit.inventory.to_snapshot();
            snapshots.insert(snapshot.code.clone(), snapshot);
            for sale in &unit.sales {
                sales.insert(&sale.id, sale);
            }
            unit_records.insert(&unit.code, UnitRecord::from_unit(unit));
        }
        self.write_map(INVENTORIES_FILE, &snapshots)?;
        self.write_map(SALES_FILE, &sales)?;
        self.write_map(UNITS_FILE, &unit_records)?;

        info!(dir = %self.dir.display(), "dataset saved");
        Ok(())
    }

    fn read_map<K, V>(&self, file: &str) -> Result<BTreeMap<K, V>, DataError>
    where
        K: Ord + DeserializeOwned,
        V: DeserializeOwned,
    {
        let path = self.dir.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "dataset file absent, starting empty");
                return Ok(BTreeMap::new());
            }
            Err(source) => return Err(DataError::Io { path, source }),
        };
        serde_json::from_str(&text).map_err(|source| DataError::Parse { path, source })
    }

    fn write_map<M>(&self, file: &str, map: &M) -> Result<(), DataError>
    where
        M: Serialize,
    {
        let path = self.dir.join(file);
        let json =
            serde_json::to_string_pretty(map).map_err(|source| DataError::Parse {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, json).map_err(|source| DataError::Io { path, source })
    }
}
