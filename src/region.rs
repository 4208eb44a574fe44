//! Per-region solar economics: generation factor and electricity price.
//!
//! The table is configuration, not logic. It is built once (from the
//! built-in data or from TOML), validated on construction, and then only
//! read. A lookup miss is an explicit [`AuditError::UnknownRegion`], never a
//! zeroed record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AuditError, RegionError};

/// Solar economics of one geographic area.
///
/// # Examples
///
/// ```
/// use solar_audit::region::RegionParameters;
///
/// let santiago = RegionParameters::new("santiago", "Santiago", 1600.0, 165.0).unwrap();
/// assert_eq!(santiago.generation_factor(), 1600.0);
/// assert!(RegionParameters::new("void", "Void", 0.0, 165.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionParameters {
    id: String,
    name: String,
    generation_factor: f64,
    price_kwh: f64,
}

impl RegionParameters {
    /// Creates a validated region entry.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique key (slug)
    /// * `name` - Display name
    /// * `generation_factor` - Annual yield per installed kWp (kWh/kWp)
    /// * `price_kwh` - Electricity unit price (currency/kWh)
    ///
    /// # Errors
    ///
    /// Returns a `RegionError` if the id is empty or either number is not
    /// strictly positive and finite.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        generation_factor: f64,
        price_kwh: f64,
    ) -> Result<Self, RegionError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RegionError::EmptyId);
        }
        check_positive(&id, "generation_factor", generation_factor)?;
        check_positive(&id, "price_kwh", price_kwh)?;
        Ok(Self {
            id,
            name: name.into(),
            generation_factor,
            price_kwh,
        })
    }

    /// Unique key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expected annual yield per installed kWp (kWh/kWp).
    pub fn generation_factor(&self) -> f64 {
        self.generation_factor
    }

    /// Electricity unit price (currency/kWh).
    pub fn price_kwh(&self) -> f64 {
        self.price_kwh
    }
}

fn check_positive(id: &str, field: &'static str, value: f64) -> Result<(), RegionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RegionError::NonPositive {
            id: id.to_string(),
            field,
            value,
        })
    }
}

/// Raw region entry as written in TOML, validated into [`RegionParameters`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionEntry {
    /// Unique key (slug).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Annual yield per installed kWp (kWh/kWp).
    pub generation_factor: f64,
    /// Electricity unit price (currency/kWh).
    pub price_kwh: f64,
}

impl TryFrom<&RegionEntry> for RegionParameters {
    type Error = RegionError;

    fn try_from(e: &RegionEntry) -> Result<Self, Self::Error> {
        Self::new(e.id.clone(), e.name.clone(), e.generation_factor, e.price_kwh)
    }
}

/// Selector option for the location step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    /// Region identifier submitted by the selector.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
}

/// Immutable mapping from region identifier to [`RegionParameters`].
///
/// Keeps insertion order for listing and a key index for O(1) lookup.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    regions: Vec<RegionParameters>,
    index: HashMap<String, usize>,
}

impl RegionTable {
    /// Builds a table from validated entries.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::Duplicate` if two entries share an id.
    pub fn from_regions(
        regions: impl IntoIterator<Item = RegionParameters>,
    ) -> Result<Self, RegionError> {
        let mut table = Self::default();
        for region in regions {
            if table.index.contains_key(region.id()) {
                return Err(RegionError::Duplicate(region.id().to_string()));
            }
            table.index.insert(region.id().to_string(), table.regions.len());
            table.regions.push(region);
        }
        Ok(table)
    }

    /// Validates and builds a table from raw TOML entries.
    ///
    /// # Errors
    ///
    /// Returns the first `RegionError` encountered.
    pub fn from_entries(entries: &[RegionEntry]) -> Result<Self, RegionError> {
        let regions = entries
            .iter()
            .map(RegionParameters::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_regions(regions)
    }

    /// Built-in Chilean comuna table (Global Solar Atlas yields, CNE tariffs).
    ///
    /// Falls back to an empty table, with a warning, if a built-in entry is
    /// rejected.
    pub fn chile() -> Self {
        Self::from_entries(&chile_entries()).unwrap_or_else(|e| {
            warn!(error = %e, "built-in region table rejected");
            Self::default()
        })
    }

    /// Resolves a region by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownRegion` if the id has no entry.
    pub fn lookup(&self, region_id: &str) -> Result<&RegionParameters, AuditError> {
        self.index
            .get(region_id)
            .and_then(|&i| self.regions.get(i))
            .ok_or_else(|| AuditError::UnknownRegion(region_id.to_string()))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionParameters> {
        self.regions.iter()
    }

    /// Value/label pairs for a location selector, in table order.
    pub fn options(&self) -> Vec<RegionOption> {
        self.regions
            .iter()
            .map(|r| RegionOption {
                value: r.id().to_string(),
                label: r.name().to_string(),
            })
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// (id, name, generation factor kWh/kWp, price CLP/kWh)
pub(crate) const CHILE: &[(&str, &str, f64, f64)] = &[
    // Región Metropolitana
    ("santiago", "Santiago", 1600.0, 165.0),
    ("providencia", "Providencia", 1600.0, 165.0),
    ("las-condes", "Las Condes", 1620.0, 165.0),
    ("nunoa", "Ñuñoa", 1600.0, 165.0),
    ("maipu", "Maipú", 1580.0, 162.0),
    ("puente-alto", "Puente Alto", 1610.0, 160.0),
    ("la-florida", "La Florida", 1600.0, 163.0),
    ("vitacura", "Vitacura", 1630.0, 165.0),
    // Norte
    ("antofagasta", "Antofagasta", 2100.0, 155.0),
    ("calama", "Calama", 2200.0, 150.0),
    ("copiapo", "Copiapó", 2050.0, 158.0),
    ("la-serena", "La Serena", 1900.0, 160.0),
    // Centro
    ("valparaiso", "Valparaíso", 1550.0, 168.0),
    ("vina-del-mar", "Viña del Mar", 1540.0, 168.0),
    ("rancagua", "Rancagua", 1650.0, 158.0),
    // Sur
    ("concepcion", "Concepción", 1350.0, 170.0),
    ("talca", "Talca", 1500.0, 162.0),
    ("temuco", "Temuco", 1250.0, 175.0),
    ("puerto-montt", "Puerto Montt", 1100.0, 180.0),
];

/// Built-in table as raw entries, used as the TOML default.
pub(crate) fn chile_entries() -> Vec<RegionEntry> {
    CHILE
        .iter()
        .map(|&(id, name, generation_factor, price_kwh)| RegionEntry {
            id: id.to_string(),
            name: name.to_string(),
            generation_factor,
            price_kwh,
        })
        .collect()
}
