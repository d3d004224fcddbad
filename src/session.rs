use tracing::info;

use crate::{
    comparator::{compare, ComparatorOptions, Comparison},
    config::{AppConfig, DEFAULT_TIME_INDEX},
    dataset::GriddedDataset,
    error::{Result, SeaBreezeError},
    location::{location_index, Location},
    units::{UnitConvertible, Units},
};

/// The starting time index for a dataset with `len` timestamps
pub fn default_time_index(preferred: usize, len: usize) -> usize {
    preferred.min(len.saturating_sub(1))
}

/// Owns a loaded dataset for as long as the front end runs, along with the
/// location and instant currently selected. Every render recomputes from scratch.
#[derive(Debug)]
pub struct Session {
    dataset: GriddedDataset,
    catalog: Vec<Location>,
    options: ComparatorOptions,
    temperature_units: Units,
    wind_units: Units,
    location: usize,
    time_index: usize,
}

impl Session {
    pub fn new(dataset: GriddedDataset, catalog: Vec<Location>, options: ComparatorOptions) -> Result<Self> {
        if catalog.is_empty() {
            return Err(SeaBreezeError::EmptyCatalog);
        }

        let time_index = default_time_index(DEFAULT_TIME_INDEX, dataset.len());
        info!(
            timestamps = dataset.len(),
            latitudes = dataset.latitudes().len(),
            longitudes = dataset.longitudes().len(),
            "session started"
        );

        Ok(Session {
            dataset,
            catalog,
            options,
            temperature_units: Units::Kelvin,
            wind_units: Units::Metric,
            location: 0,
            time_index,
        })
    }

    pub fn from_config(dataset: GriddedDataset, config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let mut session = Session::new(dataset, config.locations.clone(), config.comparator_options())?;
        session.time_index = default_time_index(config.default_time_index, session.dataset.len());
        session.temperature_units = config.temperature_units;
        session.wind_units = config.wind_units;
        Ok(session)
    }

    pub fn dataset(&self) -> &GriddedDataset {
        &self.dataset
    }

    pub fn locations(&self) -> &[Location] {
        &self.catalog
    }

    pub fn location(&self) -> &Location {
        &self.catalog[self.location]
    }

    pub fn time_index(&self) -> usize {
        self.time_index
    }

    pub fn select_location(&mut self, name: &str) -> Result<&Location> {
        self.location = location_index(&self.catalog, name)?;
        Ok(self.location())
    }

    pub fn select_time(&mut self, index: usize) -> Result<()> {
        self.dataset.check_time_index(index)?;
        self.time_index = index;
        Ok(())
    }

    /// Recomputes the comparison for the current selection in the configured units
    pub fn render(&self) -> Result<Comparison> {
        let mut comparison = compare(&self.dataset, self.location(), self.time_index, &self.options)?;
        comparison.to_units(&self.temperature_units);
        comparison.map.wind.to_units(&self.wind_units);
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::default_time_index;

    #[test]
    fn test_default_time_index() {
        assert_eq!(default_time_index(12, 48), 12);
        assert_eq!(default_time_index(12, 5), 4);
        assert_eq!(default_time_index(12, 0), 0);
    }
}
