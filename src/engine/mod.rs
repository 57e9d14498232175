//! Cross-entity aggregation queries over the registry
//!
//! Every operation is a pure read composed the same way: resolve a key set,
//! filter residents, optionally join each one against its medical record,
//! then shape the output. The engine depends downward on the store and the
//! age rules only; the store never calls back up.

pub mod age;
pub mod report;

use crate::core::Result;
use crate::storage::EntityStore;
use report::{
    ChildAlert, ChildInfo, MedicalInfo, PersonRecordView, ResidentSummary, StationCoverage,
    StationHousehold,
};
use std::sync::Arc;

/// Read-only query engine joining residents, station mappings and medical
/// records.
///
/// Two join-failure policies coexist, per operation: coverage-style queries
/// keep a resident and omit the medical detail, while the child-alert and
/// name-lookup queries drop the resident entirely. Both behaviors are part
/// of the observable contract and are kept distinct on purpose.
pub struct DispatchEngine {
    store: Arc<EntityStore>,
    adult_age: i32,
}

impl DispatchEngine {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self {
            store,
            adult_age: age::ADULT_AGE,
        }
    }

    /// Override the adult/child classification threshold.
    pub fn with_adult_age(mut self, adult_age: i32) -> Self {
        self.adult_age = adult_age;
        self
    }

    /// Residents covered by a station, with adult and child counts.
    ///
    /// Resolves only the first address mapped to the station. Residents
    /// without a medical record are excluded from the list and from both
    /// counts. An unknown station yields an empty result, not an error.
    pub fn station_coverage(&self, station: &str) -> Result<StationCoverage> {
        let Some(address) = self.store.addresses_for_station(station)?.into_iter().next() else {
            return Ok(StationCoverage::empty());
        };

        let mut persons = Vec::new();
        let mut number_of_adults = 0;
        let mut number_of_children = 0;
        for resident in self.store.residents_at_address(&address)? {
            let Some(record) = self
                .store
                .medical_record_for(&resident.first_name, &resident.last_name)?
            else {
                continue;
            };
            persons.push(ResidentSummary::from_resident(&resident));
            if age::is_minor(age::age_from_birthdate(&record.birthdate), self.adult_age) {
                number_of_children += 1;
            } else {
                number_of_adults += 1;
            }
        }

        Ok(StationCoverage {
            persons,
            number_of_adults,
            number_of_children,
        })
    }

    /// Deduplicated phone numbers of everyone covered by a station, across
    /// all of its addresses, first occurrence first.
    pub fn phone_numbers(&self, station: &str) -> Result<Vec<String>> {
        let addresses = self.store.addresses_for_station(station)?;
        let mut phones: Vec<String> = Vec::new();
        for resident in self.store.residents()? {
            if addresses.iter().any(|a| *a == resident.address) && !phones.contains(&resident.phone)
            {
                phones.push(resident.phone);
            }
        }
        Ok(phones)
    }

    /// Everyone at an address together with the station serving it.
    ///
    /// All residents appear, with the medical sub-object attached only when
    /// a record exists. An unmapped address yields an empty list and no
    /// station number.
    pub fn household(&self, address: &str) -> Result<StationHousehold> {
        let Some(mapping) = self.store.mapping_for_address(address)? else {
            return Ok(StationHousehold {
                persons: Vec::new(),
                station_number: None,
            });
        };

        let mut persons = Vec::new();
        for resident in self.store.residents_at_address(address)? {
            let mut summary = ResidentSummary::from_resident(&resident);
            if let Some(record) = self
                .store
                .medical_record_for(&resident.first_name, &resident.last_name)?
            {
                summary = summary.with_medical_info(MedicalInfo::from_record(&record));
            }
            persons.push(summary);
        }

        Ok(StationHousehold {
            persons,
            station_number: Some(mapping.station),
        })
    }

    /// Per-station household reports for a set of stations.
    ///
    /// Walks the mappings in container order, so a station serving several
    /// addresses contributes one entry per address. Residents without a
    /// medical record are dropped, and entries left with nobody are omitted
    /// from the result entirely.
    pub fn flood_report(&self, stations: &[String]) -> Result<Vec<StationHousehold>> {
        let mut reports = Vec::new();
        if stations.is_empty() {
            return Ok(reports);
        }

        for mapping in self.store.station_mappings()? {
            if !stations.iter().any(|s| *s == mapping.station) {
                continue;
            }

            let mut persons = Vec::new();
            for resident in self.store.residents_at_address(&mapping.address)? {
                let Some(record) = self
                    .store
                    .medical_record_for(&resident.first_name, &resident.last_name)?
                else {
                    continue;
                };
                persons.push(
                    ResidentSummary::from_resident(&resident)
                        .with_medical_info(MedicalInfo::from_record(&record)),
                );
            }

            if !persons.is_empty() {
                reports.push(StationHousehold {
                    persons,
                    station_number: Some(mapping.station),
                });
            }
        }

        Ok(reports)
    }

    /// Children at an address alongside the adult household members.
    ///
    /// Only residents with a medical record are considered; the rest appear
    /// in neither list. A resident exactly at the threshold is an adult.
    /// The child list is deduplicated by value, the adult list is not.
    pub fn child_alert(&self, address: &str) -> Result<ChildAlert> {
        let mut children: Vec<ChildInfo> = Vec::new();
        let mut adults = Vec::new();
        for resident in self.store.residents_at_address(address)? {
            let Some(record) = self
                .store
                .medical_record_for(&resident.first_name, &resident.last_name)?
            else {
                continue;
            };
            let age = age::age_from_birthdate(&record.birthdate);
            if age::is_minor(age, self.adult_age) {
                let child = ChildInfo {
                    first_name: resident.first_name.clone(),
                    last_name: resident.last_name.clone(),
                    age,
                };
                if !children.contains(&child) {
                    children.push(child);
                }
            } else {
                adults.push(ResidentSummary::from_resident(&resident));
            }
        }
        Ok(ChildAlert { children, adults })
    }

    /// Contact and medical detail for every resident with the given last
    /// name, case-insensitively. Residents without a record are excluded.
    pub fn person_info(&self, last_name: &str) -> Result<Vec<PersonRecordView>> {
        let mut views = Vec::new();
        for resident in self.store.residents()? {
            if !resident.last_name.eq_ignore_ascii_case(last_name) {
                continue;
            }
            let Some(record) = self
                .store
                .medical_record_for(&resident.first_name, &resident.last_name)?
            else {
                continue;
            };
            views.push(PersonRecordView {
                first_name: resident.first_name,
                last_name: resident.last_name,
                address: resident.address,
                email: resident.email,
                medical_info: MedicalInfo::from_record(&record),
            });
        }
        Ok(views)
    }

    /// Email of every resident of a city, case-insensitively. Duplicates
    /// are kept; households sharing an email appear once per resident.
    pub fn community_emails(&self, city: &str) -> Result<Vec<String>> {
        Ok(self
            .store
            .residents()?
            .into_iter()
            .filter(|r| r.city.eq_ignore_ascii_case(city))
            .map(|r| r.email)
            .collect())
    }
}
