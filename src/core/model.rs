use serde::{Deserialize, Serialize};

/// A resident known to the registry.
///
/// The natural key is the (first name, last name) pair. The address is a
/// join key shared by everyone in the same household, not a unique field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl Resident {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            zip: zip.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

/// Association between a street address and the station responsible for it.
///
/// One mapping per address; the station identifier is an opaque string, not
/// necessarily numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMapping {
    pub address: String,
    pub station: String,
}

impl StationMapping {
    pub fn new(address: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            station: station.into(),
        }
    }
}

/// Medical history keyed by the same (first name, last name) pair as
/// [`Resident`]. The pairing is not enforced by the store; queries join the
/// two defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub first_name: String,
    pub last_name: String,
    /// Birthdate in `MM/DD/YYYY` form; age is always derived, never stored.
    pub birthdate: String,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl MedicalRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: impl Into<String>,
        medications: Vec<String>,
        allergies: Vec<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate: birthdate.into(),
            medications,
            allergies,
        }
    }

    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

/// The full registry state, and the sole unit of persistence.
///
/// Section names match the historical data file layout, so any snapshot
/// written by an earlier deployment stays loadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "persons", default)]
    pub residents: Vec<Resident>,
    #[serde(rename = "firestations", default)]
    pub station_mappings: Vec<StationMapping>,
    #[serde(rename = "medicalrecords", default)]
    pub medical_records: Vec<MedicalRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_sections_use_historical_names() {
        let snapshot = Snapshot {
            residents: vec![Resident::new(
                "John",
                "Doe",
                "1 Main St",
                "Culver",
                "97451",
                "841-874-6512",
                "jdoe@email.com",
            )],
            station_mappings: vec![StationMapping::new("1 Main St", "1")],
            medical_records: vec![],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("persons").is_some());
        assert!(json.get("firestations").is_some());
        assert!(json.get("medicalrecords").is_some());
        assert_eq!(json["persons"][0]["firstName"], "John");
        assert_eq!(json["firestations"][0]["station"], "1");
    }

    #[test]
    fn test_snapshot_missing_sections_deserialize_empty() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.residents.is_empty());
        assert!(snapshot.station_mappings.is_empty());
        assert!(snapshot.medical_records.is_empty());
    }

    #[test]
    fn test_medical_record_lists_default_when_absent() {
        let record: MedicalRecord = serde_json::from_str(
            r#"{"firstName": "Jane", "lastName": "Doe", "birthdate": "03/06/1989"}"#,
        )
        .unwrap();
        assert!(record.medications.is_empty());
        assert!(record.allergies.is_empty());
    }
}
