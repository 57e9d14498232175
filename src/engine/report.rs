//! Response shapes for the aggregation queries
//!
//! Pure field selection over store entities; each query has its own shape.
//! Optional medical detail is omitted from serialized output entirely when
//! no record exists, never emitted as a null placeholder.

use crate::core::{MedicalRecord, Resident};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalInfo {
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl MedicalInfo {
    pub fn from_record(record: &MedicalRecord) -> Self {
        Self {
            medications: record.medications.clone(),
            allergies: record.allergies.clone(),
        }
    }
}

/// Brief resident info used by the coverage, household and flood views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentSummary {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_info: Option<MedicalInfo>,
}

impl ResidentSummary {
    pub fn from_resident(resident: &Resident) -> Self {
        Self {
            first_name: resident.first_name.clone(),
            last_name: resident.last_name.clone(),
            address: resident.address.clone(),
            phone: resident.phone.clone(),
            medical_info: None,
        }
    }

    pub fn with_medical_info(mut self, info: MedicalInfo) -> Self {
        self.medical_info = Some(info);
        self
    }
}

/// Station coverage: brief resident info plus adult and child counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCoverage {
    pub persons: Vec<ResidentSummary>,
    pub number_of_adults: usize,
    pub number_of_children: usize,
}

impl StationCoverage {
    pub fn empty() -> Self {
        Self {
            persons: Vec::new(),
            number_of_adults: 0,
            number_of_children: 0,
        }
    }
}

/// Residents grouped under the station serving them. Used both for the
/// household-by-address view (`station_number` absent when the address is
/// unmapped) and as the per-station entry of the flood report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationHousehold {
    pub persons: Vec<ResidentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildInfo {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

/// Children at an address alongside the adult household members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildAlert {
    pub children: Vec<ChildInfo>,
    pub adults: Vec<ResidentSummary>,
}

/// Name-lookup view: contact address and email with full medical detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecordView {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub medical_info: MedicalInfo,
}
