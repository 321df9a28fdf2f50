use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicData {
    pub population: i64,
    #[serde(rename = "populationDensity")]
    pub population_density: i64,
    pub location: String,
}
