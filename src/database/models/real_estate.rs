use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstate {
    /// Assigned by the server on create; any client value is overwritten
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub address: String,
    pub location: String,
    pub price: i64,
    pub area: i64,
    pub bedroom: i64,
    pub bathroom: i64,
    pub description: String,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// Missing in documents written before the field existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

/// Smallest positive id not taken by any listing
pub fn next_available_id(listings: &[RealEstate]) -> u32 {
    let mut used: Vec<u32> = listings.iter().map(|l| l.id).collect();
    used.sort_unstable();
    used.dedup();

    let mut candidate = 1;
    for id in used {
        if id == candidate {
            candidate += 1;
        } else if id > candidate {
            break;
        }
    }
    candidate
}
