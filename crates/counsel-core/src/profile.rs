use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

pub const DEFAULT_CITIES: &[&str] = &[
    "Lahore",
    "Karachi",
    "Islamabad",
    "Rawalpindi",
    "Faisalabad",
    "Peshawar",
    "Multan",
    "Quetta",
];

pub const DEFAULT_SPECIALTIES: &[&str] = &[
    "Criminal",
    "Family",
    "Corporate",
    "Civil",
    "Property",
    "Tax",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub fee: u64,
    pub rating: f64,
    #[serde(rename = "barId")]
    pub bar_id: String,
}

impl Profile {
    pub fn new(id: u64, fields: ProfileFields) -> Self {
        Self {
            id,
            name: fields.name,
            specialty: fields.specialty,
            city: fields.city,
            fee: fields.fee,
            rating: fields.rating,
            bar_id: registration_id(id),
        }
    }

    /// Overwrites everything except `id` and `bar_id`.
    pub fn apply(&mut self, fields: ProfileFields) {
        self.name = fields.name;
        self.specialty = fields.specialty;
        self.city = fields.city;
        self.fee = fields.fee;
        self.rating = fields.rating;
    }

    /// Pre-filled edit form values.
    pub fn to_input(&self) -> ProfileInput {
        ProfileInput {
            name: self.name.clone(),
            specialty: self.specialty.clone(),
            city: self.city.clone(),
            fee: self.fee.to_string(),
            rating: self.rating.to_string(),
        }
    }
}

pub fn registration_id(id: u64) -> String {
    format!("PK-NEW-{id}")
}

pub fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

/// Raw form values exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub fee: String,
    pub rating: String,
}

/// Typed editable fields of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub fee: u64,
    pub rating: f64,
}

impl ProfileInput {
    pub fn parse(&self) -> Result<ProfileFields, InputError> {
        let fee = parse_fee(&self.fee)?;
        let rating = parse_rating(&self.rating)?;

        Ok(ProfileFields {
            name: self.name.trim().to_string(),
            specialty: self.specialty.trim().to_string(),
            city: self.city.trim().to_string(),
            fee,
            rating,
        })
    }
}

impl ProfileFields {
    pub fn clamped(mut self) -> Self {
        self.rating = clamp_rating(self.rating);
        self
    }
}

fn parse_fee(raw: &str) -> Result<u64, InputError> {
    let value: i64 = raw.trim().parse().map_err(|_| InputError::InvalidFee {
        raw: raw.to_string(),
    })?;
    u64::try_from(value).map_err(|_| InputError::NegativeFee { value })
}

fn parse_rating(raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::InvalidRating {
            raw: raw.to_string(),
        })
}

/// City and specialty choices offered by the select controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub cities: Vec<String>,
    pub specialties: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            specialties: DEFAULT_SPECIALTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// Default categories followed by any other values present in `profiles`,
    /// sorted.
    pub fn from_profiles(profiles: &[Profile]) -> Self {
        let mut catalog = Self::default();
        extend_unique(&mut catalog.cities, profiles.iter().map(|p| p.city.as_str()));
        extend_unique(
            &mut catalog.specialties,
            profiles.iter().map(|p| p.specialty.as_str()),
        );
        catalog
    }

    pub fn city_counts(&self, profiles: &[Profile]) -> Vec<(String, usize)> {
        facet_counts(&self.cities, profiles.iter().map(|p| p.city.as_str()))
    }

    pub fn specialty_counts(&self, profiles: &[Profile]) -> Vec<(String, usize)> {
        facet_counts(&self.specialties, profiles.iter().map(|p| p.specialty.as_str()))
    }
}

fn extend_unique<'a>(known: &mut Vec<String>, values: impl Iterator<Item = &'a str>) {
    let extra: BTreeSet<&str> = values
        .filter(|value| !value.is_empty())
        .filter(|value| !known.iter().any(|k| k == value))
        .collect();
    known.extend(extra.into_iter().map(str::to_string));
}

fn facet_counts<'a>(
    choices: &[String],
    values: impl Iterator<Item = &'a str>,
) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    choices
        .iter()
        .map(|choice| {
            let count = counts.get(choice.as_str()).copied().unwrap_or(0);
            (choice.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(fee: &str, rating: &str) -> ProfileInput {
        ProfileInput {
            name: "  Ali Raza ".to_string(),
            specialty: "Family".to_string(),
            city: "Lahore".to_string(),
            fee: fee.to_string(),
            rating: rating.to_string(),
        }
    }

    #[test]
    fn parse_trims_text_and_reads_numbers() {
        let fields = input(" 12000 ", "4.5").parse().unwrap();
        assert_eq!(fields.name, "Ali Raza");
        assert_eq!(fields.fee, 12000);
        assert_eq!(fields.rating, 4.5);
    }

    #[test]
    fn parse_rejects_non_numeric_fee_and_rating() {
        assert_eq!(
            input("twelve", "4.5").parse(),
            Err(InputError::InvalidFee {
                raw: "twelve".to_string()
            })
        );
        assert_eq!(
            input("12000", "").parse(),
            Err(InputError::InvalidRating { raw: String::new() })
        );
        assert!(input("12000", "NaN").parse().is_err());
        assert!(input("12000", "inf").parse().is_err());
        assert!(input("12000.5", "4").parse().is_err());
    }

    #[test]
    fn parse_rejects_negative_fee() {
        assert_eq!(
            input("-5", "4").parse(),
            Err(InputError::NegativeFee { value: -5 })
        );
    }

    #[test]
    fn clamped_bounds_rating() {
        assert_eq!(input("1", "7.2").parse().unwrap().clamped().rating, 5.0);
        assert_eq!(input("1", "-3").parse().unwrap().clamped().rating, 1.0);
        assert_eq!(input("1", "3.3").parse().unwrap().clamped().rating, 3.3);
    }

    #[test]
    fn seed_json_uses_bar_id_key() {
        let raw = r#"{"id":1,"name":"Ali Raza","specialty":"Family","city":"Lahore","fee":12000,"rating":4.5,"barId":"PK-001"}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.bar_id, "PK-001");
        assert!(serde_json::to_string(&profile).unwrap().contains("\"barId\""));
    }

    #[test]
    fn catalog_appends_unknown_seed_values_and_counts() {
        let mut profile = Profile::new(1, input("1", "4").parse().unwrap());
        profile.city = "Sialkot".to_string();
        let profiles = vec![profile];

        let catalog = Catalog::from_profiles(&profiles);
        assert_eq!(catalog.cities.last().map(String::as_str), Some("Sialkot"));
        assert_eq!(catalog.cities.len(), DEFAULT_CITIES.len() + 1);

        let counts = catalog.specialty_counts(&profiles);
        assert!(counts.contains(&("Family".to_string(), 1)));
        assert!(counts.contains(&("Tax".to_string(), 0)));
    }
}
