use tracing::trace;

use crate::profile::Profile;

/// `Low` matches fees strictly below this.
pub const LOW_FEE_CEILING: u64 = 15_000;
/// `High` matches fees strictly above this.
pub const HIGH_FEE_FLOOR: u64 = 20_000;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum FeeBucket {
  #[default]
  Any,
  Low,
  High
}

impl FeeBucket {
  /// Unknown control values impose no
  /// constraint.
  pub fn from_control(
    raw: &str
  ) -> Self {
    match raw.trim() {
      | "low" => Self::Low,
      | "high" => Self::High,
      | _ => Self::Any
    }
  }

  pub fn as_control(
    &self
  ) -> &'static str {
    match self {
      | Self::Any => "",
      | Self::Low => "low",
      | Self::High => "high"
    }
  }

  pub fn matches(
    &self,
    fee: u64
  ) -> bool {
    match self {
      | Self::Any => true,
      | Self::Low => {
        fee < LOW_FEE_CEILING
      }
      | Self::High => {
        fee > HIGH_FEE_FLOOR
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct FilterCriteria {
  /// Already lowercased and trimmed.
  pub search:     String,
  pub city:       Option<String>,
  pub specialty:  Option<String>,
  pub min_rating: f64,
  pub fee:        FeeBucket
}

impl FilterCriteria {
  /// Builds criteria from the raw
  /// values of the five filter
  /// controls.
  pub fn from_controls(
    search: &str,
    city: &str,
    specialty: &str,
    min_rating: &str,
    fee: &str
  ) -> Self {
    Self {
      search:     normalize_search(
        search
      ),
      city:       non_empty(city),
      specialty:  non_empty(specialty),
      min_rating: parse_min_rating(
        min_rating
      ),
      fee:        FeeBucket::from_control(
        fee
      )
    }
  }

  pub fn with_search(
    mut self,
    search: &str
  ) -> Self {
    self.search =
      normalize_search(search);
    self
  }

  pub fn with_city(
    mut self,
    city: &str
  ) -> Self {
    self.city = non_empty(city);
    self
  }

  pub fn with_specialty(
    mut self,
    specialty: &str
  ) -> Self {
    self.specialty =
      non_empty(specialty);
    self
  }

  pub fn with_min_rating(
    mut self,
    min_rating: &str
  ) -> Self {
    self.min_rating =
      parse_min_rating(min_rating);
    self
  }

  pub fn with_fee(
    mut self,
    fee: &str
  ) -> Self {
    self.fee =
      FeeBucket::from_control(fee);
    self
  }

  pub fn is_unfiltered(
    &self
  ) -> bool {
    self.search.is_empty()
      && self.city.is_none()
      && self.specialty.is_none()
      && self.min_rating <= 0.0
      && self.fee == FeeBucket::Any
  }

  pub fn matches(
    &self,
    profile: &Profile
  ) -> bool {
    let search_ok =
      self.search.is_empty()
        || profile
          .name
          .to_lowercase()
          .contains(&self.search)
        || profile
          .bar_id
          .to_lowercase()
          .contains(&self.search);

    let city_ok =
      match self.city.as_deref() {
        | Some(city) => {
          profile.city == city
        }
        | None => true
      };

    let specialty_ok =
      match self.specialty.as_deref() {
        | Some(specialty) => {
          profile.specialty
            == specialty
        }
        | None => true
      };

    let rating_ok =
      profile.rating >= self.min_rating;
    let fee_ok =
      self.fee.matches(profile.fee);

    let ok = search_ok
      && city_ok
      && specialty_ok
      && rating_ok
      && fee_ok;

    trace!(
      id = profile.id,
      search_ok,
      city_ok,
      specialty_ok,
      rating_ok,
      fee_ok,
      "filter evaluation"
    );
    ok
  }
}

/// Visible subset in collection
/// order.
pub fn apply(
  profiles: &[Profile],
  criteria: &FilterCriteria
) -> Vec<Profile> {
  profiles
    .iter()
    .filter(|profile| {
      criteria.matches(profile)
    })
    .cloned()
    .collect()
}

fn normalize_search(
  raw: &str
) -> String {
  raw.trim().to_lowercase()
}

fn non_empty(
  raw: &str
) -> Option<String> {
  if raw.is_empty() {
    None
  } else {
    Some(raw.to_string())
  }
}

fn parse_min_rating(
  raw: &str
) -> f64 {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|value| value.is_finite())
    .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
  use super::{
    FeeBucket,
    FilterCriteria,
    apply
  };
  use crate::profile::Profile;

  fn profile(
    id: u64,
    name: &str,
    city: &str,
    specialty: &str,
    fee: u64,
    rating: f64
  ) -> Profile {
    Profile {
      id,
      name: name.to_string(),
      specialty: specialty.to_string(),
      city: city.to_string(),
      fee,
      rating,
      bar_id: format!("PK-{id:03}")
    }
  }

  fn sample() -> Vec<Profile> {
    vec![
      profile(
        1, "Ali Raza", "Lahore",
        "Family", 12000, 4.5
      ),
      profile(
        2, "Sana Malik", "Karachi",
        "Criminal", 25000, 4.8
      ),
      profile(
        3, "Ayesha Khan", "Lahore",
        "Civil", 15000, 3.9
      ),
    ]
  }

  fn ids(
    profiles: &[Profile]
  ) -> Vec<u64> {
    profiles
      .iter()
      .map(|p| p.id)
      .collect()
  }

  #[test]
  fn default_criteria_pass_everything()
  {
    let all = sample();
    let out = apply(
      &all,
      &FilterCriteria::default()
    );
    assert_eq!(out, all);
    assert!(
      FilterCriteria::default()
        .is_unfiltered()
    );
  }

  #[test]
  fn city_equality_selects_only_matching()
   {
    let a = profile(
      1, "A", "Lahore", "Family",
      12000, 4.5
    );
    let b = profile(
      2, "B", "Karachi", "Family",
      12000, 4.5
    );
    let criteria =
      FilterCriteria::default()
        .with_city("Lahore");

    let out = apply(
      &[a.clone(), b],
      &criteria
    );
    assert_eq!(out, vec![a]);
  }

  #[test]
  fn search_is_case_insensitive_on_name_and_bar_id()
   {
    let all = sample();

    let by_name =
      FilterCriteria::default()
        .with_search("  MALIK ");
    assert_eq!(
      ids(&apply(&all, &by_name)),
      vec![2]
    );

    let by_bar_id =
      FilterCriteria::default()
        .with_search("pk-003");
    assert_eq!(
      ids(&apply(&all, &by_bar_id)),
      vec![3]
    );

    let nothing =
      FilterCriteria::default()
        .with_search("zzz");
    assert!(
      apply(&all, &nothing).is_empty()
    );
  }

  #[test]
  fn fee_bucket_boundaries() {
    assert!(
      !FeeBucket::Low.matches(15000)
    );
    assert!(
      !FeeBucket::High.matches(15000)
    );
    assert!(
      FeeBucket::Low.matches(14999)
    );
    assert!(
      FeeBucket::High.matches(20001)
    );
    assert!(
      !FeeBucket::High.matches(20000)
    );
    assert!(
      FeeBucket::Any.matches(0)
    );
    assert_eq!(
      FeeBucket::from_control(
        "medium"
      ),
      FeeBucket::Any
    );
  }

  #[test]
  fn min_rating_defaults_to_zero_when_unparseable()
   {
    let criteria =
      FilterCriteria::from_controls(
        "", "", "", "any", ""
      );
    assert_eq!(criteria.min_rating, 0.0);

    let criteria =
      FilterCriteria::from_controls(
        "", "", "", "4.5", ""
      );
    assert_eq!(
      ids(&apply(&sample(), &criteria)),
      vec![1, 2]
    );
  }

  #[test]
  fn predicates_compose_as_conjunction()
   {
    let criteria =
      FilterCriteria::from_controls(
        "a", "Lahore", "", "4", "low"
      );
    assert_eq!(
      ids(&apply(&sample(), &criteria)),
      vec![1]
    );

    let criteria =
      FilterCriteria::from_controls(
        "", "", "Criminal", "", "high"
      );
    assert_eq!(
      ids(&apply(&sample(), &criteria)),
      vec![2]
    );
  }

  #[test]
  fn filtering_is_idempotent_and_keeps_order()
   {
    let criteria =
      FilterCriteria::default()
        .with_city("Lahore");
    let once =
      apply(&sample(), &criteria);
    let twice = apply(&once, &criteria);
    assert_eq!(once, twice);
    assert_eq!(ids(&once), vec![1, 3]);
  }
}
