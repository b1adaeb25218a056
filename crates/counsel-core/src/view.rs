use crate::profile::Profile;

pub const STAR_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarGlyph {
    Full,
    Half,
    Empty,
}

impl StarGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            StarGlyph::Full => "★",
            StarGlyph::Half => "½",
            StarGlyph::Empty => "☆",
        }
    }
}

/// How fees are shown on cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeFormat {
    pub currency: String,
    pub separator: char,
}

impl Default for FeeFormat {
    fn default() -> Self {
        Self {
            currency: "PKR".to_string(),
            separator: ',',
        }
    }
}

impl FeeFormat {
    pub fn format(&self, fee: u64) -> String {
        let grouped = group_thousands(fee, self.separator);
        if self.currency.is_empty() {
            grouped
        } else {
            format!("{} {}", self.currency, grouped)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    pub id: u64,
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub fee: String,
    pub stars: [StarGlyph; STAR_SLOTS],
    pub rating: String,
    pub bar_id: String,
}

impl ProfileCard {
    pub fn new(profile: &Profile, fee_format: &FeeFormat) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            specialty: profile.specialty.clone(),
            city: profile.city.clone(),
            fee: fee_format.format(profile.fee),
            stars: star_glyphs(profile.rating),
            rating: rating_label(profile.rating),
            bar_id: profile.bar_id.clone(),
        }
    }

    pub fn star_line(&self) -> String {
        self.stars.iter().map(StarGlyph::symbol).collect()
    }
}

/// The rendered card grid. Every refresh builds a new one; nothing is
/// patched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectoryView {
    pub cards: Vec<ProfileCard>,
    pub no_results: bool,
    /// Size of the collection the subset was drawn from.
    pub total: usize,
}

impl DirectoryView {
    #[tracing::instrument(skip(subset, fee_format), fields(visible = subset.len()))]
    pub fn render(subset: &[Profile], total: usize, fee_format: &FeeFormat) -> Self {
        let cards: Vec<ProfileCard> = subset
            .iter()
            .map(|profile| ProfileCard::new(profile, fee_format))
            .collect();

        tracing::debug!(visible = cards.len(), total, "rendered directory view");
        Self {
            no_results: cards.is_empty(),
            cards,
            total,
        }
    }

    pub fn summary(&self) -> String {
        format!("{} of {} profiles", self.cards.len(), self.total)
    }
}

/// One decimal place with exact ties rounded away from zero. Only
/// quarter values (x.25, x.75) sit exactly on a tie in binary.
pub fn rating_label(rating: f64) -> String {
    let quarters = rating * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", rating + 0.05 * rating.signum());
    }
    format!("{rating:.1}")
}

/// One full star per whole point, a half glyph in the next slot when the
/// rating has a fractional part, empty slots after that.
pub fn star_glyphs(rating: f64) -> [StarGlyph; STAR_SLOTS] {
    let whole = rating.max(0.0).floor() as usize;
    let has_fraction = rating.fract() != 0.0;

    let mut out = [StarGlyph::Empty; STAR_SLOTS];
    for (idx, slot) in out.iter_mut().enumerate() {
        *slot = if idx < whole {
            StarGlyph::Full
        } else if idx == whole && has_fraction {
            StarGlyph::Half
        } else {
            StarGlyph::Empty
        };
    }
    out
}

pub fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
