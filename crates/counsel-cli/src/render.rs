use std::io::Write;

use anyhow::anyhow;
use counsel_core::profile::{Catalog, Profile, ProfileInput};
use counsel_core::view::{DirectoryView, StarGlyph};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// `terminal` says whether the output is a tty; color is only ever used
    /// on one.
    pub fn new(cfg: &Config, terminal: bool) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self {
            color: color && terminal,
        })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, out, view), fields(cards = view.cards.len()))]
    pub fn print_view<W: Write>(&self, out: &mut W, view: &DirectoryView) -> anyhow::Result<()> {
        if view.no_results {
            writeln!(out, "{}", self.paint("No profiles match the current filters.", "31"))?;
            writeln!(out, "{}", view.summary())?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Name".to_string(),
            "Specialty".to_string(),
            "City".to_string(),
            "Avg. Fee".to_string(),
            "Rating".to_string(),
            "Bar ID".to_string(),
        ];

        let rows = view
            .cards
            .iter()
            .map(|card| {
                let stars: String = card
                    .stars
                    .iter()
                    .map(|glyph| match glyph {
                        StarGlyph::Full | StarGlyph::Half => self.paint(glyph.symbol(), "33"),
                        StarGlyph::Empty => glyph.symbol().to_string(),
                    })
                    .collect();

                vec![
                    self.paint(&card.id.to_string(), "33"),
                    card.name.clone(),
                    format!("{} Specialist", card.specialty),
                    card.city.clone(),
                    card.fee.clone(),
                    format!("{stars} ({})", card.rating),
                    card.bar_id.clone(),
                ]
            })
            .collect();

        write_table(&mut *out, headers, rows)?;
        writeln!(out, "{}", view.summary())?;
        Ok(())
    }

    pub fn print_edit_form<W: Write>(
        &self,
        out: &mut W,
        profile: &Profile,
        form: &ProfileInput,
    ) -> anyhow::Result<()> {
        writeln!(out, "Editing profile {} ({})", profile.id, profile.bar_id)?;
        writeln!(out, "name      {}", form.name)?;
        writeln!(out, "specialty {}", form.specialty)?;
        writeln!(out, "city      {}", form.city)?;
        writeln!(out, "fee       {}", form.fee)?;
        writeln!(out, "rating    {}", form.rating)?;
        Ok(())
    }

    pub fn print_catalog<W: Write>(
        &self,
        out: &mut W,
        catalog: &Catalog,
        profiles: &[Profile],
    ) -> anyhow::Result<()> {
        writeln!(out, "Cities:")?;
        for (city, count) in catalog.city_counts(profiles) {
            writeln!(out, "  {city} ({count})")?;
        }
        writeln!(out, "Specialties:")?;
        for (specialty, count) in catalog.specialty_counts(profiles) {
            writeln!(out, "  {specialty} ({count})")?;
        }
        Ok(())
    }

    pub fn print_notice<W: Write>(&self, out: &mut W, text: &str) -> anyhow::Result<()> {
        writeln!(out, "{}", self.paint(text, "32"))?;
        Ok(())
    }

    pub fn print_error<W: Write>(&self, out: &mut W, text: &str) -> anyhow::Result<()> {
        writeln!(out, "{}", self.paint(text, "31"))?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use counsel_core::profile::Profile;
    use counsel_core::view::FeeFormat;

    use super::*;

    fn view() -> DirectoryView {
        let profile = Profile {
            id: 1,
            name: "Ali Raza".to_string(),
            specialty: "Family".to_string(),
            city: "Lahore".to_string(),
            fee: 12000,
            rating: 4.5,
            bar_id: "PK-001".to_string(),
        };
        DirectoryView::render(&[profile], 1, &FeeFormat::default())
    }

    #[test]
    fn table_lists_card_fields() {
        let mut out = Vec::new();
        Renderer::plain().print_view(&mut out, &view()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Family Specialist"));
        assert!(text.contains("PKR 12,000"));
        assert!(text.contains("★★★★½ (4.5)"));
        assert!(text.contains("PK-001"));
        assert!(text.contains("1 of 1 profiles"));
    }

    #[test]
    fn empty_view_prints_no_results() {
        let mut out = Vec::new();
        let empty = DirectoryView::render(&[], 4, &FeeFormat::default());
        Renderer::plain().print_view(&mut out, &empty).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("No profiles match"));
        assert!(!text.contains("Bar ID"));
    }

    #[test]
    fn strip_ansi_measures_visible_text() {
        assert_eq!(strip_ansi("\x1b[33m12\x1b[0m"), "12");
    }

    #[test]
    fn color_setting_is_validated() {
        let mut cfg = Config::defaults();
        cfg.apply_overrides(vec![("color".to_string(), "maybe".to_string())]);
        assert!(Renderer::new(&cfg, true).is_err());
    }
}
