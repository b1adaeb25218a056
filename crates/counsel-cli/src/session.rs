use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow};
use counsel_core::profile::ProfileInput;
use counsel_core::{Directory, Notice};
use tracing::{debug, info, instrument};

use crate::render::Renderer;

const FIELD_USAGE: &str = "NAME | SPECIALTY | CITY | FEE | RATING";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Search(String),
    City(String),
    Specialty(String),
    Rating(String),
    Fee(String),
    Clear,
    Add(ProfileInput),
    Edit(u64),
    Save(Vec<String>),
    Cancel,
    Delete(u64),
    Catalog,
    Help,
    Quit,
}

impl Command {
    /// `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "city" => Command::City(rest.to_string()),
            "specialty" => Command::Specialty(rest.to_string()),
            "rating" => Command::Rating(rest.to_string()),
            "fee" => Command::Fee(rest.to_string()),
            "clear" => Command::Clear,
            "add" => Command::Add(parse_add_fields(rest)?),
            "edit" => Command::Edit(parse_id(rest)?),
            "save" => Command::Save(split_fields(rest)),
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "catalog" => Command::Catalog,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command: {other}")),
        };

        Ok(Some(command))
    }
}

fn parse_id(raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("expected a profile id, got: {raw:?}"))
}

fn split_fields(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return vec![];
    }
    raw.split('|').map(|field| field.trim().to_string()).collect()
}

fn parse_add_fields(raw: &str) -> anyhow::Result<ProfileInput> {
    let fields = split_fields(raw);
    let [name, specialty, city, fee, rating]: [String; 5] = fields
        .try_into()
        .map_err(|_| anyhow!("add expects {FIELD_USAGE}"))?;

    Ok(ProfileInput {
        name,
        specialty,
        city,
        fee,
        rating,
    })
}

/// Blank segments keep the pre-filled value.
fn merge_edit(mut form: ProfileInput, fields: &[String]) -> anyhow::Result<ProfileInput> {
    if fields.len() > 5 {
        return Err(anyhow!("save expects at most {FIELD_USAGE}"));
    }

    let slots = [
        &mut form.name,
        &mut form.specialty,
        &mut form.city,
        &mut form.fee,
        &mut form.rating,
    ];
    for (slot, value) in slots.into_iter().zip(fields) {
        if !value.is_empty() {
            *slot = value.clone();
        }
    }
    Ok(form)
}

/// Line-driven front end: each input line is one user event.
pub struct Session {
    directory: Directory,
    renderer: Renderer,
    confirm_delete: bool,
    draft: Option<ProfileInput>,
}

impl Session {
    pub fn new(directory: Directory, renderer: Renderer, confirm_delete: bool) -> Self {
        Self {
            directory,
            renderer,
            confirm_delete,
            draft: None,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        self.renderer.print_view(out, self.directory.view())?;

        let mut lines = input.lines();
        while let Some(line) = lines.next() {
            let line = line.context("failed reading session input")?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    self.renderer.print_error(out, &format!("error: {err:#}"))?;
                    continue;
                }
            };

            debug!(?command, "session command");
            if command == Command::Quit {
                break;
            }
            self.execute(command, &mut lines, out)?;
        }

        info!(profiles = self.directory.store().len(), "session ended");
        Ok(())
    }

    fn execute<I, W>(&mut self, command: Command, lines: &mut I, out: &mut W) -> anyhow::Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
        W: Write,
    {
        match command {
            Command::List => self.renderer.print_view(out, self.directory.view()),
            Command::Search(term) => self.refilter(out, |c| c.with_search(&term)),
            Command::City(city) => self.refilter(out, |c| c.with_city(&city)),
            Command::Specialty(specialty) => self.refilter(out, |c| c.with_specialty(&specialty)),
            Command::Rating(min) => self.refilter(out, |c| c.with_min_rating(&min)),
            Command::Fee(bucket) => self.refilter(out, |c| c.with_fee(&bucket)),
            Command::Clear => {
                self.directory.clear_filters();
                self.renderer.print_view(out, self.directory.view())
            }
            Command::Add(input) => self.add(out, &input),
            Command::Edit(id) => self.edit(out, id),
            Command::Save(fields) => self.save(out, &fields),
            Command::Cancel => self.cancel(out),
            Command::Delete(id) => self.delete(out, lines, id),
            Command::Catalog => self.renderer.print_catalog(
                out,
                self.directory.catalog(),
                self.directory.store().profiles(),
            ),
            Command::Help => print_help(out),
            Command::Quit => Ok(()),
        }
    }

    fn refilter<W: Write>(
        &mut self,
        out: &mut W,
        change: impl FnOnce(counsel_core::FilterCriteria) -> counsel_core::FilterCriteria,
    ) -> anyhow::Result<()> {
        self.directory.update_criteria(change);
        self.renderer.print_view(out, self.directory.view())
    }

    fn add<W: Write>(&mut self, out: &mut W, input: &ProfileInput) -> anyhow::Result<()> {
        match self.directory.create(input) {
            Ok(profile) => {
                self.renderer.print_view(out, self.directory.view())?;
                self.renderer
                    .print_notice(out, &Notice::Added { name: profile.name }.to_string())
            }
            Err(err) => self.report_invalid(out, err),
        }
    }

    fn edit<W: Write>(&mut self, out: &mut W, id: u64) -> anyhow::Result<()> {
        let Some((form, ticket)) = self.directory.begin_edit(id) else {
            debug!(id, "edit requested for missing profile");
            return self.renderer.print_error(out, &format!("no profile with ID {id}"));
        };
        // No animation in a terminal; the reveal completes at once.
        self.directory.reveal_modal(ticket);

        if let Some(profile) = self.directory.store().get(id) {
            self.renderer.print_edit_form(out, profile, &form)?;
        }
        self.draft = Some(form);
        Ok(())
    }

    fn save<W: Write>(&mut self, out: &mut W, fields: &[String]) -> anyhow::Result<()> {
        let Some(draft) = self.draft.clone() else {
            return self.renderer.print_error(out, "no edit in progress; use `edit ID` first");
        };
        let form = match merge_edit(draft, fields) {
            Ok(form) => form,
            Err(err) => return self.renderer.print_error(out, &format!("error: {err:#}")),
        };

        match self.directory.save_edit(&form) {
            Ok(Some(saved)) => {
                if let Some(ticket) = saved.ticket() {
                    self.directory.finish_close(ticket);
                }
                self.draft = None;
                let Some(notice) = saved.notice() else {
                    debug!("edited profile no longer exists; nothing saved");
                    return Ok(());
                };
                self.renderer.print_view(out, self.directory.view())?;
                self.renderer.print_notice(out, &notice.to_string())
            }
            Ok(None) => {
                self.draft = None;
                self.renderer.print_error(out, "no edit in progress; use `edit ID` first")
            }
            Err(err) => self.report_invalid(out, err),
        }
    }

    fn cancel<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        self.draft = None;
        match self.directory.cancel_edit() {
            Some(ticket) => {
                self.directory.finish_close(ticket);
                self.renderer.print_notice(out, "Edit cancelled.")
            }
            None => self.renderer.print_error(out, "no edit in progress"),
        }
    }

    fn delete<I, W>(&mut self, out: &mut W, lines: &mut I, id: u64) -> anyhow::Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
        W: Write,
    {
        if self.confirm_delete {
            write!(out, "{} [y/N] ", Directory::delete_prompt(id))?;
            out.flush()?;
            let answer = match lines.next() {
                Some(line) => line.context("failed reading confirmation")?,
                None => String::new(),
            };
            writeln!(out)?;
            if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                info!(id, "delete declined");
                return Ok(());
            }
        }

        match self.directory.delete(id) {
            Some(notice) => {
                self.renderer.print_view(out, self.directory.view())?;
                self.renderer.print_notice(out, &notice.to_string())
            }
            None => Ok(()),
        }
    }

    fn report_invalid<W: Write>(
        &self,
        out: &mut W,
        err: counsel_core::InputError,
    ) -> anyhow::Result<()> {
        let detail = err.to_string();
        self.renderer
            .print_error(out, &format!("{} ({detail})", Notice::from(err)))
    }
}

fn print_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "list                      show the filtered directory")?;
    writeln!(out, "search [TERM]             match name or bar id")?;
    writeln!(out, "city [NAME]               exact city (blank clears)")?;
    writeln!(out, "specialty [NAME]          exact specialty (blank clears)")?;
    writeln!(out, "rating [MIN]              minimum rating")?;
    writeln!(out, "fee [low|high|any]        below 15,000 / above 20,000")?;
    writeln!(out, "clear                     reset all filters")?;
    writeln!(out, "add {FIELD_USAGE}")?;
    writeln!(out, "edit ID                   start editing a profile")?;
    writeln!(out, "save [{FIELD_USAGE}]   blank fields keep current values")?;
    writeln!(out, "cancel                    abandon the edit")?;
    writeln!(out, "delete ID                 remove a profile")?;
    writeln!(out, "catalog                   cities and specialties with counts")?;
    writeln!(out, "quit")?;
    Ok(())
}
