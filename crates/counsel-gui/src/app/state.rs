use std::rc::Rc;

use counsel_core::profile::ProfileInput;
use counsel_core::{
  Directory,
  FilterCriteria,
  Notice,
  Transition
};
use yew::Reducible;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Field {
  Name,
  Specialty,
  City,
  Fee,
  Rating
}

impl Field {
  fn slot(
    self,
    form: &mut ProfileInput
  ) -> &mut String {
    match self {
      | Field::Name => &mut form.name,
      | Field::Specialty => {
        &mut form.specialty
      }
      | Field::City => &mut form.city,
      | Field::Fee => &mut form.fee,
      | Field::Rating => {
        &mut form.rating
      }
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum FilterControl {
  Search,
  City,
  Specialty,
  Rating,
  Fee
}

/// Raw values of the five filter
/// controls, as the DOM holds them.
#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct FilterControls {
  pub search:    String,
  pub city:      String,
  pub specialty: String,
  pub rating:    String,
  pub fee:       String
}

impl FilterControls {
  fn set(
    &mut self,
    control: FilterControl,
    value: String
  ) {
    match control {
      | FilterControl::Search => {
        self.search = value
      }
      | FilterControl::City => {
        self.city = value
      }
      | FilterControl::Specialty => {
        self.specialty = value
      }
      | FilterControl::Rating => {
        self.rating = value
      }
      | FilterControl::Fee => {
        self.fee = value
      }
    }
  }

  pub fn criteria(
    &self
  ) -> FilterCriteria {
    FilterCriteria::from_controls(
      &self.search,
      &self.city,
      &self.specialty,
      &self.rating,
      &self.fee
    )
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  Filter(FilterControl, String),
  CreateField(Field, String),
  SubmitCreate,
  BeginEdit(u64),
  EditField(Field, String),
  SubmitEdit,
  CancelEdit,
  /// Only dispatched after the user
  /// confirmed.
  Delete(u64),
  TimerFired(Transition)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryState {
  pub directory:    Directory,
  pub controls:     FilterControls,
  pub create_form:  ProfileInput,
  pub create_error: Option<String>,
  pub edit_form:    ProfileInput,
  pub edit_error:   Option<String>,
  /// Deferred modal transition
  /// waiting for its timer.
  pub pending:      Option<Transition>,
  /// Bumped per notice so repeated
  /// identical messages still alert.
  pub notice:       Option<(u64, String)>
}

impl DirectoryState {
  pub fn new(
    directory: Directory
  ) -> Self {
    Self {
      directory,
      controls: FilterControls::default(),
      create_form: ProfileInput::default(),
      create_error: None,
      edit_form: ProfileInput::default(),
      edit_error: None,
      pending: None,
      notice: None
    }
  }

  fn announce(
    &mut self,
    notice: Notice
  ) {
    let seq = self
      .notice
      .as_ref()
      .map(|(seq, _)| seq + 1)
      .unwrap_or(1);
    self.notice =
      Some((seq, notice.to_string()));
  }

  pub fn apply(
    &mut self,
    action: Action
  ) {
    match action {
      | Action::Filter(
        control,
        value
      ) => {
        self
          .controls
          .set(control, value);
        self.directory.set_criteria(
          self.controls.criteria()
        );
      }
      | Action::CreateField(
        field,
        value
      ) => {
        *field
          .slot(&mut self.create_form) =
          value;
      }
      | Action::SubmitCreate => {
        match self
          .directory
          .create(&self.create_form)
        {
          | Ok(profile) => {
            self.create_form =
              ProfileInput::default();
            self.create_error = None;
            self.announce(
              Notice::Added {
                name: profile.name
              }
            );
          }
          | Err(err) => {
            tracing::warn!(error = %err, "create rejected");
            self.create_error = Some(
              Notice::from(err)
                .to_string()
            );
          }
        }
      }
      | Action::BeginEdit(id) => {
        if let Some((form, ticket)) =
          self.directory.begin_edit(id)
        {
          self.edit_form = form;
          self.edit_error = None;
          self.pending = Some(ticket);
        }
      }
      | Action::EditField(
        field,
        value
      ) => {
        *field
          .slot(&mut self.edit_form) =
          value;
      }
      | Action::SubmitEdit => {
        match self
          .directory
          .save_edit(&self.edit_form)
        {
          | Ok(Some(saved)) => {
            self.edit_error = None;
            if let Some(ticket) =
              saved.ticket()
            {
              self.pending = Some(ticket);
            }
            match saved.notice() {
              | Some(notice) => {
                self.announce(notice)
              }
              | None => {
                tracing::debug!(
                  "edited profile was \
                   deleted; nothing saved"
                )
              }
            }
          }
          | Ok(None) => {
            tracing::warn!(
              "save clicked with no \
               edit target"
            );
          }
          | Err(err) => {
            tracing::warn!(error = %err, "edit rejected");
            self.edit_error = Some(
              Notice::from(err)
                .to_string()
            );
          }
        }
      }
      | Action::CancelEdit => {
        if let Some(ticket) =
          self.directory.cancel_edit()
        {
          self.pending = Some(ticket);
        }
      }
      | Action::Delete(id) => {
        if let Some(notice) =
          self.directory.delete(id)
        {
          self.announce(notice);
        }
      }
      | Action::TimerFired(ticket) => {
        let applied = self
          .directory
          .reveal_modal(ticket)
          || self
            .directory
            .finish_close(ticket);
        if self.pending == Some(ticket) {
          self.pending = None;
        }
        tracing::debug!(
          ?ticket,
          applied,
          phase = ?self.directory.modal().phase(),
          "modal timer fired"
        );
      }
    }
  }
}

impl Reducible for DirectoryState {
  type Action = Action;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.apply(action);
    Rc::new(next)
  }
}
