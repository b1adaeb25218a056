use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{InputError, SeedError};
use crate::filter::{self, FilterCriteria};
use crate::modal::{EditModal, Transition};
use crate::profile::{Catalog, Profile, ProfileInput};
use crate::store::RecordStore;
use crate::view::{DirectoryView, FeeFormat};

/// User-facing acknowledgement or validation message.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Added { name: String },
    Deleted { id: u64 },
    Updated,
    Invalid(InputError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added { name } => write!(f, "Profile {name} added successfully!"),
            Notice::Deleted { id } => write!(f, "Profile with ID {id} deleted."),
            Notice::Updated => write!(f, "Profile updated successfully!"),
            Notice::Invalid(_) => write!(f, "Fee and Rating must be valid numbers."),
        }
    }
}

impl From<InputError> for Notice {
    fn from(err: InputError) -> Self {
        Notice::Invalid(err)
    }
}

/// What a save did while an edit was in progress. Both variants carry the
/// close ticket, `None` when the modal was already closing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaveOutcome {
    Updated(Option<Transition>),
    /// The record under the cursor was deleted mid-edit; nothing written.
    Vanished(Option<Transition>),
}

impl SaveOutcome {
    pub fn ticket(&self) -> Option<Transition> {
        match self {
            SaveOutcome::Updated(ticket) | SaveOutcome::Vanished(ticket) => *ticket,
        }
    }

    /// `Some(Notice::Updated)` only when a record changed.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SaveOutcome::Updated(_) => Some(Notice::Updated),
            SaveOutcome::Vanished(_) => None,
        }
    }
}

/// Store, filter criteria, edit modal and the rendered view, kept in sync.
///
/// Every mutation of the store or the criteria ends in [`Directory::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    store: RecordStore,
    criteria: FilterCriteria,
    modal: EditModal,
    view: DirectoryView,
    catalog: Catalog,
    fee_format: FeeFormat,
}

impl Directory {
    pub fn new(store: RecordStore, fee_format: FeeFormat) -> Self {
        let mut directory = Self {
            store,
            criteria: FilterCriteria::default(),
            modal: EditModal::default(),
            view: DirectoryView::default(),
            catalog: Catalog::default(),
            fee_format,
        };
        directory.refresh();
        directory
    }

    pub fn from_seed(seed: Vec<Profile>) -> Result<Self, SeedError> {
        Ok(Self::new(RecordStore::from_seed(seed)?, FeeFormat::default()))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn modal(&self) -> &EditModal {
        &self.modal
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fee_format(&self) -> &FeeFormat {
        &self.fee_format
    }

    /// Recomputes the catalog and the visible subset from current state and
    /// replaces the view.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) {
        self.catalog = Catalog::from_profiles(self.store.profiles());
        let subset = filter::apply(self.store.profiles(), &self.criteria);
        self.view = DirectoryView::render(&subset, self.store.len(), &self.fee_format);
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
    }

    pub fn update_criteria(&mut self, change: impl FnOnce(FilterCriteria) -> FilterCriteria) {
        let next = change(self.criteria.clone());
        self.set_criteria(next);
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    #[tracing::instrument(skip(self, input))]
    pub fn create(&mut self, input: &ProfileInput) -> Result<Profile, InputError> {
        let profile = self.store.create(input)?;
        self.refresh();
        Ok(profile)
    }

    pub fn delete_prompt(id: u64) -> String {
        format!("Are you sure you want to delete profile ID {id}?")
    }

    /// `None` when `id` is already gone.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u64) -> Option<Notice> {
        let removed = self.store.delete(id)?;
        self.refresh();
        Some(Notice::Deleted { id: removed.id })
    }

    /// Points the edit cursor at `id` and returns the pre-filled form plus
    /// the ticket for the reveal timer.
    #[tracing::instrument(skip(self))]
    pub fn begin_edit(&mut self, id: u64) -> Option<(ProfileInput, Transition)> {
        let form = self.store.get(id)?.to_input();
        let ticket = self.modal.open(id);
        info!(id, "editing profile");
        Some((form, ticket))
    }

    pub fn reveal_modal(&mut self, ticket: Transition) -> bool {
        self.modal.reveal(ticket)
    }

    /// Updates the record under the edit cursor and starts closing the
    /// modal. `Ok(None)` when no edit is in progress.
    #[tracing::instrument(skip(self, input))]
    pub fn save_edit(&mut self, input: &ProfileInput) -> Result<Option<SaveOutcome>, InputError> {
        let Some(id) = self.modal.cursor() else {
            warn!("save requested with no edit in progress");
            return Ok(None);
        };

        let updated = self.store.update(id, input)?;
        let ticket = self.modal.close();
        match updated {
            Some(_) => {
                self.refresh();
                Ok(Some(SaveOutcome::Updated(ticket)))
            }
            None => {
                debug!(id, "edited profile was deleted; closing without update");
                Ok(Some(SaveOutcome::Vanished(ticket)))
            }
        }
    }

    pub fn cancel_edit(&mut self) -> Option<Transition> {
        self.modal.close()
    }

    pub fn finish_close(&mut self, ticket: Transition) -> bool {
        self.modal.finish_close(ticket)
    }
}
