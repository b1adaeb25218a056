pub mod directory;
pub mod error;
pub mod filter;
pub mod modal;
pub mod profile;
pub mod seed;
pub mod store;
pub mod view;

pub use directory::{Directory, Notice, SaveOutcome};
pub use error::{InputError, SeedError};
pub use filter::{FeeBucket, FilterCriteria};
pub use modal::{EditModal, ModalPhase, Transition};
pub use profile::{Catalog, Profile, ProfileInput};
pub use store::RecordStore;
pub use view::{DirectoryView, FeeFormat, ProfileCard, StarGlyph};
