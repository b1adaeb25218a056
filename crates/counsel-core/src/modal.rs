use std::time::Duration;

use tracing::debug;

/// Delay before the reveal animation completes.
pub const OPEN_DELAY: Duration = Duration::from_millis(10);
/// Delay before a closing modal is hidden.
pub const CLOSE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl ModalPhase {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ModalPhase::Closed)
    }

    /// The content is shown at full scale/opacity only once revealed.
    pub fn is_revealed(&self) -> bool {
        matches!(self, ModalPhase::Open)
    }
}

/// Ticket for a deferred transition. Completing it is a no-op once a newer
/// transition has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditModal {
    phase: ModalPhase,
    cursor: Option<u64>,
    generation: u64,
}

impl EditModal {
    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    /// Targets `id`, from any phase. A pending close is superseded.
    pub fn open(&mut self, id: u64) -> Transition {
        self.generation += 1;
        self.cursor = Some(id);
        self.phase = ModalPhase::Opening;
        debug!(id, generation = self.generation, "edit modal opening");
        Transition {
            generation: self.generation,
            delay: OPEN_DELAY,
        }
    }

    pub fn reveal(&mut self, ticket: Transition) -> bool {
        if ticket.generation != self.generation || self.phase != ModalPhase::Opening {
            debug!(?ticket, phase = ?self.phase, "stale reveal ignored");
            return false;
        }
        self.phase = ModalPhase::Open;
        true
    }

    /// `None` when there is nothing to close.
    pub fn close(&mut self) -> Option<Transition> {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                self.generation += 1;
                self.phase = ModalPhase::Closing;
                debug!(generation = self.generation, "edit modal closing");
                Some(Transition {
                    generation: self.generation,
                    delay: CLOSE_DELAY,
                })
            }
            ModalPhase::Closing | ModalPhase::Closed => None,
        }
    }

    /// Hides the modal and clears the cursor, unless the modal was reopened
    /// after `ticket` was issued.
    pub fn finish_close(&mut self, ticket: Transition) -> bool {
        if ticket.generation != self.generation || self.phase != ModalPhase::Closing {
            debug!(?ticket, phase = ?self.phase, "stale close ignored");
            return false;
        }
        self.phase = ModalPhase::Closed;
        self.cursor = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle() {
        let mut modal = EditModal::default();
        assert_eq!(modal.phase(), ModalPhase::Closed);

        let opening = modal.open(3);
        assert_eq!(opening.delay, OPEN_DELAY);
        assert_eq!(modal.phase(), ModalPhase::Opening);
        assert_eq!(modal.cursor(), Some(3));

        assert!(modal.reveal(opening));
        assert_eq!(modal.phase(), ModalPhase::Open);

        let closing = modal.close().unwrap();
        assert_eq!(closing.delay, CLOSE_DELAY);
        assert_eq!(modal.phase(), ModalPhase::Closing);
        assert_eq!(modal.cursor(), Some(3));

        assert!(modal.finish_close(closing));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert_eq!(modal.cursor(), None);
    }

    #[test]
    fn reopening_before_close_timer_keeps_new_cursor() {
        let mut modal = EditModal::default();
        let first = modal.open(1);
        modal.reveal(first);
        let stale_close = modal.close().unwrap();

        let second = modal.open(2);
        assert!(!modal.finish_close(stale_close));
        assert_eq!(modal.cursor(), Some(2));
        assert_eq!(modal.phase(), ModalPhase::Opening);

        assert!(modal.reveal(second));
        assert_eq!(modal.phase(), ModalPhase::Open);
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut modal = EditModal::default();
        assert_eq!(modal.close(), None);

        modal.open(1);
        let ticket = modal.close().unwrap();
        assert_eq!(modal.close(), None);
        assert!(modal.finish_close(ticket));
    }

    #[test]
    fn late_reveal_after_close_is_ignored() {
        let mut modal = EditModal::default();
        let opening = modal.open(5);
        modal.close();
        assert!(!modal.reveal(opening));
        assert_eq!(modal.phase(), ModalPhase::Closing);
    }
}
