//! The session controller.
//!
//! One explicit owner of the session state: it rehydrates from the durable
//! slot at startup, persists after every transition, and clears the slot on
//! reset. A failed persist is logged and ignored; in-memory state is never
//! rolled back.

use rand::Rng;

use crate::model::QuestionBank;
use crate::session::{DeliveryStatus, Phase, Session, SessionError};
use crate::store::SessionStore;

/// Owns a [`Session`] and the durable store behind it.
pub struct SessionController<S: SessionStore> {
    session: Session,
    store: S,
}

impl<S: SessionStore> SessionController<S> {
    /// Open the controller, rehydrating any persisted session.
    ///
    /// Malformed or unreadable durable state is discarded; the controller
    /// starts at `Intake` in that case.
    pub fn open(store: S) -> Self {
        let session = match store.load() {
            Ok(Some(session)) => session,
            Ok(None) => Session::new(),
            Err(e) => {
                tracing::warn!("failed to load persisted session: {e:#}");
                Session::new()
            }
        };
        Self { session, store }
    }

    /// The current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current phase, for dispatching on resume.
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// Start the test and persist the `InProgress` state.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        first_name: &str,
        last_name: &str,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.session.start(first_name, last_name, bank, rng)?;
        self.persist();
        Ok(())
    }

    /// Record a pending selection; persists only if the state changed.
    pub fn select_option(&mut self, index: usize) -> bool {
        let changed = self.session.select_option(index);
        if changed {
            self.persist();
        }
        changed
    }

    /// Commit the pending selection; persists only if the state changed.
    pub fn confirm_answer(&mut self) -> bool {
        let changed = self.session.confirm_answer();
        if changed {
            self.persist();
        }
        changed
    }

    /// Record the delivery outcome and persist it.
    pub fn record_delivery(&mut self, status: DeliveryStatus) {
        self.session.record_delivery(status);
        self.persist();
    }

    /// Discard the session and remove the durable slot.
    pub fn reset(&mut self) {
        self.session.reset();
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear session slot: {e:#}");
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.session) {
            tracing::warn!("failed to persist session: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Question};
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> QuestionBank {
        let mut questions = Vec::new();
        for (difficulty, count, tag) in [
            (Difficulty::Easy, 10, "e"),
            (Difficulty::Medium, 5, "m"),
            (Difficulty::Hard, 5, "h"),
        ] {
            for i in 0..count {
                questions.push(Question {
                    id: format!("{tag}{i}"),
                    prompt: format!("prompt {tag}{i}"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_option: 0,
                    difficulty,
                    group: 1,
                });
            }
        }
        QuestionBank {
            id: "bank".into(),
            name: "Bank".into(),
            description: String::new(),
            questions,
        }
    }

    #[test]
    fn open_with_empty_store_starts_at_intake() {
        let controller = SessionController::open(MemoryStore::new());
        assert_eq!(controller.phase(), Phase::Intake);
    }

    #[test]
    fn transitions_are_persisted() {
        let store = MemoryStore::new();
        let mut controller = SessionController::open(&store);
        let mut rng = StdRng::seed_from_u64(5);

        controller.start("Alice", "Martin", &bank(), &mut rng).unwrap();
        controller.select_option(1);
        controller.confirm_answer();
        let snapshot = controller.session().clone();

        // A second controller over the same slot sees the same state.
        let reloaded = SessionController::open(&store);
        assert_eq!(reloaded.session(), &snapshot);
        assert_eq!(reloaded.session().answers.len(), 1);
        assert_eq!(reloaded.session().current_index, 1);
    }

    #[test]
    fn reopen_resumes_in_progress_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        {
            let store = crate::store::FileStore::new(dir.path());
            let mut controller = SessionController::open(store);
            controller.start("Alice", "Martin", &bank(), &mut rng).unwrap();
            controller.select_option(0);
            controller.confirm_answer();
        }

        let store = crate::store::FileStore::new(dir.path());
        let controller = SessionController::open(store);
        assert_eq!(controller.phase(), Phase::InProgress);
        assert_eq!(controller.session().current_index, 1);
        assert_eq!(controller.session().first_name, "Alice");
    }

    #[test]
    fn noop_inputs_do_not_persist() {
        let store = MemoryStore::new();
        let mut controller = SessionController::open(&store);

        // No transition has happened, so the slot stays empty even after
        // ignored inputs.
        assert!(!controller.select_option(0));
        assert!(!controller.confirm_answer());
        assert!(!store.is_occupied());
    }

    #[test]
    fn reset_clears_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let store = crate::store::FileStore::new(dir.path());
        let slot_path = store.path().to_path_buf();
        let mut controller = SessionController::open(store);
        controller.start("Alice", "Martin", &bank(), &mut rng).unwrap();
        assert!(slot_path.exists());

        controller.reset();
        assert_eq!(controller.phase(), Phase::Intake);
        assert!(!slot_path.exists());

        // A subsequent open finds no prior session.
        let controller = SessionController::open(crate::store::FileStore::new(dir.path()));
        assert_eq!(controller.phase(), Phase::Intake);
        assert!(controller.session().test.is_empty());
    }

    #[test]
    fn malformed_slot_rehydrates_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::store::FileStore::new(dir.path());
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(store.path(), "][ definitely not json").unwrap();

        let controller = SessionController::open(store);
        assert_eq!(controller.phase(), Phase::Intake);
    }

    #[test]
    fn delivery_outcome_is_persisted_without_touching_answers() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let store = crate::store::FileStore::new(dir.path());
        let mut controller = SessionController::open(store);
        controller.start("Alice", "Martin", &bank(), &mut rng).unwrap();
        while controller.phase() == Phase::InProgress {
            controller.select_option(0);
            controller.confirm_answer();
        }
        controller.record_delivery(DeliveryStatus::FallbackUsed);

        let reloaded = SessionController::open(crate::store::FileStore::new(dir.path()));
        assert_eq!(reloaded.phase(), Phase::Completed);
        assert_eq!(reloaded.session().delivery, DeliveryStatus::FallbackUsed);
        assert_eq!(reloaded.session().answers.len(), 20);
    }
}
