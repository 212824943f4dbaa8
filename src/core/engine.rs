use crate::config::Policy;
use super::clock::Clock;
use super::mood::{Mood, MoodClassifier};
use super::needs::Action;
use super::sleep::{SleepGate, WakeOutcome};
use super::state::PetState;
use super::store::StateStore;
use super::vitality::{LifeChange, VitalityTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetStatus {
    Awake,
    Asleep,
    Dead,
}

/// Outcome of one run, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub status: PetStatus,
    /// `None` once the pet is dead.
    pub mood: Option<Mood>,
    pub lives: u8,
    pub level: u32,
    pub dirty: bool,
    pub woken: bool,
    pub life_change: LifeChange,
}

impl Report {
    fn from_state(state: &PetState, status: PetStatus, mood: Option<Mood>) -> Self {
        Report {
            status,
            mood,
            lives: state.lives,
            level: state.level,
            dirty: state.hygiene.satisfied,
            woken: false,
            life_change: LifeChange::Unchanged,
        }
    }

    pub fn status_name(&self) -> String {
        match self.mood {
            Some(mood) if self.status != PetStatus::Dead => mood.to_string(),
            _ => "dead".to_string(),
        }
    }

    /// True only for the run in which the last life was lost.
    pub fn game_over(&self) -> bool {
        self.life_change == LifeChange::Died
    }
}

/// Runs one load → decay → act → classify → save cycle per call.
pub struct PetEngine<S: StateStore, C: Clock> {
    store: S,
    clock: C,
    policy: Policy,
    classifier: MoodClassifier,
    gate: SleepGate,
}

impl<S: StateStore, C: Clock> PetEngine<S, C> {
    pub fn new(store: S, clock: C, policy: Policy) -> Self {
        PetEngine {
            store,
            clock,
            gate: SleepGate::new(&policy),
            classifier: MoodClassifier::default(),
            policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run(&mut self, action: Action) -> Report {
        let now = self.clock.now();
        let mut state = self.store.load().unwrap_or_else(|| PetState::new(now));

        // needs keep aging whether the pet is awake, asleep or dead
        let mut needs = state.needs();
        needs.decay(now, &self.policy);
        state.set_needs(needs);

        if state.is_dead() {
            tracing::debug!("pet is dead, ignoring {}", action);
            self.persist(&state);
            return Report::from_state(&state, PetStatus::Dead, None);
        }

        let outcome = self.gate.try_wake(&mut needs, state.lives, action, now);
        if outcome == WakeOutcome::ForcedAwake {
            state.set_needs(needs);
            self.persist(&state);
        }

        if !outcome.is_awake() {
            tracing::debug!("pet is asleep, ignoring {}", action);
            self.persist(&state);
            return Report::from_state(&state, PetStatus::Asleep, Some(Mood::Sleeping));
        }

        needs.apply_action(action, now);
        state.set_needs(needs);

        let mood = self.classifier.classify(needs.vector());

        let mut vitality = VitalityTracker::new(state.lives, state.level, state.created_at);
        let life_change = vitality.update(mood, action == Action::Refresh, now);
        state.lives = vitality.lives;
        state.level = vitality.level;

        self.persist(&state);

        Report {
            woken: outcome == WakeOutcome::ForcedAwake,
            life_change,
            ..Report::from_state(&state, PetStatus::Awake, Some(mood))
        }
    }

    fn persist(&mut self, state: &PetState) {
        if let Err(e) = self.store.save(state) {
            tracing::warn!("failed to save pet: {}", e);
        }
    }
}
