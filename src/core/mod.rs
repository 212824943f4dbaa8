pub mod clock;
pub mod engine;
pub mod error;
pub mod mood;
pub mod needs;
pub mod sleep;
pub mod state;
pub mod store;
pub mod vitality;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{PetEngine, PetStatus, Report};
pub use error::{PetError, Result};
pub use mood::{DecisionTable, Mood, MoodClassifier};
pub use needs::{Action, Need, NeedChannel, NeedTracker};
pub use sleep::{SleepGate, WakeOutcome};
pub use state::{PetState, MAX_LIVES};
pub use store::{FileStore, MemoryStore, StateStore};
pub use vitality::{LifeChange, VitalityTracker};
