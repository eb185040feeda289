pub mod artifacts;
pub mod dna_fetcher;
pub mod installer;
pub mod setup;

pub use crate::domain::model::{FetchOutcome, InstallReport, StepOutcome, StepReport};
pub use crate::domain::ports::{ConfigProvider, ModelHub, Prompter, SetupStep, Storage};
pub use crate::utils::error::Result;
