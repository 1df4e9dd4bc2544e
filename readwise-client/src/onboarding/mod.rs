//! Onboarding flow controller
//!
//! [`enter_onboarding`] decides whether the wizard opens at all;
//! [`OnboardingWizard`] holds the step state and submits the profile.

pub mod catalog;
mod guard;
mod wizard;

pub use guard::{enter_onboarding, OnboardingEntry};
pub use wizard::{OnboardingWizard, Step, WizardPhase, TOTAL_STEPS};
