//! Four-step onboarding wizard
//!
//! Welcome (name + avatar) → Interests → Authors → Summary. Forward moves are
//! gated per step; backward moves never are. The final step submits the whole
//! profile in one request.

use super::catalog;
use crate::api::Backend;
use rand::Rng;
use readwise_common::avatar::{AvatarDescriptor, AvatarEdit};
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::models::OnboardingSubmission;
use readwise_common::{Error, Identity, Result, Route};
use std::collections::BTreeSet;
use tracing::{debug, error, info};

pub const TOTAL_STEPS: u8 = 4;

/// Wizard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Welcome = 1,
    Interests = 2,
    Authors = 3,
    Summary = 4,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn next(self) -> Step {
        match self {
            Step::Welcome => Step::Interests,
            Step::Interests => Step::Authors,
            Step::Authors | Step::Summary => Step::Summary,
        }
    }

    fn previous(self) -> Step {
        match self {
            Step::Welcome | Step::Interests => Step::Welcome,
            Step::Authors => Step::Interests,
            Step::Summary => Step::Authors,
        }
    }
}

/// Where the wizard is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitted,
}

/// Onboarding state for one identity
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    user: Identity,
    step: Step,
    phase: WizardPhase,
    name: String,
    interests: BTreeSet<String>,
    followed_authors: BTreeSet<String>,
    avatar: AvatarDescriptor,
    last_error: Option<String>,
}

impl OnboardingWizard {
    pub fn new(user: Identity, avatar: AvatarDescriptor) -> Self {
        Self {
            user,
            step: Step::Welcome,
            phase: WizardPhase::Editing,
            name: String::new(),
            interests: BTreeSet::new(),
            followed_authors: BTreeSet::new(),
            avatar,
            last_error: None,
        }
    }

    /// Start with a freshly generated avatar
    pub fn with_random_avatar(user: Identity) -> Self {
        Self::new(user, AvatarDescriptor::random())
    }

    pub fn user(&self) -> &Identity {
        &self.user
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// Completion percentage shown above the wizard
    pub fn progress_percent(&self) -> u8 {
        self.step.number() * 100 / TOTAL_STEPS
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn interests(&self) -> &BTreeSet<String> {
        &self.interests
    }

    /// Toggle a catalog interest; returns whether it is now selected
    pub fn toggle_interest(&mut self, tag: &str) -> Result<bool> {
        if !catalog::is_known_interest(tag) {
            return Err(Error::InvalidInput(format!("Unknown interest: {}", tag)));
        }
        Ok(toggle(&mut self.interests, tag))
    }

    pub fn followed_authors(&self) -> &BTreeSet<String> {
        &self.followed_authors
    }

    /// Toggle a catalog author by id; returns whether it is now followed
    pub fn toggle_author(&mut self, author_id: &str) -> Result<bool> {
        let author = catalog::find_author(author_id)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown author: {}", author_id)))?;
        Ok(toggle(&mut self.followed_authors, &author.id.to_string()))
    }

    pub fn avatar(&self) -> &AvatarDescriptor {
        &self.avatar
    }

    pub fn edit_avatar(&mut self, edit: AvatarEdit) {
        self.avatar.apply(edit);
    }

    pub fn regenerate_avatar<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.avatar = AvatarDescriptor::generate(rng);
    }

    /// Error from the last failed submission, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Reason the current step cannot be left forward, if any
    pub fn blocked_reason(&self) -> Option<&'static str> {
        match self.step {
            Step::Welcome if self.name.trim().is_empty() => Some("Please enter your name"),
            Step::Interests if self.interests.is_empty() => {
                Some("Please select at least one interest")
            }
            _ => None,
        }
    }

    pub fn can_advance(&self) -> bool {
        self.step != Step::Summary && self.blocked_reason().is_none()
    }

    /// Advance one step if the current step's gate passes
    pub fn next(&mut self) -> Result<Step> {
        if let Some(reason) = self.blocked_reason() {
            return Err(Error::InvalidInput(reason.to_string()));
        }
        if self.step == Step::Summary {
            return Err(Error::InvalidInput("Already on the final step".to_string()));
        }
        self.step = self.step.next();
        debug!(step = self.step.number(), "Onboarding advanced");
        Ok(self.step)
    }

    /// Retreat one step; no-op on the first step
    pub fn back(&mut self) -> Step {
        if self.phase == WizardPhase::Editing {
            self.step = self.step.previous();
        }
        self.step
    }

    /// Aggregate payload for the completion request
    pub fn submission(&self) -> Result<OnboardingSubmission> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Please enter your name".to_string()));
        }
        if self.interests.is_empty() {
            return Err(Error::InvalidInput(
                "Please select at least one interest".to_string(),
            ));
        }

        Ok(OnboardingSubmission {
            user_id: self.user.to_string(),
            name: name.to_string(),
            interests: self.interests.iter().cloned().collect(),
            followed_authors: self.followed_authors.iter().cloned().collect(),
            avatar: self.avatar,
        })
    }

    /// Submit the profile from the summary step
    ///
    /// One-shot: after success the wizard is `Submitted` and later calls return
    /// the home route without another request. On failure the wizard stays on
    /// the summary step with its data intact so the user can retry. The
    /// exclusive borrow rules out a second submission while one is in flight.
    pub async fn complete(&mut self, backend: &dyn Backend, events: &EventBus) -> Result<Route> {
        if self.phase == WizardPhase::Submitted {
            return Ok(Route::Home);
        }
        if self.step != Step::Summary {
            return Err(Error::InvalidInput(
                "Onboarding can only be completed from the final step".to_string(),
            ));
        }

        let submission = self.submission()?;
        self.last_error = None;

        match backend.complete_onboarding(&submission).await {
            Ok(()) => {
                info!(user_id = %self.user, "Onboarding completed");
                self.phase = WizardPhase::Submitted;
                events.emit_lossy(ClientEvent::Navigate { route: Route::Home });
                Ok(Route::Home)
            }
            Err(e) => {
                error!(user_id = %self.user, "Failed to complete onboarding: {}", e);
                self.last_error = Some("Failed to complete onboarding. Please try again.".to_string());
                events.emit_lossy(ClientEvent::error(
                    "Failed to complete onboarding. Please try again.",
                ));
                Err(e)
            }
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}
