//! Onboarding entry guard

use super::wizard::OnboardingWizard;
use crate::api::Backend;
use crate::session::{Session, SessionState};
use readwise_common::avatar::AvatarDescriptor;
use readwise_common::events::{ClientEvent, EventBus};
use readwise_common::Route;
use tracing::{debug, info, warn};

/// Result of entering the onboarding route
#[derive(Debug)]
pub enum OnboardingEntry {
    /// Session provider has not resolved yet; nothing was requested
    Wait,
    Redirect(Route),
    Start(OnboardingWizard),
}

/// Decide the wizard's initial state
///
/// Signed-out sessions go to sign-in, onboarded ones to the home feed. A failed
/// status check opens the wizard rather than leaving the user stuck. Redirects
/// are also announced on `events` as [`ClientEvent::Navigate`].
pub async fn enter_onboarding(
    session: &dyn Session,
    backend: &dyn Backend,
    events: &EventBus,
    avatar: AvatarDescriptor,
) -> OnboardingEntry {
    let user = match session.state() {
        SessionState::Loading => {
            debug!("Session still loading, onboarding guard waiting");
            return OnboardingEntry::Wait;
        }
        SessionState::SignedOut => return redirect(events, Route::SignIn),
        SessionState::SignedIn(user) => user,
    };

    match backend.onboard_status(&user).await {
        Ok(true) => {
            info!(user_id = %user, "Already onboarded, redirecting home");
            redirect(events, Route::Home)
        }
        Ok(false) => OnboardingEntry::Start(OnboardingWizard::new(user, avatar)),
        Err(e) => {
            warn!(user_id = %user, "Onboarding status check failed, assuming not onboarded: {}", e);
            OnboardingEntry::Start(OnboardingWizard::new(user, avatar))
        }
    }
}

fn redirect(events: &EventBus, route: Route) -> OnboardingEntry {
    events.emit_lossy(ClientEvent::Navigate {
        route: route.clone(),
    });
    OnboardingEntry::Redirect(route)
}
