use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::auth::SessionSnapshot;

use super::destination::Destination;

/// Outcome of evaluating a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Destination),
}

/// Decide whether a transition to `target` may proceed.
///
/// Pure function over the target's access requirement and the current
/// session snapshot; it never raises, it only allows or redirects.
pub fn check_navigation(target: Destination, session: &SessionSnapshot) -> Decision {
    let access = target.access();

    if !access.requires_auth {
        // A signed-in user has no business on the login or register page;
        // send them to their dashboard instead. With no recognizable role
        // there is no dashboard to pick, so the entry page stands.
        if target.is_entry() && session.is_authenticated {
            if let Some(role) = session.role {
                return Decision::Redirect(role.home());
            }
        }
        return Decision::Allow;
    }

    if !session.is_authenticated {
        return Decision::Redirect(Destination::Login);
    }

    match (access.required_role, session.role) {
        (None, _) => Decision::Allow,
        (Some(required), Some(role)) if role == required => Decision::Allow,
        // Valid user on the wrong dashboard: their own home, not login
        (Some(_), Some(role)) => Decision::Redirect(role.home()),
        (Some(_), None) => Decision::Redirect(Destination::Login),
    }
}

/// Tracks where the client currently is and holds at most one pending
/// redirect, queued by the request pipeline on authentication failure.
pub struct Navigator {
    current: RwLock<Destination>,
    pending: RwLock<Option<Destination>>,
}

impl Navigator {
    pub fn new(start: Destination) -> Self {
        Self {
            current: RwLock::new(start),
            pending: RwLock::new(None),
        }
    }

    pub fn current(&self) -> Destination {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempt a transition, applying the guard. A redirect is followed
    /// immediately; the returned decision tells the caller which happened.
    pub fn navigate(&self, target: Destination, session: &SessionSnapshot) -> Decision {
        let decision = check_navigation(target, session);
        let landed = match decision {
            Decision::Allow => target,
            Decision::Redirect(dest) => dest,
        };
        debug!(target = target.path(), landed = landed.path(), "navigation");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = landed;
        decision
    }

    /// Queue a redirect to login unless the client is already there.
    /// Used by the request pipeline when a call comes back 401.
    pub fn force_login_redirect(&self) {
        if self.current() == Destination::Login {
            return;
        }
        *self.pending.write().unwrap_or_else(PoisonError::into_inner) = Some(Destination::Login);
    }

    /// Consume the pending redirect, if any.
    pub fn take_pending_redirect(&self) -> Option<Destination> {
        self.pending
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn anonymous() -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: false,
            role: None,
        }
    }

    fn signed_in(role: Role) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: true,
            role: Some(role),
        }
    }

    #[test]
    fn test_public_page_allowed_for_anonymous() {
        assert_eq!(
            check_navigation(Destination::Home, &anonymous()),
            Decision::Allow
        );
        assert_eq!(
            check_navigation(Destination::Login, &anonymous()),
            Decision::Allow
        );
    }

    #[test]
    fn test_protected_page_redirects_anonymous_to_login() {
        assert_eq!(
            check_navigation(Destination::TeacherHome, &anonymous()),
            Decision::Redirect(Destination::Login)
        );
        assert_eq!(
            check_navigation(Destination::AdminHome, &anonymous()),
            Decision::Redirect(Destination::Login)
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_own_home() {
        // Teacher poking at an admin page lands on the teacher dashboard
        let decision = check_navigation(
            Destination::MeetingManagement,
            &signed_in(Role::Teacher),
        );
        assert_eq!(decision, Decision::Redirect(Destination::TeacherHome));

        let decision = check_navigation(Destination::Reservations, &signed_in(Role::Admin));
        assert_eq!(decision, Decision::Redirect(Destination::AdminHome));
    }

    #[test]
    fn test_matching_role_allowed() {
        assert_eq!(
            check_navigation(Destination::AdminHome, &signed_in(Role::Admin)),
            Decision::Allow
        );
        assert_eq!(
            check_navigation(Destination::BreakdownReports, &signed_in(Role::Teacher)),
            Decision::Allow
        );
    }

    #[test]
    fn test_authenticated_user_bounced_off_login() {
        assert_eq!(
            check_navigation(Destination::Login, &signed_in(Role::Admin)),
            Decision::Redirect(Destination::AdminHome)
        );
        assert_eq!(
            check_navigation(Destination::Register, &signed_in(Role::Teacher)),
            Decision::Redirect(Destination::TeacherHome)
        );
        // Plain public pages stay reachable
        assert_eq!(
            check_navigation(Destination::Home, &signed_in(Role::Admin)),
            Decision::Allow
        );
    }

    #[test]
    fn test_unrecognized_role_falls_back_to_login() {
        let session = SessionSnapshot {
            is_authenticated: true,
            role: None,
        };
        assert_eq!(
            check_navigation(Destination::AdminHome, &session),
            Decision::Redirect(Destination::Login)
        );
        // No dashboard to bounce to, so the login page itself stands
        assert_eq!(check_navigation(Destination::Login, &session), Decision::Allow);
    }

    #[test]
    fn test_navigator_follows_redirects() {
        let navigator = Navigator::new(Destination::Login);
        let decision = navigator.navigate(Destination::AdminHome, &signed_in(Role::Teacher));
        assert_eq!(decision, Decision::Redirect(Destination::TeacherHome));
        assert_eq!(navigator.current(), Destination::TeacherHome);
    }

    #[test]
    fn test_force_login_redirect_only_away_from_login() {
        let navigator = Navigator::new(Destination::TeacherHome);
        navigator.force_login_redirect();
        assert_eq!(navigator.take_pending_redirect(), Some(Destination::Login));
        // Consumed
        assert_eq!(navigator.take_pending_redirect(), None);

        let navigator = Navigator::new(Destination::Login);
        navigator.force_login_redirect();
        assert_eq!(navigator.take_pending_redirect(), None);
    }
}
