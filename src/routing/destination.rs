use crate::auth::Role;

/// Static access policy for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccess {
    pub requires_auth: bool,
    pub required_role: Option<Role>,
}

impl RouteAccess {
    const PUBLIC: RouteAccess = RouteAccess { requires_auth: false, required_role: None };

    const fn role(role: Role) -> RouteAccess {
        RouteAccess {
            requires_auth: true,
            required_role: Some(role),
        }
    }
}

/// Navigable pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    // Public and authentication pages
    Login,
    Register,
    Home,
    // Administrator dashboard
    AdminHome,
    PersonalData,
    ClassroomChangesMeetings,
    MeetingManagement,
    ClassroomsSharedSpaces,
    // Teacher dashboard
    TeacherHome,
    Reservations,
    SpaceAvailability,
    BreakdownReports,
}

impl Destination {
    /// Access requirement for this destination. Static configuration, not
    /// mutable at runtime.
    pub fn access(&self) -> RouteAccess {
        match self {
            Destination::Login | Destination::Register | Destination::Home => RouteAccess::PUBLIC,
            Destination::AdminHome
            | Destination::PersonalData
            | Destination::ClassroomChangesMeetings
            | Destination::MeetingManagement
            | Destination::ClassroomsSharedSpaces => RouteAccess::role(Role::Admin),
            Destination::TeacherHome
            | Destination::Reservations
            | Destination::SpaceAvailability
            | Destination::BreakdownReports => RouteAccess::role(Role::Teacher),
        }
    }

    /// Whether this is the sign-in/registration entry point, which an
    /// already-authenticated user is steered away from.
    pub fn is_entry(&self) -> bool {
        matches!(self, Destination::Login | Destination::Register)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::Register => "/register",
            Destination::Home => "/home",
            Destination::AdminHome => "/dashboard-admin/home-admin",
            Destination::PersonalData => "/dashboard-admin/personal-data",
            Destination::ClassroomChangesMeetings => "/dashboard-admin/classroom-changes-meetings",
            Destination::MeetingManagement => {
                "/dashboard-admin/classroom-changes-meetings/meeting-management"
            }
            Destination::ClassroomsSharedSpaces => "/dashboard-admin/classrooms-shared-spaces",
            Destination::TeacherHome => "/dashboard-teacher/home-teacher",
            Destination::Reservations => "/dashboard-teacher/reservations",
            Destination::SpaceAvailability => "/dashboard-teacher/reservations/space-availability",
            Destination::BreakdownReports => "/dashboard-teacher/breakdown-reports",
        }
    }

    /// Get the display title for this destination.
    pub fn title(&self) -> &'static str {
        match self {
            Destination::Login => "Login",
            Destination::Register => "Register",
            Destination::Home => "Home",
            Destination::AdminHome => "Home Admin",
            Destination::PersonalData => "Personal Data",
            Destination::ClassroomChangesMeetings => "Classroom Changes & Meetings",
            Destination::MeetingManagement => "Meeting Management",
            Destination::ClassroomsSharedSpaces => "Classrooms & Shared Spaces",
            Destination::TeacherHome => "Home Teacher",
            Destination::Reservations => "Reservations",
            Destination::SpaceAvailability => "My Reservations",
            Destination::BreakdownReports => "Breakdown Reports",
        }
    }
}

impl Role {
    /// The dashboard a user of this role lands on.
    pub fn home(self) -> Destination {
        match self {
            Role::Admin => Destination::AdminHome,
            Role::Teacher => Destination::TeacherHome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_pages_require_nothing() {
        for dest in [Destination::Login, Destination::Register, Destination::Home] {
            let access = dest.access();
            assert!(!access.requires_auth);
            assert!(access.required_role.is_none());
        }
    }

    #[test]
    fn test_dashboards_require_matching_role() {
        assert_eq!(Destination::AdminHome.access().required_role, Some(Role::Admin));
        assert_eq!(
            Destination::MeetingManagement.access().required_role,
            Some(Role::Admin)
        );
        assert_eq!(
            Destination::BreakdownReports.access().required_role,
            Some(Role::Teacher)
        );
    }

    #[test]
    fn test_role_homes() {
        assert_eq!(Role::Admin.home(), Destination::AdminHome);
        assert_eq!(Role::Teacher.home(), Destination::TeacherHome);
    }
}
