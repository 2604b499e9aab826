//! Named application destinations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A view the application can navigate to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Dashboard,
    Patients,
    Doctors,
    Appointments,
    Records,
    Pharmacy,
    Reports,
    Schedule,
    Messages,
    Notifications,
    Settings,
    Profile,
    BookBed,
    Revenue,
    Login,
    Signup,
}

impl Destination {
    /// Every destination, in sidebar order.
    pub const ALL: [Destination; 16] = [
        Destination::Dashboard,
        Destination::Patients,
        Destination::Doctors,
        Destination::Appointments,
        Destination::Records,
        Destination::Pharmacy,
        Destination::Reports,
        Destination::Schedule,
        Destination::Messages,
        Destination::Notifications,
        Destination::Settings,
        Destination::Profile,
        Destination::BookBed,
        Destination::Revenue,
        Destination::Login,
        Destination::Signup,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Destination::Dashboard => "/",
            Destination::Patients => "/patients",
            Destination::Doctors => "/doctors",
            Destination::Appointments => "/appointments",
            Destination::Records => "/records",
            Destination::Pharmacy => "/pharmacy",
            Destination::Reports => "/reports",
            Destination::Schedule => "/schedule",
            Destination::Messages => "/messages",
            Destination::Notifications => "/notifications",
            Destination::Settings => "/settings",
            Destination::Profile => "/profile",
            Destination::BookBed => "/book-bed",
            Destination::Revenue => "/revenue",
            Destination::Login => "/login",
            Destination::Signup => "/signup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Destination::Dashboard => "Dashboard",
            Destination::Patients => "Patients",
            Destination::Doctors => "Doctors",
            Destination::Appointments => "Appointments",
            Destination::Records => "Medical Records",
            Destination::Pharmacy => "Pharmacy",
            Destination::Reports => "Reports",
            Destination::Schedule => "Schedule",
            Destination::Messages => "Messages",
            Destination::Notifications => "Notifications",
            Destination::Settings => "Settings",
            Destination::Profile => "Profile",
            Destination::BookBed => "Book Bed",
            Destination::Revenue => "Revenue",
            Destination::Login => "Login",
            Destination::Signup => "Sign Up",
        }
    }

    /// Reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Destination::Login | Destination::Signup)
    }

    /// Resolve a location path. Query strings, fragments and a trailing slash
    /// are ignored; "/dashboard" is accepted as an alias of "/".
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" | "/dashboard" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|d| d.path() == path)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| s.to_string())
    }
}
