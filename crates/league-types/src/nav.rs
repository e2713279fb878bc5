use std::fmt;

/// Navigable views of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Home,
    Teams,
    Matches,
    Standings,
    SignIn,
    SignUp,
}

impl Destination {
    /// Views listed in the navigation bar for every visitor.
    pub const BROWSE: [Destination; 3] = [Destination::Teams, Destination::Matches, Destination::Standings];

    pub fn path(self) -> &'static str {
        match self {
            Destination::Home => "/",
            Destination::Teams => "/teams",
            Destination::Matches => "/matches",
            Destination::Standings => "/standings",
            Destination::SignIn => "/signin",
            Destination::SignUp => "/signup",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Destination::Home => "Home",
            Destination::Teams => "Teams",
            Destination::Matches => "Matches",
            Destination::Standings => "Standings",
            Destination::SignIn => "Sign In",
            Destination::SignUp => "Sign Up",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
