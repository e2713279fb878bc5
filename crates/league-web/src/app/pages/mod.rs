pub mod home;
pub mod matches;
pub mod not_found;
pub mod signin;
pub mod signup;
pub mod standings;
pub mod teams;

pub use home::HomePage;
pub use matches::MatchesPage;
pub use not_found::{ConfigErrorPage, NotFoundPage};
pub use signin::SignInPage;
pub use signup::SignUpPage;
pub use standings::StandingsPage;
pub use teams::TeamsPage;
