use serde::{Deserialize, Serialize};

/// Screens of the authentication flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScreen {
    Login,
    Signup,
}

/// The four tabs of the main shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Home,
    Gigs,
    Merch,
    Contact,
}

/// Action in the header's left slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAction {
    Back,
    Logout,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Gigs, Tab::Merch, Tab::Contact];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Gigs => "Gigs",
            Tab::Merch => "Merchandise",
            Tab::Contact => "Contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Merch => "Merch",
            other => other.title(),
        }
    }

    pub fn header_action(self) -> HeaderAction {
        match self {
            Tab::Home => HeaderAction::Logout,
            _ => HeaderAction::Back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", content = "screen", rename_all = "lowercase")]
pub enum Route {
    Auth(AuthScreen),
    Main(Tab),
}

impl Route {
    pub const START: Route = Route::Auth(AuthScreen::Login);
    pub const HOME: Route = Route::Main(Tab::Home);
}

/// Resolve where a navigation request actually lands.
///
/// An active session is the only thing that separates the auth flow from
/// the main shell: without one every main route leads to login, with one
/// the auth screens lead home.
pub fn gate(session_active: bool, requested: Route) -> Route {
    match (session_active, requested) {
        (true, Route::Auth(_)) => Route::HOME,
        (false, Route::Main(_)) => Route::START,
        (_, route) => route,
    }
}
