pub mod auth;
pub mod gigs;
pub mod merch;

use tauri::State;

use crate::error::AppError;
use crate::screens::{navigation, ContactInfo, Route, Stats};
use crate::state::AppState;

/// Resolve a navigation request against the current session
#[tauri::command]
pub fn navigate(state: State<'_, AppState>, route: Route) -> Route {
    navigation::gate(state.session.is_active(), route)
}

#[tauri::command]
pub async fn home_stats(state: State<'_, AppState>) -> Result<Stats, AppError> {
    Ok(state.home.lock().await.load_stats().await)
}

#[tauri::command]
pub fn contact_info() -> ContactInfo {
    ContactInfo::new()
}
