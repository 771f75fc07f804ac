use tauri::State;

use crate::screens::{Prompt, Route};
use crate::state::AppState;

#[tauri::command]
pub async fn auth_login(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<Route, Prompt> {
    let mut screen = state.login.lock().await;
    screen.email = email;
    screen.password = password;
    screen.submit().await
}

#[tauri::command]
pub async fn auth_signup(
    state: State<'_, AppState>,
    email: String,
    password: String,
    confirm: String,
) -> Result<Route, Prompt> {
    let mut screen = state.signup.lock().await;
    screen.email = email;
    screen.password = password;
    screen.confirm = confirm;
    screen.submit().await
}

#[tauri::command]
pub async fn auth_logout(state: State<'_, AppState>) -> Result<Route, Prompt> {
    Ok(state.home.lock().await.logout().await)
}

/// Whether a session is active
#[tauri::command]
pub fn auth_status(state: State<'_, AppState>) -> bool {
    state.session.is_active()
}
