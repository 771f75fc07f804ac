use serde::Serialize;
use tauri::State;

use crate::db::gigs::Gig;
use crate::error::AppError;
use crate::screens::{GigForm, GigsScreen, Prompt};
use crate::state::AppState;

/// What the gigs screen renders
#[derive(Debug, Serialize)]
pub struct GigsView {
    pub gigs: Vec<Gig>,
    pub notice: Option<&'static str>,
}

impl GigsView {
    fn of(screen: &GigsScreen) -> Self {
        Self {
            gigs: screen.gigs().to_vec(),
            notice: screen.storage_notice(),
        }
    }
}

#[tauri::command]
pub async fn gigs_view(state: State<'_, AppState>) -> Result<GigsView, AppError> {
    Ok(GigsView::of(&*state.gigs.lock().await))
}

#[tauri::command]
pub async fn gigs_refresh(state: State<'_, AppState>) -> Result<GigsView, AppError> {
    let mut screen = state.gigs.lock().await;
    screen.refresh().await?;
    Ok(GigsView::of(&screen))
}

#[tauri::command]
pub async fn gigs_add(state: State<'_, AppState>, form: GigForm) -> Result<GigsView, Prompt> {
    let mut screen = state.gigs.lock().await;
    screen.form = form;
    screen.submit().await?;
    Ok(GigsView::of(&screen))
}

/// Confirmation to show before `gigs_delete`
#[tauri::command]
pub async fn gigs_request_delete(state: State<'_, AppState>, id: i64) -> Result<Prompt, AppError> {
    Ok(state.gigs.lock().await.request_delete(id))
}

#[tauri::command]
pub async fn gigs_delete(state: State<'_, AppState>, id: i64) -> Result<GigsView, Prompt> {
    let mut screen = state.gigs.lock().await;
    screen.delete(id).await?;
    Ok(GigsView::of(&screen))
}
