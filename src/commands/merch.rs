use serde::Serialize;
use tauri::State;

use crate::db::merch::MerchItem;
use crate::error::AppError;
use crate::screens::{MerchForm, MerchScreen, Prompt};
use crate::state::AppState;

/// What the merch screen renders
#[derive(Debug, Serialize)]
pub struct MerchView {
    pub items: Vec<MerchItem>,
    pub notice: Option<&'static str>,
}

impl MerchView {
    fn of(screen: &MerchScreen) -> Self {
        Self {
            items: screen.items().to_vec(),
            notice: screen.storage_notice(),
        }
    }
}

#[tauri::command]
pub async fn merch_view(state: State<'_, AppState>) -> Result<MerchView, AppError> {
    Ok(MerchView::of(&*state.merch.lock().await))
}

#[tauri::command]
pub async fn merch_refresh(state: State<'_, AppState>) -> Result<MerchView, AppError> {
    let mut screen = state.merch.lock().await;
    screen.refresh().await?;
    Ok(MerchView::of(&screen))
}

#[tauri::command]
pub async fn merch_add(state: State<'_, AppState>, form: MerchForm) -> Result<MerchView, Prompt> {
    let mut screen = state.merch.lock().await;
    screen.form = form;
    screen.submit().await?;
    Ok(MerchView::of(&screen))
}

#[tauri::command]
pub async fn merch_request_delete(state: State<'_, AppState>, id: i64) -> Result<Prompt, AppError> {
    Ok(state.merch.lock().await.request_delete(id))
}

#[tauri::command]
pub async fn merch_delete(state: State<'_, AppState>, id: i64) -> Result<MerchView, Prompt> {
    let mut screen = state.merch.lock().await;
    screen.delete(id).await?;
    Ok(MerchView::of(&screen))
}

/// Step the stock of one item by `delta` (usually +1 or -1)
#[tauri::command]
pub async fn merch_adjust_stock(
    state: State<'_, AppState>,
    id: i64,
    delta: i64,
) -> Result<MerchView, Prompt> {
    let mut screen = state.merch.lock().await;
    screen.adjust_stock(id, delta).await?;
    Ok(MerchView::of(&screen))
}
