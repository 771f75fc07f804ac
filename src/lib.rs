pub mod auth;
#[cfg(feature = "app")]
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod platform;
pub mod repository;
pub mod screens;
pub mod state;
pub mod validation;

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;

    use tauri::Manager;

    use crate::auth::firebase::FirebaseAuthClient;
    use crate::auth::IdentityProvider;
    use crate::config::AppConfig;
    use crate::db::Database;
    use crate::state::AppState;

    let config = AppConfig::from_env();
    crate::logging::init(&config.log_level);
    config.report_missing();

    tauri::Builder::default()
        .setup(move |app| {
            // the database file lives in the app data directory and is only
            // opened on first use
            let data_dir = app.path().app_data_dir()?;
            let db = Arc::new(Database::open(config.db_path(&data_dir)));
            let capability = crate::platform::detect(config.storage);
            let identity: Arc<dyn IdentityProvider> =
                Arc::new(FirebaseAuthClient::new(&config.firebase)?);
            app.manage(AppState::new(db, capability, identity));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::navigate,
            commands::home_stats,
            commands::contact_info,
            commands::auth::auth_login,
            commands::auth::auth_signup,
            commands::auth::auth_logout,
            commands::auth::auth_status,
            commands::gigs::gigs_view,
            commands::gigs::gigs_refresh,
            commands::gigs::gigs_add,
            commands::gigs::gigs_request_delete,
            commands::gigs::gigs_delete,
            commands::merch::merch_view,
            commands::merch::merch_refresh,
            commands::merch::merch_add,
            commands::merch::merch_request_delete,
            commands::merch::merch_delete,
            commands::merch::merch_adjust_stock,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
