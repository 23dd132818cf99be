//! Từ điển Nghệ An: dialect <-> standard Vietnamese dictionary translator.
//! Main library: Tauri app setup, command registration, dictionary state.

pub mod dict;
pub mod resolve;
pub mod translate;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use dict::{DictEntry, Dictionary, LoadDiagnostic};
use resolve::{Direction, Resolution};

/// Dictionary data file, relative to the working directory.
pub const DICTIONARY_PATH: &str = "dictionary/nghe_an.json";

/// Shared application state managed by Tauri.
///
/// The dictionary is immutable; reloads build a fresh instance and swap
/// the `Arc`, so in-flight calls keep reading their old snapshot.
pub struct AppContext {
    dictionary: RwLock<Arc<Dictionary>>,
    diagnostics: RwLock<Vec<LoadDiagnostic>>,
}

impl AppContext {
    pub fn new(dictionary: Dictionary, diagnostics: Vec<LoadDiagnostic>) -> Self {
        Self {
            dictionary: RwLock::new(Arc::new(dictionary)),
            diagnostics: RwLock::new(diagnostics),
        }
    }

    fn snapshot(&self) -> Arc<Dictionary> {
        Arc::clone(&self.dictionary.read())
    }
}

// --- Tauri Commands ---

#[tauri::command]
fn translate_text(ctx: tauri::State<'_, AppContext>, text: String) -> String {
    translate::translate(&text, &ctx.snapshot())
}

#[tauri::command]
fn resolve_word(
    ctx: tauri::State<'_, AppContext>,
    token: String,
    direction: Direction,
) -> Resolution {
    resolve::resolve(&token, direction, &ctx.snapshot())
}

#[tauri::command]
fn list_entries(ctx: tauri::State<'_, AppContext>) -> Vec<DictEntry> {
    ctx.snapshot().entries().to_vec()
}

#[tauri::command]
fn load_diagnostics(ctx: tauri::State<'_, AppContext>) -> Vec<LoadDiagnostic> {
    ctx.diagnostics.read().clone()
}

#[tauri::command]
fn reload_dictionary(ctx: tauri::State<'_, AppContext>) -> Result<usize, String> {
    let (dictionary, diagnostics) =
        Dictionary::load_from_file(Path::new(DICTIONARY_PATH)).map_err(|e| {
            warn!(error = %e, "dictionary reload failed");
            e.to_string()
        })?;
    let count = dictionary.len();
    *ctx.dictionary.write() = Arc::new(dictionary);
    *ctx.diagnostics.write() = diagnostics;
    info!(entries = count, "dictionary reloaded");
    Ok(count)
}

/// Load the dictionary from disk, falling back to the compiled-in copy.
fn load_dictionary() -> (Dictionary, Vec<LoadDiagnostic>) {
    match Dictionary::load_from_file(Path::new(DICTIONARY_PATH)) {
        Ok((dictionary, diagnostics)) => {
            info!(
                entries = dictionary.len(),
                rejected = diagnostics.len(),
                "dictionary loaded"
            );
            (dictionary, diagnostics)
        }
        Err(e) => {
            warn!(error = %e, "dictionary file load failed, using built-in copy");
            Dictionary::builtin()
        }
    }
}

/// Build and run the Tauri application.
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nghedict=debug,tauri=info".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("nghedict starting");

    let (dictionary, diagnostics) = load_dictionary();
    if dictionary.is_empty() {
        warn!("dictionary is empty, translation will be a no-op");
    }

    tauri::Builder::default()
        .manage(AppContext::new(dictionary, diagnostics))
        .invoke_handler(tauri::generate_handler![
            translate_text,
            resolve_word,
            list_entries,
            load_diagnostics,
            reload_dictionary,
        ])
        .run(tauri::generate_context!())
        .expect("error while running nghedict");
}
