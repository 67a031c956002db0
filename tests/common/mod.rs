#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use calcbook::core::{CalculationApi, CalculationService, TokenIdentityProvider};
use calcbook::domain::{Credential, OwnerId};
use calcbook::storage::JsonRecordStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";

/// Builds a JSON-backed API rooted at `data_root` with two granted owners.
pub fn json_api(
    data_root: &std::path::Path,
) -> (CalculationApi<JsonRecordStore>, Arc<TokenIdentityProvider>) {
    let store = JsonRecordStore::open(data_root).expect("open json store");
    let identity = Arc::new(TokenIdentityProvider::with_grants([
        (ALICE.to_string(), OwnerId(1)),
        (BOB.to_string(), OwnerId(2)),
    ]));
    let api = CalculationApi::new(CalculationService::new(store), identity.clone());
    (api, identity)
}

pub fn alice() -> Credential {
    Credential::new(ALICE)
}

pub fn bob() -> Credential {
    Credential::new(BOB)
}
