mod common;

use calcbook::core::{AuthError, CoreError};
use calcbook::domain::{Credential, Operation, OwnerId};

use common::{alice, bob, json_api, temp_home};

#[test]
fn records_survive_reopening_the_store() {
    let home = temp_home();
    let record = {
        let (api, _) = json_api(&home);
        api.add(&alice(), Operation::Subtract, 10.0, 2.5).unwrap()
    };

    let (api, _) = json_api(&home);
    let reloaded = api.read(&alice(), record.id).unwrap();
    assert_eq!(reloaded, record);
    assert_eq!(reloaded.result, 7.5);
}

#[test]
fn owners_only_see_their_own_records() {
    let home = temp_home();
    let (api, _) = json_api(&home);
    let mine = api.add(&alice(), Operation::Add, 1.0, 2.0).unwrap();
    api.add(&bob(), Operation::Multiply, 3.0, 4.0).unwrap();

    let listed = api.browse(&alice()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mine.id);

    assert!(matches!(
        api.read(&bob(), mine.id),
        Err(CoreError::NotFound(id)) if id == mine.id
    ));
    assert!(matches!(
        api.delete(&bob(), mine.id),
        Err(CoreError::NotFound(_))
    ));
    assert!(api.read(&alice(), mine.id).is_ok());
}

#[test]
fn edit_recomputes_and_keeps_creation_time() {
    let home = temp_home();
    let (api, _) = json_api(&home);
    let original = api.add_named(&alice(), "divide", 9.0, 3.0).unwrap();
    let edited = api.edit(&alice(), original.id, 1.0, 4.0).unwrap();

    assert_eq!(edited.result, 0.25);
    assert_eq!(edited.operation, Operation::Divide);
    assert_eq!(edited.created_at, original.created_at);
    assert!(edited.updated_at >= original.updated_at);

    let err = api.edit(&alice(), original.id, 1.0, 0.0).unwrap_err();
    assert!(matches!(err, CoreError::DivisionByZero));
    assert_eq!(api.read(&alice(), original.id).unwrap().result, 0.25);
}

#[test]
fn revoked_and_unknown_tokens_are_refused() {
    let home = temp_home();
    let (api, identity) = json_api(&home);
    api.add(&alice(), Operation::Add, 1.0, 1.0).unwrap();

    assert!(identity.revoke(&alice()));
    assert!(matches!(
        api.browse(&alice()),
        Err(CoreError::Authentication(AuthError::Revoked))
    ));
    assert!(matches!(
        api.browse(&Credential::new("stranger")),
        Err(CoreError::Authentication(AuthError::InvalidToken))
    ));
    assert!(matches!(
        api.browse(&Credential::new("  ")),
        Err(CoreError::Authentication(AuthError::MissingToken))
    ));
    assert_eq!(api.authenticate(&bob()).unwrap(), OwnerId(2));
}

#[test]
fn summary_counts_per_operation() {
    let home = temp_home();
    let (api, _) = json_api(&home);
    api.add(&alice(), Operation::Add, 1.0, 1.0).unwrap();
    api.add(&alice(), Operation::Add, 2.0, 2.0).unwrap();
    api.add(&alice(), Operation::Multiply, 2.0, 2.0).unwrap();
    api.add(&bob(), Operation::Divide, 2.0, 2.0).unwrap();

    let summary = api.summary(&alice()).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.per_operation.get(&Operation::Add), Some(&2));
    assert_eq!(summary.per_operation.get(&Operation::Multiply), Some(&1));
    assert_eq!(summary.per_operation.get(&Operation::Divide), None);
}
