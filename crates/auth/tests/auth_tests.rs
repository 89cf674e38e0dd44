use auth::{AuthError, AuthService};
use configuration::settings::AuthSettings;

fn service() -> AuthService {
    AuthService::new(&AuthSettings {
        jwt_secret: "test-secret-test-secret-test-sec".to_string(),
        token_ttl_minutes: 60,
    })
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let auth = service();
    auth.register("alice", "hunter2").await.unwrap();

    let token = auth.login("alice", "hunter2").await.unwrap();
    let identity = auth.authenticate(&token).unwrap();
    assert_eq!(identity, "alice");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let auth = service();
    auth.register("alice", "hunter2").await.unwrap();
    let err = auth.register("alice", "other").await.unwrap_err();
    assert!(matches!(err, AuthError::UserExists(_)));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_identical() {
    let auth = service();
    auth.register("alice", "hunter2").await.unwrap();

    let wrong_password = auth.login("alice", "nope").await.unwrap_err();
    let unknown_user = auth.login("mallory", "nope").await.unwrap_err();
    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn garbage_token_is_unauthenticated() {
    let auth = service();
    let err = auth.authenticate("not-a-token").unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated));
}

#[tokio::test]
async fn token_from_a_different_secret_is_rejected() {
    let auth = service();
    auth.register("alice", "hunter2").await.unwrap();
    let token = auth.login("alice", "hunter2").await.unwrap();

    let other = AuthService::new(&AuthSettings {
        jwt_secret: "another-secret-another-secret-ab".to_string(),
        token_ttl_minutes: 60,
    });
    assert!(matches!(
        other.authenticate(&token).unwrap_err(),
        AuthError::Unauthenticated
    ));
}

#[tokio::test]
async fn empty_registration_input_is_rejected() {
    let auth = service();
    assert!(matches!(
        auth.register("", "pw").await.unwrap_err(),
        AuthError::InvalidInput(_)
    ));
    assert!(matches!(
        auth.register("alice", "").await.unwrap_err(),
        AuthError::InvalidInput(_)
    ));
}
