//! Service-level tests for join and login

use std::sync::Arc;

use platform::password::{Argon2Scheme, ClearTextPassword, HashingParams, PasswordScheme};
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::application::service::CredentialService;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountStore, InsertOutcome};
use crate::domain::value_object::username::Username;
use crate::error::{ErrorCode, UserResult};
use crate::infra::credential::HmacCredentialIssuer;
use crate::infra::memory::InMemoryAccountStore;

type TestService<S> = CredentialService<S, Argon2Scheme, HmacCredentialIssuer>;

const SECRET: [u8; 32] = [5u8; 32];

fn scheme() -> Argon2Scheme {
    Argon2Scheme::new(HashingParams::new(8, 1, 1), None).unwrap()
}

fn service_with<S: AccountStore>(store: Arc<S>) -> TestService<S> {
    CredentialService::new(
        store,
        Arc::new(scheme()),
        Arc::new(HmacCredentialIssuer::new(SECRET)),
    )
}

fn name(s: &str) -> Username {
    Username::new(s)
}

fn pw(s: &str) -> ClearTextPassword {
    ClearTextPassword::new(s)
}

fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[tokio::test]
async fn test_jungrak_scenario() {
    let store = Arc::new(InMemoryAccountStore::new());
    let service = service_with(Arc::clone(&store));

    let joined = service.join(name("jungrak"), pw("asdf1234")).await.unwrap();
    assert_eq!(joined.username, name("jungrak"));

    let err = service.join(name("jungrak"), pw("asdf1234")).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UsernameDuplicated));
    assert_eq!(store.count_by_username(&name("jungrak")).await.unwrap(), 1);

    let output = service.login(name("jungrak"), pw("asdf1234")).await.unwrap();
    assert!(platform::token::verify(&SECRET, output.credential.as_str()).is_ok());

    let err = service.login(name("jungrak"), pw("wrong")).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidPassword));

    let err = service.login(name("nobody"), pw("x")).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UsernameNotFound));
}

#[tokio::test]
async fn test_stored_hash_is_not_plaintext() {
    let store = Arc::new(InMemoryAccountStore::new());
    let service = service_with(Arc::clone(&store));

    service.join(name("jungrak"), pw("asdf1234")).await.unwrap();

    let account = store.find_by_username(&name("jungrak")).await.unwrap().unwrap();
    let phc = account.password_hash.as_phc_string();
    assert!(!phc.contains("asdf1234"));
    assert!(phc.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_random_pairs_round_trip_through_service() {
    let store = Arc::new(InMemoryAccountStore::new());
    let service = service_with(Arc::clone(&store));

    for i in 0..8 {
        let username = format!("user{i}");
        let password = random_string(12);
        let mut other = random_string(12);
        while other == password {
            other = random_string(12);
        }

        service.join(name(&username), pw(&password)).await.unwrap();
        assert!(service.login(name(&username), pw(&password)).await.is_ok());

        let err = service.login(name(&username), pw(&other)).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidPassword));
    }
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let service = service_with(Arc::new(InMemoryAccountStore::new()));

    service.join(name("jungrak"), pw("asdf1234")).await.unwrap();
    service.join(name("Jungrak"), pw("asdf1234")).await.unwrap();

    let err = service.login(name("JUNGRAK"), pw("asdf1234")).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UsernameNotFound));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_have_one_winner() {
    let store = Arc::new(InMemoryAccountStore::new());
    let service = Arc::new(service_with(Arc::clone(&store)));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.join(name("racer"), pw("asdf1234")).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err.code(), Some(ErrorCode::UsernameDuplicated)),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.count_by_username(&name("racer")).await.unwrap(), 1);
}

/// Store whose pre-check always misses, as if another join won the race
#[derive(Default)]
struct LateConflictStore {
    inner: InMemoryAccountStore,
}

impl AccountStore for LateConflictStore {
    async fn find_by_username(&self, _username: &Username) -> UserResult<Option<Account>> {
        Ok(None)
    }

    async fn insert(&self, account: &Account) -> UserResult<InsertOutcome> {
        self.inner.insert(account).await
    }

    async fn count_by_username(&self, username: &Username) -> UserResult<u64> {
        self.inner.count_by_username(username).await
    }
}

#[tokio::test]
async fn test_insert_conflict_after_clean_precheck_is_duplicated() {
    let store = Arc::new(LateConflictStore::default());
    let service = service_with(Arc::clone(&store));

    service.join(name("jungrak"), pw("asdf1234")).await.unwrap();

    let err = service.join(name("jungrak"), pw("other")).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UsernameDuplicated));
    assert_eq!(store.count_by_username(&name("jungrak")).await.unwrap(), 1);
}

#[tokio::test]
async fn test_login_uses_stored_hash_as_reference() {
    let store = Arc::new(InMemoryAccountStore::new());
    let service = service_with(Arc::clone(&store));
    service.join(name("jungrak"), pw("asdf1234")).await.unwrap();

    let account = store.find_by_username(&name("jungrak")).await.unwrap().unwrap();
    let phc = account.password_hash.as_phc_string().to_owned();

    // Submitting the hash itself as the password must not log in
    let err = service.login(name("jungrak"), pw(&phc)).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidPassword));
    assert!(scheme().verify(&pw("asdf1234"), &account.password_hash).unwrap());
}

#[tokio::test]
async fn test_from_config_wires_the_service() {
    let config = crate::application::config::UsersConfig {
        hashing: HashingParams::new(8, 1, 1),
        ..crate::application::config::UsersConfig::development()
    };
    let service = CredentialService::from_config(InMemoryAccountStore::new(), &config).unwrap();

    service.join(name("jungrak"), pw("asdf1234")).await.unwrap();
    let output = service.login(name("jungrak"), pw("asdf1234")).await.unwrap();
    assert!(platform::token::verify(&config.credential_secret, output.credential.as_str()).is_ok());
}
