//! Tests for the JSON file user store.

use super::*;
use crate::domain::ports::{MockUserSeedSource, UserSeedSourceError};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("Data").join("users.json")
    }

    fn snapshot(&self) -> UserSnapshotFile {
        UserSnapshotFile::new(self.path()).expect("valid snapshot path")
    }

    fn write(&self, contents: &str) {
        self.snapshot().write(contents).expect("write snapshot");
    }

    fn read_json(&self) -> Value {
        let contents = self
            .snapshot()
            .read()
            .expect("read snapshot")
            .expect("snapshot exists");
        serde_json::from_str(&contents).expect("snapshot is JSON")
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: TempDir::new().expect("temp dir"),
    }
}

fn unused_seed() -> MockUserSeedSource {
    let mut seed = MockUserSeedSource::new();
    seed.expect_fetch_users().never();
    seed
}

fn seed_returning(
    result: Result<Vec<User>, UserSeedSourceError>,
) -> MockUserSeedSource {
    let mut seed = MockUserSeedSource::new();
    seed.expect_fetch_users()
        .times(1)
        .return_once(move || result);
    seed
}

fn user(id: u32, name: &str) -> User {
    User::new(UserId::new(id), UserProfile::named(name))
}

fn names(users: &[User]) -> Vec<(u32, String)> {
    users
        .iter()
        .map(|user| (user.id().get(), user.name().to_owned()))
        .collect()
}

#[rstest]
#[tokio::test]
async fn initialise_seeds_and_persists_when_snapshot_missing(workspace: Workspace) {
    let seed = seed_returning(Ok(vec![user(1, "Leanne Graham"), user(2, "Ervin Howell")]));

    let store = JsonFileUserStore::initialise(workspace.path(), &seed)
        .await
        .expect("store initialises");

    let users = store.list().await.expect("list users");
    assert_eq!(
        names(&users),
        vec![(1, "Leanne Graham".to_owned()), (2, "Ervin Howell".to_owned())]
    );
    assert_eq!(
        workspace.read_json(),
        json!([{ "id": 1, "name": "Leanne Graham" }, { "id": 2, "name": "Ervin Howell" }])
    );
}

#[rstest]
#[case::timeout(UserSeedSourceError::timeout("5s elapsed"))]
#[case::status(UserSeedSourceError::status(502_u16))]
#[case::decode(UserSeedSourceError::decode("expected array"))]
#[tokio::test]
async fn initialise_falls_back_to_empty_when_seed_fails(
    workspace: Workspace,
    #[case] failure: UserSeedSourceError,
) {
    let seed = seed_returning(Err(failure));

    let store = JsonFileUserStore::initialise(workspace.path(), &seed)
        .await
        .expect("store initialises");

    assert!(store.list().await.expect("list users").is_empty());
    assert_eq!(workspace.read_json(), json!([]));
}

#[rstest]
#[tokio::test]
async fn initialise_loads_existing_snapshot_without_seeding(workspace: Workspace) {
    workspace.write(r#"[{ "id": 4, "name": "Ann", "email": "ann@example.test" }]"#);

    let store = JsonFileUserStore::initialise(workspace.path(), &unused_seed())
        .await
        .expect("store initialises");

    let found = store
        .get(UserId::new(4))
        .await
        .expect("get user")
        .expect("user exists");
    assert_eq!(found.profile().email.as_deref(), Some("ann@example.test"));
}

#[rstest]
#[tokio::test]
async fn initialise_starts_empty_on_corrupt_snapshot(workspace: Workspace) {
    workspace.write("{ not json");

    let store = JsonFileUserStore::initialise(workspace.path(), &unused_seed())
        .await
        .expect("store initialises");

    assert!(store.list().await.expect("list users").is_empty());
    assert_eq!(workspace.read_json(), json!([]));
}

#[tokio::test]
async fn initialise_rejects_paths_without_file_name() {
    let result = JsonFileUserStore::initialise("..", &unused_seed()).await;
    assert!(matches!(result, Err(UserStoreInitError::SnapshotPath(_))));
}

#[rstest]
#[tokio::test]
async fn add_assigns_increasing_ids_from_one(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(workspace.snapshot(), Vec::new());

    let ann = store.add(UserProfile::named("Ann")).await.expect("add Ann");
    let bo = store.add(UserProfile::named("Bo")).await.expect("add Bo");

    assert_eq!(ann.id(), UserId::new(1));
    assert_eq!(bo.id(), UserId::new(2));
    assert_eq!(
        workspace.read_json(),
        json!([{ "id": 1, "name": "Ann" }, { "id": 2, "name": "Bo" }])
    );
}

#[rstest]
#[tokio::test]
async fn add_continues_after_highest_loaded_id(workspace: Workspace) {
    let store =
        JsonFileUserStore::with_users(workspace.snapshot(), vec![user(7, "Ann"), user(3, "Bo")]);

    let created = store.add(UserProfile::named("Cy")).await.expect("add Cy");

    assert_eq!(created.id(), UserId::new(8));
}

#[rstest]
#[tokio::test]
async fn add_restarts_at_one_once_every_user_is_deleted(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(workspace.snapshot(), Vec::new());
    let ann = store.add(UserProfile::named("Ann")).await.expect("add Ann");
    store.delete(ann.id()).await.expect("delete Ann");

    let bo = store.add(UserProfile::named("Bo")).await.expect("add Bo");

    assert_eq!(bo.id(), UserId::FIRST);
}

#[rstest]
#[tokio::test]
async fn add_reuses_the_id_of_a_deleted_maximum(workspace: Workspace) {
    let store =
        JsonFileUserStore::with_users(workspace.snapshot(), vec![user(1, "Ann"), user(2, "Bo")]);
    store.delete(UserId::new(2)).await.expect("delete Bo");

    let cy = store.add(UserProfile::named("Cy")).await.expect("add Cy");

    assert_eq!(cy.id(), UserId::new(2));
}

#[rstest]
#[tokio::test]
async fn add_assigns_the_same_id_with_or_without_a_reload(workspace: Workspace) {
    let live = JsonFileUserStore::with_users(workspace.snapshot(), vec![user(1, "Ann")]);
    let bo = live.add(UserProfile::named("Bo")).await.expect("add Bo");
    live.delete(bo.id()).await.expect("delete Bo");

    let reloaded = JsonFileUserStore::initialise(workspace.path(), &unused_seed())
        .await
        .expect("reload snapshot");
    let after_reload = reloaded.add(UserProfile::named("Cy")).await.expect("add Cy");
    let without_reload = live.add(UserProfile::named("Cy")).await.expect("add Cy");

    assert_eq!(after_reload.id(), without_reload.id());
    assert_eq!(after_reload.id(), UserId::new(2));
}

#[rstest]
#[tokio::test]
async fn add_fails_once_identifiers_are_exhausted(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(workspace.snapshot(), vec![user(u32::MAX, "Max")]);

    let result = store.add(UserProfile::named("Overflow")).await;

    assert_eq!(result, Err(UserStoreError::IdsExhausted));
    assert_eq!(store.list().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_replaces_profile_and_persists(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(workspace.snapshot(), vec![user(1, "Ann")]);
    let profile = UserProfile {
        website: Some("ann.example".to_owned()),
        ..UserProfile::named("Annie")
    };

    let updated = store
        .update(UserId::new(1), profile.clone())
        .await
        .expect("update")
        .expect("user exists");

    assert_eq!(updated.id(), UserId::new(1));
    assert_eq!(updated.profile(), &profile);
    assert_eq!(
        workspace.read_json(),
        json!([{ "id": 1, "name": "Annie", "website": "ann.example" }])
    );
}

#[rstest]
#[tokio::test]
async fn update_of_unknown_id_changes_nothing(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(workspace.snapshot(), vec![user(1, "Ann")]);

    let outcome = store
        .update(UserId::new(9), UserProfile::named("Ghost"))
        .await
        .expect("update");

    assert!(outcome.is_none());
    assert!(
        workspace.snapshot().read().expect("read").is_none(),
        "a miss must not persist"
    );
    assert_eq!(names(&store.list().await.expect("list")), vec![(1, "Ann".to_owned())]);
}

#[rstest]
#[tokio::test]
async fn delete_removes_exactly_one_user(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(
        workspace.snapshot(),
        vec![user(1, "Ann"), user(2, "Bo")],
    );

    let removed = store
        .delete(UserId::new(1))
        .await
        .expect("delete")
        .expect("user existed");

    assert_eq!(removed.name(), "Ann");
    assert!(store.get(UserId::new(1)).await.expect("get").is_none());
    assert_eq!(workspace.read_json(), json!([{ "id": 2, "name": "Bo" }]));
    assert!(store.delete(UserId::new(1)).await.expect("delete").is_none());
}

#[rstest]
#[tokio::test]
async fn mutations_survive_reload(workspace: Workspace) {
    let store = JsonFileUserStore::with_users(workspace.snapshot(), Vec::new());
    let ann = store.add(UserProfile::named("Ann")).await.expect("add Ann");
    store.add(UserProfile::named("Bo")).await.expect("add Bo");
    store
        .update(ann.id(), UserProfile::named("Annie"))
        .await
        .expect("update Ann");
    store.add(UserProfile::named("Cy")).await.expect("add Cy");
    store.delete(UserId::new(2)).await.expect("delete Bo");
    let before = store.list().await.expect("list before reload");

    let reloaded = JsonFileUserStore::initialise(workspace.path(), &unused_seed())
        .await
        .expect("reload");

    assert_eq!(reloaded.list().await.expect("list after reload"), before);
}

#[rstest]
#[tokio::test]
async fn write_failures_do_not_fail_mutations(workspace: Workspace) {
    // A regular file where the snapshot directory should be makes every write fail.
    let blocker = workspace.dir.path().join("blocked");
    UserSnapshotFile::new(&blocker)
        .expect("valid path")
        .write("occupied")
        .expect("create blocker file");
    let snapshot = UserSnapshotFile::new(blocker.join("users.json")).expect("valid path");
    let store = JsonFileUserStore::with_users(snapshot, Vec::new());

    let created = store.add(UserProfile::named("Ann")).await.expect("add still succeeds");

    assert_eq!(created.id(), UserId::FIRST);
    assert!(matches!(
        store.persist().await,
        Err(UserStoreError::Persistence { .. })
    ));
}
