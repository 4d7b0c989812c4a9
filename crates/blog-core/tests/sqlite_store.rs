use std::path::Path;

use blog_core::auth::{authenticate, register, SessionSlot};
use blog_core::export::write_export;
use blog_core::storage::{BlogStore, NewPost, PostUpdate, SqliteStore};
use blog_core::BlogError;
use tempfile::tempdir;

fn open(path: &Path) -> SqliteStore {
    let store = SqliteStore::open(path).expect("open should succeed");
    store.ensure_schema().expect("schema should be created");
    store
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("blog.db");

    let post_id = {
        let store = open(&path);
        register(&store, "alice", "pw").expect("register");
        let session = authenticate(&store, "alice", "pw").expect("login");
        store
            .create_post(&session, &NewPost::new("Persistent", "body").with_tags("disk"))
            .expect("create")
    };

    let store = open(&path);
    let post = store
        .get_post(post_id)
        .expect("get")
        .expect("post should persist");
    assert_eq!(post.title, "Persistent");
    assert_eq!(post.tags, vec!["disk"]);
    assert!(authenticate(&store, "alice", "pw").is_ok());
}

#[test]
fn test_reset_only_when_asked() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("blog.db");

    {
        let store = open(&path);
        register(&store, "alice", "pw").expect("register");
    }
    {
        let store = open(&path);
        assert!(authenticate(&store, "alice", "pw").is_ok());
        store.reset_schema().expect("reset");
    }

    let store = open(&path);
    assert!(matches!(
        authenticate(&store, "alice", "pw"),
        Err(BlogError::AuthenticationFailed)
    ));
    assert!(authenticate(&store, "admin", "admin123").is_ok());
}

#[test]
fn test_open_in_missing_directory_is_connection_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("blog.db");

    let err = SqliteStore::open(&path).err().expect("open should fail");
    assert!(matches!(err, BlogError::Connection { .. }));
}

#[test]
fn test_full_session_against_file_store() {
    let dir = tempdir().expect("tempdir");
    let store = open(&dir.path().join("blog.db"));
    register(&store, "writer", "pw").expect("register");

    let mut slot = SessionSlot::new();
    let session = slot.login(&store, "writer", "pw").expect("login").clone();

    let id = store
        .create_post(&session, &NewPost::new("Draft", "first").with_tags("a, b, a"))
        .expect("create");
    store
        .update_post(&session, id, &PostUpdate::from_input("", "second", ""))
        .expect("update");
    store
        .create_post(&session, &NewPost::new("Untagged", "plain"))
        .expect("create");

    let export_path = dir.path().join("posts.json");
    let document = store.export_all().expect("export");
    write_export(&export_path, &document).expect("write export");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).expect("read"))
            .expect("valid json");
    let posts = parsed["posts"].as_array().expect("posts array");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "Untagged");
    assert_eq!(posts[0]["tags"], serde_json::json!([]));
    assert_eq!(posts[1]["content"], "second");
    assert_eq!(posts[1]["tags"], serde_json::json!(["a", "b"]));
    assert_eq!(posts[1]["author"], "writer");

    slot.logout();
    assert!(slot.current().is_none());
}
