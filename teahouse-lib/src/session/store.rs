use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Entries, Session, SESSION_KEYS, TOKEN_KEY};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file io error")]
    StdIo(#[from] std::io::Error),

    #[error("invalid session file contents")]
    Json(#[from] serde_json::Error),
}

/// persistence for the raw credential entries
pub trait Backend: Send + Sync {
    fn load(&self) -> Result<Entries, SessionError>;

    fn save(&self, entries: &Entries) -> Result<(), SessionError>;
}

/// keeps nothing between runs
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    fn load(&self) -> Result<Entries, SessionError> {
        Ok(Entries::new())
    }

    fn save(&self, _entries: &Entries) -> Result<(), SessionError> {
        Ok(())
    }
}

/// stores the entries as a json object in a single file
#[derive(Debug)]
pub struct FileBackend {
    path: Box<Path>,
    must_exist: bool,
}

impl FileBackend {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>
    {
        FileBackend {
            path: path.into().into_boxed_path(),
            must_exist: false,
        }
    }

    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

impl Backend for FileBackend {
    fn load(&self) -> Result<Entries, SessionError> {
        match std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path) {
            Ok(file) => {
                let reader = std::io::BufReader::new(file);

                match serde_json::from_reader(reader) {
                    Ok(entries) => Ok(entries),
                    Err(err) => {
                        tracing::warn!(
                            path = %self.path.display(),
                            "discarding unreadable session file: {}",
                            err
                        );

                        Ok(Entries::new())
                    }
                }
            },
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound if !self.must_exist => Ok(Entries::new()),
                _ => Err(SessionError::StdIo(err))
            }
        }
    }

    /// writes next to the session file and renames over it so the file
    /// never holds a partial write
    fn save(&self, entries: &Entries) -> Result<(), SessionError> {
        let tmp = self.tmp_path();
        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&tmp)?;
        let mut writer = std::io::BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        drop(writer);

        std::fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

/// single owner of the credential entries.
///
/// shared by reference (usually behind an `Arc`) with the http client and
/// the router. every write goes through one lock and is persisted before
/// the lock is released so readers never see half of an update.
pub struct SessionStore {
    entries: RwLock<Entries>,
    backend: Box<dyn Backend>,
}

impl SessionStore {
    pub fn memory() -> Self {
        SessionStore {
            entries: RwLock::new(Entries::new()),
            backend: Box::new(MemoryBackend),
        }
    }

    pub fn open<P>(path: P) -> Result<Self, SessionError>
    where
        P: Into<PathBuf>
    {
        Self::with_backend(FileBackend::new(path))
    }

    pub fn with_backend<B>(backend: B) -> Result<Self, SessionError>
    where
        B: Backend + 'static
    {
        let entries = backend.load()?;

        Ok(SessionStore {
            entries: RwLock::new(entries),
            backend: Box::new(backend),
        })
    }

    // the entries are only ever replaced whole while the write lock is
    // held so a poisoned lock still holds a consistent map
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    fn commit<F>(&self, update: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut Entries)
    {
        let mut guard = self.write();
        let mut next = guard.clone();

        update(&mut next);

        self.backend.save(&next)?;
        *guard = next;

        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    pub fn set<V>(&self, key: &str, value: V) -> Result<(), SessionError>
    where
        V: Into<String>
    {
        let value = value.into();

        self.commit(|entries| {
            entries.insert(key.to_owned(), value);
        })
    }

    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    pub fn current(&self) -> Session {
        Session::from_entries(&self.read())
    }

    /// replaces every session key with the values of the given session
    pub fn establish(&self, session: &Session) -> Result<(), SessionError> {
        tracing::debug!(
            username = ?session.username,
            role = ?session.role,
            "establishing session"
        );

        self.commit(|entries| session.write_entries(entries))
    }

    /// removes every session key in one update
    pub fn clear(&self) -> Result<(), SessionError> {
        tracing::debug!("clearing session");

        self.commit(|entries| {
            for key in SESSION_KEYS {
                entries.remove(key);
            }
        })
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.read().contains_key(TOKEN_KEY))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::session::{Role, CURRENT_USER_KEY, ROLE_KEY, USERNAME_KEY, USER_ID_KEY};

    fn filled() -> Session {
        Session {
            token: Some("abc".into()),
            user_id: Some("1".into()),
            username: Some("admin".into()),
            role: Some(Role::Admin),
            current_user: Some("{\"username\":\"admin\"}".into()),
        }
    }

    #[test]
    fn clear_removes_every_session_key() {
        let store = SessionStore::memory();
        store.establish(&filled()).unwrap();
        store.set("theme", "dark").unwrap();

        store.clear().unwrap();

        for key in [TOKEN_KEY, USER_ID_KEY, USERNAME_KEY, ROLE_KEY, CURRENT_USER_KEY] {
            assert_eq!(store.get(key), None, "{} should be cleared", key);
        }

        assert!(store.current().is_empty());
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn file_backend_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = SessionStore::open(&path).unwrap();
            assert!(store.current().is_empty());

            store.establish(&filled()).unwrap();
        }

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.current(), filled());
        assert_eq!(reopened.token().as_deref(), Some("abc"));

        reopened.clear().unwrap();

        let cleared = SessionStore::open(&path).unwrap();
        assert!(cleared.current().is_empty());
    }

    #[test]
    fn save_replaces_the_file_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path).unwrap();
        store.establish(&filled()).unwrap();

        let on_disk: Entries = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get(TOKEN_KEY).map(String::as_str), Some("abc"));
        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn unreadable_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{\"token\": \"ab").unwrap();

        let store = SessionStore::open(&path).unwrap();
        assert!(store.current().is_empty());

        store.establish(&filled()).unwrap();

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.current(), filled());
    }

    #[test]
    fn missing_file_is_an_error_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("missing.json"))
            .must_exist(true);

        match SessionStore::with_backend(backend) {
            Err(SessionError::StdIo(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    struct FailingBackend;

    impl Backend for FailingBackend {
        fn load(&self) -> Result<Entries, SessionError> {
            Ok(Entries::new())
        }

        fn save(&self, _entries: &Entries) -> Result<(), SessionError> {
            Err(SessionError::StdIo(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn failed_save_leaves_entries_untouched() {
        let store = SessionStore::with_backend(FailingBackend).unwrap();

        assert!(store.set(TOKEN_KEY, "abc").is_err());
        assert_eq!(store.token(), None);
    }
}
