use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Local storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not access browser storage\n{0}")]
    Storage(String),
}

impl From<JsValue> for SessionError {
    fn from(value: JsValue) -> Self {
        Self::Storage(format!("{value:?}"))
    }
}

/// Token held by a storage slot. The slot holds the bare token text and an empty slot counts as
/// no token.
fn token_from_slot(slot: Option<String>) -> Option<String> {
    slot.filter(|token| !token.is_empty())
}

/// Slot holding at most one bearer token for the current user
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    /// Replace the stored token
    /// # Errors
    /// This function will return an error if the backing storage rejects the write
    fn store_token(&self, token: &str) -> Result<(), SessionError>;
}

/// Token slot backed by the browser's local storage. The token survives page reloads.
#[derive(Clone, Copy, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn token(&self) -> Option<String> {
        match LocalStorage::raw().get_item(TOKEN_KEY) {
            Ok(slot) => token_from_slot(slot),
            Err(error) => {
                log::error!("Could not read the session token. {error:?}");
                None
            }
        }
    }

    fn store_token(&self, token: &str) -> Result<(), SessionError> {
        LocalStorage::raw().set_item(TOKEN_KEY, token)?;
        Ok(())
    }
}

/// Shared handle to the session store, owned by the application shell and cloned into every API
/// object that needs the token
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn SessionStore>,
}

impl Session {
    pub fn new<S>(store: S) -> Self
    where
        S: SessionStore + 'static,
    {
        Self {
            store: Rc::new(store),
        }
    }

    pub fn local() -> Self {
        Self::new(LocalSessionStore)
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    #[cfg(test)]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token
    /// # Errors
    /// This function will return an error if the backing store cannot be written
    pub fn store_token(&self, token: &str) -> Result<(), SessionError> {
        self.store.store_token(token)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;

    use super::{SessionError, SessionStore};

    #[derive(Default)]
    pub struct MemorySessionStore {
        token: RefCell<Option<String>>,
    }

    impl MemorySessionStore {
        pub fn with_token(token: &str) -> Self {
            Self {
                token: RefCell::new(Some(token.to_owned())),
            }
        }
    }

    impl SessionStore for MemorySessionStore {
        fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn store_token(&self, token: &str) -> Result<(), SessionError> {
            *self.token.borrow_mut() = Some(token.to_owned());
            Ok(())
        }
    }
}
