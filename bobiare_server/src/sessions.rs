//! Per-browser state.
//!
//! Each session owns an [`AuthSession`], a cart and a checkout in progress. Carts are written to
//! `<carts_dir>/<session id>/cart.json`, so a restarted server picks up a returning customer's cart. Identity and
//! checkout progress only live in memory.
//!
//! The store is shared by all workers behind a mutex. Callers get access through [`SessionStore::with_session`],
//! which takes a synchronous closure, so the lock can never be held across an `.await`.
//!
//! Sessions idle for longer than the idle timeout are dropped from memory, and the store never holds more than
//! `max_sessions` of them; when it is full, the least recently used session makes room. Dropping a session loses its
//! login and checkout progress, but not its cart, which is read back from disk if the customer returns.
use std::{
    collections::HashMap,
    fmt::Debug,
    path::PathBuf,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use bobiare_engine::{AuthSession, CartProvider, CheckoutFlow, FileStore};
use log::*;

use crate::errors::ServerError;

pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

pub struct Session {
    pub auth: AuthSession,
    pub cart: CartProvider<FileStore>,
    pub checkout: CheckoutFlow,
    last_seen: Instant,
}

impl Session {
    fn open(dir: PathBuf) -> Self {
        Self {
            auth: AuthSession::new(),
            cart: CartProvider::new(FileStore::new(dir)),
            checkout: CheckoutFlow::new(),
            last_seen: Instant::now(),
        }
    }
}

struct Sessions {
    by_id: HashMap<String, Session>,
    last_sweep: Instant,
}

pub struct SessionStore {
    carts_dir: PathBuf,
    idle_timeout: Duration,
    max_sessions: usize,
    sessions: Mutex<Sessions>,
}

impl Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionStore ({}, max {} sessions)", self.carts_dir.display(), self.max_sessions)
    }
}

impl SessionStore {
    pub fn new<P: Into<PathBuf>>(carts_dir: P) -> Self {
        Self::with_limits(carts_dir, DEFAULT_SESSION_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }

    pub fn with_limits<P: Into<PathBuf>>(carts_dir: P, idle_timeout: Duration, max_sessions: usize) -> Self {
        let sessions = Sessions { by_id: HashMap::new(), last_sweep: Instant::now() };
        Self { carts_dir: carts_dir.into(), idle_timeout, max_sessions: max_sessions.max(1), sessions: Mutex::new(sessions) }
    }

    /// Runs `f` on the session with the given id, creating the session first if this server has not seen it yet (or
    /// has since evicted it).
    ///
    /// A panic in an earlier closure poisons the lock. The map itself is still consistent at that point, so the
    /// store carries on with it rather than failing every later request.
    pub fn with_session<F, R>(&self, id: &str, f: F) -> Result<R, ServerError>
    where F: FnOnce(&mut Session) -> R {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| {
            error!("💻️ A request panicked while holding the session store lock. Recovering the store.");
            self.sessions.clear_poison();
            PoisonError::into_inner(e)
        });
        let now = Instant::now();
        self.sweep_idle(&mut sessions, now);
        if !sessions.by_id.contains_key(id) {
            self.make_room(&mut sessions);
            debug!("💻️ Opening session {id}");
            sessions.by_id.insert(id.to_string(), Session::open(self.carts_dir.join(id)));
        }
        let session = sessions
            .by_id
            .get_mut(id)
            .ok_or_else(|| ServerError::Unspecified(format!("Session {id} vanished from the store")))?;
        session.last_seen = now;
        Ok(f(session))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.by_id.len()).unwrap_or_else(|e| e.into_inner().by_id.len())
    }

    /// Drops idle sessions. Runs at most once per idle timeout, so most requests skip the scan.
    fn sweep_idle(&self, sessions: &mut Sessions, now: Instant) {
        if now.duration_since(sessions.last_sweep) < self.idle_timeout {
            return;
        }
        sessions.last_sweep = now;
        let before = sessions.by_id.len();
        let timeout = self.idle_timeout;
        sessions.by_id.retain(|_, s| now.duration_since(s.last_seen) < timeout);
        let dropped = before - sessions.by_id.len();
        if dropped > 0 {
            debug!("💻️ Dropped {dropped} idle sessions. {} remain", sessions.by_id.len());
        }
    }

    fn make_room(&self, sessions: &mut Sessions) {
        while sessions.by_id.len() >= self.max_sessions {
            let oldest = sessions.by_id.iter().min_by_key(|(_, s)| s.last_seen).map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    trace!("💻️ Session store is full. Evicting session {id}");
                    sessions.by_id.remove(&id);
                },
                None => break,
            }
        }
    }
}
