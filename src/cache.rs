use crate::gateway::GatewayError;
use crate::gateway::GatewayResult;
use crate::gateway::UserGateway;
use crate::user::RecordStore;
use crate::user::User;
use crate::user::UserFormValues;
use crate::user::UserId;
use crate::user::filter_users;
use parking_lot::RwLock;
use rand::Rng;
use std::ops::Range;
use std::sync::Arc;

/// Ids handed to records created locally before the server has answered.
const LOCAL_ID_RANGE: Range<u64> = 1..100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    Failed(GatewayError),
}

/// Keeps the record store in step with what the user asked for.
///
/// Every mutation is applied to the store before the gateway call is awaited,
/// and the store is never reverted when the call fails. Once loaded, the list
/// is not fetched again.
#[derive(Clone)]
pub struct UserCache<G>
where
    G: UserGateway,
{
    gateway: G,
    store: Arc<RwLock<RecordStore>>,
    load_state: Arc<RwLock<LoadState>>,
    load_lock: Arc<tokio::sync::Mutex<()>>,
}

impl<G> UserCache<G>
where
    G: UserGateway,
{
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: Arc::new(RwLock::new(RecordStore::new())),
            load_state: Arc::new(RwLock::new(LoadState::NotLoaded)),
            load_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Fetches the list the first time it is needed. A failed fetch is
    /// retried on the next call.
    pub async fn load(&self) -> LoadState {
        if *self.load_state.read() == LoadState::Loaded {
            return LoadState::Loaded;
        }

        let _loading = self.load_lock.lock().await;

        // another caller may have finished loading while we waited
        if *self.load_state.read() == LoadState::Loaded {
            return LoadState::Loaded;
        }

        let state = match self.gateway.list_users().await {
            Ok(users) => {
                let mut store = self.store.write();
                store.merge_loaded(users);
                tracing::info!(count = store.len(), "loaded users from the remote api");
                LoadState::Loaded
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load users");
                LoadState::Failed(e)
            }
        };

        *self.load_state.write() = state.clone();
        state
    }

    pub fn filtered(&self, query: &str) -> Vec<User> {
        let store = self.store.read();
        filter_users(store.users(), query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.store.read().get(id).cloned()
    }

    /// Appends the user under a locally drawn id right away. The returned
    /// future tells the server and does not borrow the cache, so it can be
    /// spawned.
    ///
    /// When the server answers with a different id that is still free, the
    /// record takes it over. The future yields the user with the id the record
    /// ends up with.
    pub fn create(
        &self,
        values: UserFormValues,
    ) -> impl Future<Output = GatewayResult<User>> + Send + use<G> {
        let local = self.store.write().push_new(values.clone(), synthesize_id);
        tracing::debug!(id = %local.id, "appended user ahead of the server");

        let gateway = self.gateway.clone();
        let store = self.store.clone();

        async move {
            let confirmed = gateway.create_user(values, local.id).await?;

            if confirmed.id != local.id {
                if store.write().reassign_id(local.id, confirmed.id) {
                    tracing::debug!(from = %local.id, to = %confirmed.id, "adopted server id");
                    return Ok(User {
                        id: confirmed.id,
                        ..local
                    });
                }
                tracing::debug!(
                    local = %local.id,
                    server = %confirmed.id,
                    "server id already taken, keeping local id"
                );
            }

            Ok(local)
        }
    }

    /// Replaces the stored record in place right away; the returned future
    /// tells the server. An unknown id leaves the store alone but the request
    /// still goes out.
    pub fn update(&self, user: User) -> impl Future<Output = GatewayResult<()>> + Send + use<G> {
        if !self.store.write().replace(user.clone()) {
            tracing::warn!(id = %user.id, "updating a user that is not in the store");
        }

        let gateway = self.gateway.clone();
        async move {
            gateway.update_user(user).await?;
            Ok(())
        }
    }

    /// Removes the record right away; the returned future tells the server.
    /// The record stays gone even if the server call fails.
    pub fn delete(
        &self,
        id: UserId,
    ) -> impl Future<Output = GatewayResult<Option<User>>> + Send + use<G> {
        let removed = self.store.write().remove(id);
        if removed.is_none() {
            tracing::warn!(%id, "deleting a user that is not in the store");
        }

        let gateway = self.gateway.clone();
        async move {
            gateway.delete_user(id).await?;
            Ok(removed)
        }
    }
}

fn synthesize_id() -> UserId {
    let mut rng = rand::rng();
    loop {
        if let Ok(id) = UserId::try_new(rng.random_range(LOCAL_ID_RANGE)) {
            return id;
        }
    }
}
