use crate::cache::LoadState;
use crate::cache::UserCache;
use crate::gateway::UserGateway;
use crate::notification::Notification;
use crate::notification::NotificationSlot;
use crate::notification::Severity;
use crate::user::User;
use crate::user::UserFormValues;
use crate::user::UserId;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns all dashboard state: the user cache and the toast slot.
///
/// Mutations never fail from the caller's point of view. The store changes at
/// once and the outcome of the server call ends up in the toast.
#[derive(Clone)]
pub struct Service<G>
where
    G: UserGateway,
{
    cache: UserCache<G>,
    notifications: NotificationSlot,
}

impl<G> Service<G>
where
    G: UserGateway,
{
    pub fn new(gateway: G, notification_ttl: Duration) -> Self {
        Self {
            cache: UserCache::new(gateway),
            notifications: NotificationSlot::new(notification_ttl),
        }
    }

    pub(crate) async fn users_load(&self) -> LoadState {
        self.cache.load().await
    }

    pub(crate) fn users_matching(&self, query: &str) -> Vec<User> {
        self.cache.filtered(query)
    }

    pub(crate) fn user_get(&self, id: UserId) -> Option<User> {
        self.cache.get(id)
    }

    /// The record is appended before this returns. The server call runs on
    /// its own task, which raises the toast once it resolves.
    pub(crate) fn user_create(&self, values: UserFormValues) -> JoinHandle<()> {
        let name = values.name.clone();
        let pending = self.cache.create(values);
        let notifications = self.notifications.clone();

        tokio::spawn(async move {
            match pending.await {
                Ok(user) => {
                    tracing::info!(id = %user.id, "user added");
                    notifications.show(
                        format!("User '{name}' added successfully!"),
                        Severity::Success,
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to save user");
                    notifications.show("Failed to save user (Mock API error).", Severity::Error);
                }
            }
        })
    }

    pub(crate) fn user_update(&self, user: User) -> JoinHandle<()> {
        let (id, name) = (user.id, user.name.clone());
        let pending = self.cache.update(user);
        let notifications = self.notifications.clone();

        tokio::spawn(async move {
            match pending.await {
                Ok(()) => {
                    tracing::info!(%id, "user updated");
                    notifications.show(
                        format!("User '{name}' updated successfully!"),
                        Severity::Success,
                    );
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "failed to save user");
                    notifications.show("Failed to save user (Mock API error).", Severity::Error);
                }
            }
        })
    }

    /// `name` is what the confirmation showed; the record itself is gone by
    /// the time the server answers.
    pub(crate) fn user_delete(&self, id: UserId, name: &str) -> JoinHandle<()> {
        let name = name.to_owned();
        let pending = self.cache.delete(id);
        let notifications = self.notifications.clone();

        tokio::spawn(async move {
            match pending.await {
                Ok(_) => {
                    tracing::info!(%id, "user deleted");
                    notifications.show(
                        format!("User '{name}' deleted successfully."),
                        Severity::Success,
                    );
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "failed to delete user");
                    notifications.show("Failed to delete user (Mock API error).", Severity::Error);
                }
            }
        })
    }

    pub(crate) fn notification_current(&self) -> Option<Notification> {
        self.notifications.current()
    }

    pub(crate) fn notification_ttl(&self) -> Duration {
        self.notifications.ttl()
    }

    pub(crate) fn notification_dismiss(&self) {
        self.notifications.dismiss();
    }
}
