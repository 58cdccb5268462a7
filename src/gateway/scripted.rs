use super::GatewayError;
use super::GatewayResult;
use super::UserGateway;
use crate::user::User;
use crate::user::UserFormValues;
use crate::user::UserId;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(UserId),
    Update(UserId),
    Delete(UserId),
}

#[derive(Default)]
struct Script {
    users: Vec<User>,
    server_id: Option<UserId>,
    fail_with: Option<GatewayError>,
    held: bool,
    calls: Vec<Call>,
}

/// In-memory gateway for tests. Answers like the mock API, can be told to fail
/// every call, and can hold calls until released.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    script: Arc<Mutex<Script>>,
    gate: Arc<Notify>,
}

impl ScriptedGateway {
    pub fn with_users(users: Vec<User>) -> Self {
        let gateway = Self::default();
        gateway.script.lock().users = users;
        gateway
    }

    pub fn fail_with(&self, err: GatewayError) {
        self.script.lock().fail_with = Some(err);
    }

    pub fn succeed(&self) {
        self.script.lock().fail_with = None;
    }

    /// Makes created users come back with this id instead of the one sent.
    pub fn assign_ids(&self, id: UserId) {
        self.script.lock().server_id = Some(id);
    }

    pub fn hold(&self) {
        self.script.lock().held = true;
    }

    pub fn release(&self) {
        self.script.lock().held = false;
        self.gate.notify_one();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().calls.clone()
    }

    async fn enter(&self, call: Call) -> GatewayResult<()> {
        let held = {
            let mut script = self.script.lock();
            script.calls.push(call);
            script.held
        };

        if held {
            self.gate.notified().await;
        }

        match self.script.lock().fail_with.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl UserGateway for ScriptedGateway {
    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.enter(Call::List).await?;
        Ok(self.script.lock().users.clone())
    }

    async fn create_user(&self, values: UserFormValues, id: UserId) -> GatewayResult<User> {
        self.enter(Call::Create(id)).await?;
        let server_id = self.script.lock().server_id.unwrap_or(id);
        Ok(User::from_form(server_id, values))
    }

    async fn update_user(&self, user: User) -> GatewayResult<User> {
        self.enter(Call::Update(user.id)).await?;
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> GatewayResult<()> {
        self.enter(Call::Delete(id)).await
    }
}
