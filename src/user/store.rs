use super::User;
use super::UserFormValues;
use super::UserId;
use std::collections::HashSet;

/// Ordered list of users backing the dashboard table.
///
/// Ids are unique. Order is insertion order; updates keep a record in place and
/// removals take out exactly one record.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    users: Vec<User>,
    removed: HashSet<UserId>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes in a freshly fetched list without losing local changes.
    ///
    /// Stored records win over fetched ones with the same id, removed ids stay
    /// removed, and records only the store knows about follow the fetched ones
    /// in their current order. Later duplicates of an id are dropped.
    pub fn merge_loaded(&mut self, fetched: Vec<User>) {
        let mut seen = HashSet::new();
        let mut merged = Vec::with_capacity(fetched.len() + self.users.len());

        for user in fetched {
            if self.removed.contains(&user.id) || !seen.insert(user.id) {
                continue;
            }
            merged.push(self.get(user.id).cloned().unwrap_or(user));
        }
        merged.extend(self.users.drain(..).filter(|user| seen.insert(user.id)));

        self.users = merged;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    fn position(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }

    /// Appends a new record under the first id from `next_id` that no stored
    /// record holds.
    pub fn push_new(
        &mut self,
        values: UserFormValues,
        mut next_id: impl FnMut() -> UserId,
    ) -> User {
        let mut id = next_id();
        while self.contains(id) {
            id = next_id();
        }

        let user = User::from_form(id, values);
        self.users.push(user.clone());
        user
    }

    /// Overwrites the record with the same id in place. Returns false when no
    /// record has that id.
    pub fn replace(&mut self, user: User) -> bool {
        match self.position(user.id) {
            Some(index) => {
                self.users[index] = user;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let index = self.position(id)?;
        self.removed.insert(id);
        Some(self.users.remove(index))
    }

    /// Moves a record from one id to another. Refuses when `to` is already
    /// taken by a different record.
    pub fn reassign_id(&mut self, from: UserId, to: UserId) -> bool {
        if from == to {
            return self.contains(from);
        }
        if self.contains(to) {
            return false;
        }
        match self.position(from) {
            Some(index) => {
                self.users[index].id = to;
                true
            }
            None => false,
        }
    }
}
