//! In-memory user collection owned by the list view.
//!
//! Populated once from the remote list and reconciled locally after each
//! successful write.
use crate::model::UserRecord;

#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Vec<UserRecord>,
}

impl UserStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn all(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn replace_all(&mut self, users: Vec<UserRecord>) {
        self.users = users;
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }

    /// Prepend a created record, assigning it the id `len + 1`.
    ///
    /// The id may collide with an existing one once anything has been deleted;
    /// collisions are kept as is. Returns the assigned id.
    pub fn insert_created(&mut self, mut created: UserRecord) -> u64 {
        let id = self.users.len() as u64 + 1;
        created.id = Some(id);
        self.users.insert(0, created);
        id
    }

    /// Replace every record whose id equals `record.id` with `record`.
    /// Returns how many records were replaced.
    pub fn replace(&mut self, record: &UserRecord) -> usize {
        let Some(id) = record.id else { return 0 };
        let mut replaced = 0;
        for user in self.users.iter_mut().filter(|u| u.id == Some(id)) {
            *user = record.clone();
            replaced += 1;
        }
        replaced
    }

    /// Remove every record with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: u64) -> usize {
        let before = self.users.len();
        self.users.retain(|u| u.id != Some(id));
        before - self.users.len()
    }
}
