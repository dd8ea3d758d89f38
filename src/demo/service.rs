//! In-memory user service. Every public method is a `Loggable` call.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use axum::body::Bytes;

use crate::demo::model::{UserDto, UserError};
use crate::interception::{Interceptors, Invocation, Loggable, UploadedFile};

const CREATE_USER: Loggable = Loggable::new().label("user registration").show_data(true);
const FIND_USER: Loggable = Loggable::new().show_data(true);
const LIST_USERS: Loggable = Loggable::new();
const AVATAR: Loggable = Loggable::new().label("avatar download");

struct StoredUser {
    user: UserDto,
    avatar: Option<UploadedFile>,
}

pub struct UserService {
    interceptors: Interceptors,
    next_id: AtomicU64,
    users: RwLock<BTreeMap<u64, StoredUser>>,
}

impl UserService {
    pub fn new(interceptors: Interceptors) -> Self {
        Self {
            interceptors,
            next_id: AtomicU64::new(1),
            users: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn create_user(&self, user: UserDto, avatar: UploadedFile) -> Result<UserDto, UserError> {
        let call = self.interceptors.method(
            &CREATE_USER,
            Invocation::of::<Self>("create_user").arg(&user).upload(&avatar),
        );
        call.try_run(|| self.insert(user, avatar))
    }

    pub fn find_user(&self, id: u64) -> Result<UserDto, UserError> {
        let call = self
            .interceptors
            .method(&FIND_USER, Invocation::of::<Self>("find_user").arg(&id));
        call.try_run(|| {
            let users = self.users.read().expect("user store lock poisoned");
            users
                .get(&id)
                .map(|stored| stored.user.clone())
                .ok_or(UserError::NotFound(id))
        })
    }

    pub fn list_users(&self, limit: Option<usize>) -> Vec<UserDto> {
        let call = self
            .interceptors
            .method(&LIST_USERS, Invocation::of::<Self>("list_users").arg(&limit));
        call.run(|| {
            let users = self.users.read().expect("user store lock poisoned");
            users
                .values()
                .take(limit.unwrap_or(usize::MAX))
                .map(|stored| stored.user.clone())
                .collect()
        })
    }

    /// Raw avatar bytes. Only the size reaches the exit line.
    pub fn avatar(&self, id: u64) -> Result<(Option<String>, Bytes), UserError> {
        let call = self
            .interceptors
            .method(&AVATAR, Invocation::of::<Self>("avatar").arg(&id));
        let users = self.users.read().expect("user store lock poisoned");
        let found = match users.get(&id) {
            None => Err(UserError::NotFound(id)),
            Some(StoredUser { avatar: None, .. }) => Err(UserError::NoAvatar(id)),
            Some(StoredUser {
                avatar: Some(file), ..
            }) => Ok((file.content_type.clone(), file.data.clone())),
        };
        match &found {
            Ok((_, data)) => call.exit(&data.len()),
            Err(e) => call.exit_with_error(e),
        }
        found
    }

    fn insert(&self, user: UserDto, avatar: UploadedFile) -> Result<UserDto, UserError> {
        if user.name.trim().is_empty() {
            return Err(UserError::Invalid("name must not be empty".into()));
        }
        if !user.email.contains('@') {
            return Err(UserError::Invalid(format!(
                "email {:?} is not an address",
                user.email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let created = UserDto {
            id: Some(id),
            ..user
        };
        let avatar = (!avatar.is_empty()).then_some(avatar);
        self.users
            .write()
            .expect("user store lock poisoned")
            .insert(
                id,
                StoredUser {
                    user: created.clone(),
                    avatar,
                },
            );
        Ok(created)
    }
}
