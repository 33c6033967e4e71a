use crate::domain::User;
use crate::error::DomainResult;
use crate::ports::UserRepository;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create_user(&self, name: &str) -> DomainResult<User> {
        let user = User::new(name)?;
        self.users.create(&user).await?;
        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> DomainResult<User> {
        self.users.find_by_id(id).await
    }
}
