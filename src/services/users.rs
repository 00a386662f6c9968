//! Registration, authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::seq::SliceRandom;
use std::sync::Arc;
use validator::Validate;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    ids::{EntityKind, IdGenerator},
    models::user::{RegisterUser, User},
    repository::Repository,
};

/// Special characters accepted by the password strength rules.
const PASSWORD_SPECIALS: &str = "@#$%^&*!_-";

/// Avatar color palette assigned at registration.
const AVATAR_COLORS: &[&str] = &[
    "#00f5ff", "#ff00ff", "#00ff88", "#ff6b35", "#7b2fff", "#ff2d55", "#ffd700", "#00bfff",
];

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl UsersService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    /// Register a new account.
    ///
    /// Emails are stored lowercased and are unique case-insensitively.
    /// The role is fixed at creation; there is no role-change operation.
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let input = RegisterUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            ..input
        };
        input.validate()?;
        validate_password_strength(&input.password)?;

        if self.repository.users.email_exists(&input.email).await? {
            return Err(AppError::Conflict(
                "An account with this email already exists.".to_string(),
            ));
        }

        let user = User {
            id: self.ids.generate(EntityKind::User),
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role: input.role,
            created_at: self.clock.now(),
            avatar_color: random_avatar_color(),
        };

        self.repository.users.create(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "account registered");

        Ok(user)
    }

    /// Authenticate by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        let user = self
            .repository
            .users
            .get_by_email(email.trim())
            .await?
            .ok_or_else(|| {
                AppError::Authentication("No account found with this email.".to_string())
            })?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Incorrect password.".to_string()));
        }

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_all().await
    }

    /// Linear search over name and email; blank query returns everyone.
    pub async fn search_users(&self, query: &str) -> AppResult<Vec<User>> {
        let users = self.repository.users.list_all().await?;

        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(users);
        }

        Ok(users
            .into_iter()
            .filter(|u| u.name.to_lowercase().contains(&q) || u.email.to_lowercase().contains(&q))
            .collect())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check the password strength rules: 8+ characters, one uppercase letter,
/// one digit and one special character.
pub fn validate_password_strength(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Minimum 8 characters required.".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::Validation(
            "Must contain at least one uppercase letter.".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Must contain at least one number.".to_string(),
        ));
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(AppError::Validation(format!(
            "Must contain at least one special character ({}).",
            PASSWORD_SPECIALS
        )));
    }
    Ok(())
}

/// 0-4 strength score for UI strength bars.
pub fn password_score(password: &str) -> u8 {
    let mut score = 0;
    if password.len() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        score += 1;
    }
    score
}

fn random_avatar_color() -> String {
    let mut rng = rand::thread_rng();
    AVATAR_COLORS
        .choose(&mut rng)
        .copied()
        .unwrap_or("#00f5ff")
        .to_string()
}
