// src/services/user_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{RbacRepository, UserRepository},
    models::{
        auth::{AccountStatus, User},
        rbac::SUPER_ADMIN_SLUG,
    },
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    rbac_repo: RbacRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, rbac_repo: RbacRepository, pool: PgPool) -> Self {
        Self {
            user_repo,
            rbac_repo,
            pool,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    // Aprovação / rejeição de contas pendentes
    pub async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<User, AppError> {
        self.user_repo
            .update_status(id, status)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Troca o cargo de um usuário.
    ///
    /// A checagem de "só pode existir um super admin" é uma contagem em
    /// aplicação dentro da transação, não uma constraint: duas promoções
    /// simultâneas ainda podem passar.
    pub async fn change_role(&self, id: Uuid, role_slug: &str) -> Result<User, AppError> {
        // O cargo precisa existir
        self.rbac_repo
            .find_role_by_slug(role_slug)
            .await?
            .ok_or(AppError::RoleNotFound)?;

        let mut tx = self.pool.begin().await?;

        if role_slug == SUPER_ADMIN_SLUG {
            let existing = self
                .user_repo
                .count_with_role(&mut *tx, SUPER_ADMIN_SLUG, Some(id))
                .await?;
            if existing > 0 {
                tx.rollback().await?;
                return Err(AppError::SuperAdminAlreadyExists);
            }
        }

        let user = self
            .user_repo
            .update_role(&mut *tx, id, role_slug)
            .await?
            .ok_or(AppError::UserNotFound)?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.user_repo.delete_user(id).await?;
        if !deleted {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
