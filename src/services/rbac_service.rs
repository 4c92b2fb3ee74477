// src/services/rbac_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RbacRepository,
    models::rbac::{Module, ModuleAccess, Role, RoleResponse, SUPER_ADMIN_SLUG},
};

#[derive(Clone)]
pub struct RbacService {
    repo: RbacRepository,
    pool: PgPool,
}

impl RbacService {
    pub fn new(repo: RbacRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Resolve o conjunto de módulos de um cargo.
    ///
    /// O cargo de topo vira `All` direto, sem nenhuma consulta; os demais
    /// carregam a lista do vínculo cargo <-> módulo.
    pub async fn access_for_role(&self, role_slug: &str) -> Result<ModuleAccess, AppError> {
        if role_slug == SUPER_ADMIN_SLUG {
            return Ok(ModuleAccess::All);
        }

        let names = self.repo.modules_for_role(role_slug).await?;
        Ok(ModuleAccess::Only(names.into_iter().collect()))
    }

    pub async fn create_role_with_modules(
        &self,
        name: String,
        slug: String,
        module_names: Vec<String>,
    ) -> Result<RoleResponse, AppError> {
        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria o Cargo
        let role = self.repo.create_role(&mut *tx, &name, &slug).await?;

        // 3. Resolve nomes ("Products") para IDs (UUIDs)
        let modules = self.repo.find_modules_by_names(&mut *tx, &module_names).await?;

        let module_ids: Vec<Uuid> = modules.iter().map(|m| m.id).collect();
        let valid_names: Vec<String> = modules.into_iter().map(|m| m.name).collect();

        // 4. Salva o Vínculo
        if !module_ids.is_empty() {
            self.repo.assign_modules(&mut *tx, role.id, &module_ids).await?;
        }

        // 5. Commit
        tx.commit().await?;

        Ok(RoleResponse {
            role,
            modules: valid_names,
        })
    }

    /// Edita um cargo. A lista de módulos substitui a anterior por inteiro.
    pub async fn update_role_modules(
        &self,
        role_id: Uuid,
        new_name: Option<String>,
        module_names: Vec<String>,
    ) -> Result<RoleResponse, AppError> {
        let mut role = self
            .repo
            .find_role_by_id(role_id)
            .await?
            .ok_or(AppError::RoleNotFound)?;

        // Cargos de sistema são intocáveis
        if role.is_system {
            return Err(AppError::SystemRoleProtected);
        }

        let mut tx = self.pool.begin().await?;

        if let Some(name) = new_name {
            self.repo.rename_role(&mut *tx, role.id, &name).await?;
            role.name = name;
        }

        // Apaga tudo e recria: edição é sempre a lista completa
        self.repo.clear_role_modules(&mut *tx, role.id).await?;

        let modules = self.repo.find_modules_by_names(&mut *tx, &module_names).await?;
        let module_ids: Vec<Uuid> = modules.iter().map(|m| m.id).collect();
        let valid_names: Vec<String> = modules.into_iter().map(|m| m.name).collect();

        if !module_ids.is_empty() {
            self.repo.assign_modules(&mut *tx, role.id, &module_ids).await?;
        }

        tx.commit().await?;

        Ok(RoleResponse {
            role,
            modules: valid_names,
        })
    }

    pub async fn delete_role(&self, role_id: Uuid) -> Result<(), AppError> {
        let role = self
            .repo
            .find_role_by_id(role_id)
            .await?
            .ok_or(AppError::RoleNotFound)?;

        if role.is_system {
            return Err(AppError::SystemRoleProtected);
        }

        self.repo.delete_role(role.id).await?;
        Ok(())
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.repo.list_roles().await
    }

    pub async fn list_modules(&self) -> Result<Vec<Module>, AppError> {
        self.repo.list_modules().await
    }

    /// Lista de módulos de um cargo, para o frontend montar o menu.
    /// É o endpoint de "pull": o cliente rebusca no login e depois que um
    /// administrador edita o cargo.
    pub async fn modules_for_role_slug(&self, slug: &str) -> Result<Vec<String>, AppError> {
        let role = self
            .repo
            .find_role_by_slug(slug)
            .await?
            .ok_or(AppError::RoleNotFound)?;

        match self.access_for_role(&role.slug).await? {
            ModuleAccess::All => {
                let all = self.repo.list_modules().await?;
                Ok(all.into_iter().map(|m| m.name).collect())
            }
            ModuleAccess::Only(_) => self.repo.modules_for_role(&role.slug).await,
        }
    }
}
