// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rbac::{Module, Role},
};

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    pub async fn find_role_by_slug(&self, slug: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    pub async fn find_role_by_id(&self, id: Uuid) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    // 1. Criar o Cargo
    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name, slug)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "A role with this slug already exists.".into(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn rename_role<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
        name: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE roles SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(role_id)
            .bind(name)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_role(&self, role_id: Uuid) -> Result<bool, AppError> {
        // role_permissions caem junto via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // 2. Listar todos os módulos disponíveis (para o frontend montar a tela)
    pub async fn list_modules(&self) -> Result<Vec<Module>, AppError> {
        let modules = sqlx::query_as::<_, Module>("SELECT * FROM modules ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(modules)
    }

    // 3. Buscar IDs dos módulos baseado nos nomes ("Products" -> UUID)
    pub async fn find_modules_by_names<'e, E>(
        &self,
        executor: E,
        names: &[String],
    ) -> Result<Vec<Module>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O SQLx lida bem com arrays usando ANY
        let modules = sqlx::query_as::<_, Module>(
            r#"
            SELECT id, name FROM modules WHERE name = ANY($1)
            "#,
        )
        .bind(names)
        .fetch_all(executor)
        .await?;
        Ok(modules)
    }

    // 4. Apagar os vínculos atuais do cargo (a edição substitui a lista inteira)
    pub async fn clear_role_modules<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // 5. Vincular Cargo <-> Módulo
    pub async fn assign_modules<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
        module_ids: &[Uuid],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Inserção em massa usando UNNEST para performance
        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, module_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(module_ids)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Quais módulos o cargo enxerga? É ESTA a consulta que o portão
    // de acesso usa (e que o super_admin nunca dispara).
    pub async fn modules_for_role(&self, role_slug: &str) -> Result<Vec<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT m.name
            FROM roles r
            JOIN role_permissions rp ON rp.role_id = r.id
            JOIN modules m ON m.id = rp.module_id
            WHERE r.slug = $1
            ORDER BY m.name
            "#,
        )
        .bind(role_slug)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}
