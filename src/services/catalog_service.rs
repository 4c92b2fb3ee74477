// src/services/catalog_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, InventoryRepository},
    models::{
        auth::Actor,
        catalog::{CreateProductPayload, Product, UpdateProductPayload},
    },
};

// Lojistas só mexem no que é deles
const TENANT_ROLE: &str = "tenant";

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(
        catalog_repo: CatalogRepository,
        inventory_repo: InventoryRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            catalog_repo,
            inventory_repo,
            pool,
        }
    }

    /// Cria o produto e o saldo de estoque na mesma transação.
    pub async fn create_product(
        &self,
        actor: &Actor,
        payload: CreateProductPayload,
    ) -> Result<Product, AppError> {
        // Produto de lojista nasce com dono; de admin, sem
        let owner_id = if actor.role == TENANT_ROLE {
            Some(actor.id)
        } else {
            None
        };

        let mut tx = self.pool.begin().await?;

        let product = self
            .catalog_repo
            .create_product(
                &mut *tx,
                owner_id,
                &payload.name,
                &payload.sku,
                &payload.category,
                payload.price,
            )
            .await?;

        self.inventory_repo
            .create_level(
                &mut *tx,
                product.id,
                payload.initial_stock,
                payload.low_stock_threshold,
            )
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn list_products(&self, actor: &Actor) -> Result<Vec<Product>, AppError> {
        let owner = self.scope_for(actor);
        self.catalog_repo.list_products(owner).await
    }

    pub async fn get_product(&self, actor: &Actor, id: Uuid) -> Result<Product, AppError> {
        let product = self
            .catalog_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        self.check_ownership(actor, &product)?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: UpdateProductPayload,
    ) -> Result<Product, AppError> {
        // Releitura primeiro: lojista não pode nem saber que o produto existe
        let current = self
            .catalog_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        self.check_ownership(actor, &current)?;

        self.catalog_repo
            .update_product(
                id,
                payload.name.as_deref(),
                payload.category.as_deref(),
                payload.price,
                payload.status,
            )
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete_product(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        let current = self
            .catalog_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        self.check_ownership(actor, &current)?;

        self.catalog_repo.delete_product(id).await?;
        Ok(())
    }

    fn scope_for(&self, actor: &Actor) -> Option<Uuid> {
        if actor.role == TENANT_ROLE {
            Some(actor.id)
        } else {
            None
        }
    }

    fn check_ownership(&self, actor: &Actor, product: &Product) -> Result<(), AppError> {
        if actor.role == TENANT_ROLE && product.owner_id != Some(actor.id) {
            // 404, não 403: não vaza a existência do produto alheio
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }
}
