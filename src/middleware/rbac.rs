// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{common::error::AppError, config::AppState, models::auth::Actor};

/// 1. O Trait que define o que é um Módulo protegido
pub trait ModuleDef: Send + Sync + 'static {
    fn name() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireModule<M>(pub PhantomData<M>);

// 3. Implementação do FromRequestParts

impl<M, S> FromRequestParts<S> for RequireModule<M>
where
    M: ModuleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai o ator (o auth_guard já rodou antes)
        let actor = parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // B. Pega o nome do módulo exigido
        let required = M::name();

        // C. Resolve o conjunto de módulos do cargo.
        //    Erro de banco aqui vira 500 genérico, não um "negado".
        let access = app_state.rbac_service.access_for_role(&actor.role).await?;

        if !access.allows(required) {
            return Err(AppError::AccessDenied(required.to_string()));
        }

        Ok(RequireModule(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS MÓDULOS (TIPOS)
// ---

pub struct ModDashboard;
impl ModuleDef for ModDashboard {
    fn name() -> &'static str {
        "Dashboard"
    }
}

pub struct ModProducts;
impl ModuleDef for ModProducts {
    fn name() -> &'static str {
        "Products"
    }
}

pub struct ModInventory;
impl ModuleDef for ModInventory {
    fn name() -> &'static str {
        "Inventory"
    }
}

pub struct ModSales;
impl ModuleDef for ModSales {
    fn name() -> &'static str {
        "Sales"
    }
}

pub struct ModCart;
impl ModuleDef for ModCart {
    fn name() -> &'static str {
        "Cart"
    }
}

pub struct ModUsers;
impl ModuleDef for ModUsers {
    fn name() -> &'static str {
        "Users"
    }
}

pub struct ModRoles;
impl ModuleDef for ModRoles {
    fn name() -> &'static str {
        "Roles"
    }
}
