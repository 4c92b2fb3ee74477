// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O que sai do banco (Tabela Roles)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Lojista")]
    pub name: String,

    #[schema(example = "tenant")]
    pub slug: String,

    // Cargos de sistema (super_admin, admin) não podem ser apagados/renomeados
    pub is_system: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// O que sai do banco (Tabela Modules)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "Sales")]
    pub name: String,
}

// O Payload para criar um cargo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 1, message = "Name is required."))]
    #[schema(example = "Auxiliar de Estoque")]
    pub name: String,

    #[validate(length(min = 1, message = "Slug is required."))]
    #[schema(example = "stock_clerk")]
    pub slug: String,

    // Nomes dos módulos liberados para o cargo
    #[schema(example = json!(["Products", "Inventory"]))]
    pub modules: Vec<String>,
}

// O Payload para editar um cargo. A lista de módulos substitui a
// anterior por inteiro (apaga tudo e recria).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    pub name: Option<String>,

    #[schema(example = json!(["Products", "Sales"]))]
    pub modules: Vec<String>,
}

// Resposta completa (Cargo + Lista de Módulos)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    #[serde(flatten)]
    pub role: Role,

    #[schema(example = json!(["Products", "Inventory"]))]
    pub modules: Vec<String>,
}

// O cargo de topo. Resolve para ModuleAccess::All sem consultar o banco.
pub const SUPER_ADMIN_SLUG: &str = "super_admin";

/// Conjunto de capacidades de um cargo.
///
/// O acesso total do cargo de topo é um valor deste tipo, não um `if`
/// espalhado pelos consumidores: quem verifica acesso chama `allows`
/// e nunca olha o slug do cargo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleAccess {
    All,
    Only(std::collections::HashSet<String>),
}

impl ModuleAccess {
    pub fn allows(&self, module: &str) -> bool {
        match self {
            ModuleAccess::All => true,
            ModuleAccess::Only(modules) => modules.contains(module),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_allows_any_module() {
        let access = ModuleAccess::All;
        for module in ["Dashboard", "Products", "Sales", "Cart", "Nonexistent"] {
            assert!(access.allows(module));
        }
    }

    #[test]
    fn only_denies_absent_modules() {
        let access = ModuleAccess::Only(["Products".to_string()].into_iter().collect());
        assert!(access.allows("Products"));
        assert!(!access.allows("Sales"));
        assert!(!access.allows("Cart"));
    }

    #[test]
    fn only_with_empty_set_denies_everything() {
        let access = ModuleAccess::Only(Default::default());
        assert!(!access.allows("Dashboard"));
    }
}
