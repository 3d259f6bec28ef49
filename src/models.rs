use serde::{Deserialize, Serialize};

/// A stored item, as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Request body for create and update
///
/// `name` is required and must be a string. An `id` in the body is accepted
/// for shape compatibility but never used: storage assigns ids on create and
/// the path supplies it on update.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ItemPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}
