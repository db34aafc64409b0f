use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    #[sea_orm(string_value = "weapon")]
    Weapon,
    #[sea_orm(string_value = "armour")]
    Armour,
    #[sea_orm(string_value = "consumable")]
    Consumable,
    #[sea_orm(string_value = "accessory")]
    Accessory,
    #[sea_orm(string_value = "misc")]
    Misc,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[sea_orm(string_value = "listed")]
    Listed,
    #[sea_orm(string_value = "unlisted")]
    Unlisted,
}
