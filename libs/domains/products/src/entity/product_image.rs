use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::ProductImage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub position: i32,
    pub product_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductImage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            url: model.url,
            position: model.position,
        }
    }
}

impl From<&ProductImage> for ActiveModel {
    fn from(image: &ProductImage) -> Self {
        ActiveModel {
            id: Set(image.id),
            url: Set(image.url.clone()),
            position: Set(image.position),
            product_id: Set(image.product_id),
        }
    }
}
