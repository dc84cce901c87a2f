use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub ticket_price: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub venue_id: Option<i32>,
    pub created_at: Option<TimeDateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venue::Entity",
        from = "Column::VenueId",
        to = "super::venue::Column::Id",
        on_delete = "Cascade"
    )]
    Venue,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::show_band::Entity")]
    ShowBand,
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::show_band::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowBand.def()
    }
}

impl Related<super::band::Entity> for Entity {
    fn to() -> RelationDef {
        super::show_band::Relation::Band.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::show_band::Relation::Show.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
